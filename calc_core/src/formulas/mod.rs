//! # Formulas
//!
//! Each formula follows the pattern:
//!
//! - `*Input` - typed inputs, built from a [`RawInput`] with `from_raw`
//! - `*Result` / `*Report` - calculation results (JSON-serializable)
//! - `calculate(&input)` - pure calculation function
//!
//! [`evaluate`] dispatches raw form fields to the right formula and wraps
//! the outcome in an [`Evaluation`] that knows how to render itself.
//!
//! ## Available Formulas
//!
//! - [`air_content`] - Mortar air content (%)
//! - [`specific_surface`] - Specific surface area
//! - [`sulfate`] - Anhydrous sulfate dosage and retest judgement
//!
//! ## Example
//!
//! ```rust
//! use calc_core::formulas::{evaluate, FormulaKind};
//! use calc_core::numeric::RawInput;
//!
//! let raw = RawInput::new().with("w", "0").with("C", "1").with("S", "1").with("P", "0");
//! let eval = evaluate(FormulaKind::AirContent, &raw);
//! assert_eq!(eval.result_text(), "100.000000");
//! assert_eq!(eval.message(), "");
//! ```

pub mod air_content;
pub mod specific_surface;
pub mod sulfate;

use std::fmt;

use serde::Serialize;

use crate::errors::{CalcError, CalcResult};
use crate::numeric::{format_result, RawInput};

pub use air_content::{AirContentInput, AirContentResult};
pub use specific_surface::{SpecificSurfaceInput, SpecificSurfaceResult};
pub use sulfate::{Judgement, SulfateDosage, SulfateInput, SulfateReport};

/// Placeholder shown in place of a result that could not be computed
pub const EMPTY_RESULT: &str = "—";

/// The three independent formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormulaKind {
    AirContent,
    SpecificSurface,
    Sulfate,
}

impl FormulaKind {
    pub const ALL: [FormulaKind; 3] = [
        FormulaKind::AirContent,
        FormulaKind::SpecificSurface,
        FormulaKind::Sulfate,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaKind::AirContent => "Air Content",
            FormulaKind::SpecificSurface => "Specific Surface Area",
            FormulaKind::Sulfate => "Anhydrous Sulfate",
        }
    }

    /// Input field names, in validation order
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            FormulaKind::AirContent => &AirContentInput::FIELDS,
            FormulaKind::SpecificSurface => &SpecificSurfaceInput::FIELDS,
            FormulaKind::Sulfate => &SulfateInput::FIELDS,
        }
    }
}

impl fmt::Display for FormulaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Outcome of one formula evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "formula")]
pub enum Evaluation {
    AirContent {
        input: AirContentInput,
        result: CalcResult<AirContentResult>,
    },
    SpecificSurface {
        input: SpecificSurfaceInput,
        result: CalcResult<SpecificSurfaceResult>,
    },
    Sulfate {
        input: SulfateInput,
        report: SulfateReport,
    },
}

impl Evaluation {
    pub fn kind(&self) -> FormulaKind {
        match self {
            Evaluation::AirContent { .. } => FormulaKind::AirContent,
            Evaluation::SpecificSurface { .. } => FormulaKind::SpecificSurface,
            Evaluation::Sulfate { .. } => FormulaKind::Sulfate,
        }
    }

    /// The headline number, or the error that prevented it
    pub fn value(&self) -> CalcResult<f64> {
        match self {
            Evaluation::AirContent { result, .. } => {
                result.as_ref().map(|r| r.air_content_pct).map_err(Clone::clone)
            }
            Evaluation::SpecificSurface { result, .. } => {
                result.as_ref().map(|r| r.specific_surface).map_err(Clone::clone)
            }
            Evaluation::Sulfate { report, .. } => {
                report.dosage.as_ref().map(|g| g.dosage).map_err(Clone::clone)
            }
        }
    }

    pub fn error(&self) -> Option<CalcError> {
        self.value().err()
    }

    /// Six-decimal value, or [`EMPTY_RESULT`] on failure
    pub fn result_text(&self) -> String {
        match self.value() {
            Ok(v) => format_result(v),
            Err(_) => EMPTY_RESULT.to_string(),
        }
    }

    /// Diagnostic for the failed check; empty on success
    pub fn message(&self) -> String {
        self.error().map(|e| e.message()).unwrap_or_default()
    }

    /// Sulfate judgement, available even when the dosage failed
    pub fn judgement(&self) -> Option<Judgement> {
        match self {
            Evaluation::Sulfate { report, .. } => report.judgement,
            _ => None,
        }
    }

    /// Judgement label shown beside a computed dosage
    pub fn judgement_label(&self) -> Option<&'static str> {
        match self {
            Evaluation::Sulfate { report, .. } if report.dosage.is_ok() => {
                report.judgement.map(|j| j.label())
            }
            _ => None,
        }
    }
}

/// Parse raw fields for `kind` and run the formula.
pub fn evaluate(kind: FormulaKind, raw: &RawInput) -> Evaluation {
    match kind {
        FormulaKind::AirContent => {
            let input = AirContentInput::from_raw(raw);
            Evaluation::AirContent {
                result: air_content::calculate(&input),
                input,
            }
        }
        FormulaKind::SpecificSurface => {
            let input = SpecificSurfaceInput::from_raw(raw);
            Evaluation::SpecificSurface {
                result: specific_surface::calculate(&input),
                input,
            }
        }
        FormulaKind::Sulfate => {
            let input = SulfateInput::from_raw(raw);
            Evaluation::Sulfate {
                report: sulfate::calculate(&input),
                input,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn raw(pairs: &[(&str, &str)]) -> RawInput {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_air_content_renders() {
        let eval = evaluate(
            FormulaKind::AirContent,
            &raw(&[("w", "0"), ("C", "1"), ("S", "1"), ("P", "0")]),
        );
        assert_eq!(eval.kind(), FormulaKind::AirContent);
        assert_eq!(eval.result_text(), "100.000000");
        assert!(eval.error().is_none());
        assert_eq!(eval.judgement_label(), None);
    }

    #[test]
    fn test_air_content_zero_c_renders_message() {
        let eval = evaluate(
            FormulaKind::AirContent,
            &raw(&[("w", "0"), ("C", "0"), ("S", "1"), ("P", "0")]),
        );
        assert_eq!(eval.result_text(), EMPTY_RESULT);
        assert_eq!(eval.message(), "C cannot be 0. (337.5/C)");
    }

    #[test]
    fn test_specific_surface_renders() {
        let eval = evaluate(
            FormulaKind::SpecificSurface,
            &raw(&[
                ("S0", "1"),
                ("rho0", "1"),
                ("rho", "1"),
                ("e0", "0.5"),
                ("e", "0.5"),
                ("t", "1"),
                ("t0", "1"),
            ]),
        );
        assert_eq!(eval.result_text(), "1.000000");
    }

    #[test]
    fn test_zero_flow_time_renders_unsigned_zero() {
        // T = 0 with a negative S0 yields -0.0
        let eval = evaluate(
            FormulaKind::SpecificSurface,
            &raw(&[
                ("S0", "-1"),
                ("rho0", "1"),
                ("rho", "1"),
                ("e0", "0.5"),
                ("e", "0.5"),
                ("t", "0"),
                ("t0", "1"),
            ]),
        );
        assert_eq!(eval.result_text(), "0.000000");
    }

    #[test]
    fn test_overflowing_air_content_renders_infinity() {
        // 337.5/1e-320 overflows to inf
        let eval = evaluate(
            FormulaKind::AirContent,
            &raw(&[("w", "400"), ("C", "1e-320"), ("S", "1"), ("P", "0")]),
        );
        assert!(eval.error().is_none());
        assert_eq!(eval.result_text(), "-Infinity");
    }

    #[test]
    fn test_missing_fields_are_invalid_input() {
        for kind in FormulaKind::ALL {
            let eval = evaluate(kind, &RawInput::new());
            assert_eq!(eval.error().map(|e| e.kind()), Some(ErrorKind::InvalidInput));
            assert_eq!(eval.message(), "Check the numbers.");
        }
    }

    #[test]
    fn test_sulfate_label_only_with_dosage() {
        let ok = evaluate(
            FormulaKind::Sulfate,
            &raw(&[("cs1", "40"), ("cs2", "46"), ("cs3", "48"), ("so3", "2"), ("d", "0.5")]),
        );
        assert_eq!(ok.result_text(), "0.540000");
        assert_eq!(ok.judgement_label(), Some("(Acceptable)"));

        let failed = evaluate(
            FormulaKind::Sulfate,
            &raw(&[("cs1", "0"), ("cs2", "2"), ("cs3", "4"), ("so3", "2"), ("d", "0")]),
        );
        assert_eq!(failed.result_text(), EMPTY_RESULT);
        assert_eq!(failed.judgement(), Some(Judgement::Retest));
        assert_eq!(failed.judgement_label(), None);
    }

    #[test]
    fn test_fields_match_kind() {
        assert_eq!(FormulaKind::AirContent.fields(), &["w", "C", "S", "P"]);
        assert_eq!(FormulaKind::SpecificSurface.fields().len(), 7);
        assert_eq!(FormulaKind::Sulfate.fields()[3], "so3");
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let fields = raw(&[("w", "250"), ("C", "3.15"), ("S", "2.65"), ("P", "0.5")]);
        assert_eq!(
            evaluate(FormulaKind::AirContent, &fields),
            evaluate(FormulaKind::AirContent, &fields)
        );
    }

    #[test]
    fn test_evaluation_json() {
        let eval = evaluate(FormulaKind::AirContent, &raw(&[("w", "0"), ("C", "0"), ("S", "1"), ("P", "0")]));
        let json = serde_json::to_value(&eval).unwrap();
        assert_eq!(json["formula"], "AirContent");
        assert_eq!(json["result"]["Err"]["type"], "DivisionByZero");
        assert_eq!(json["result"]["Err"]["details"]["divisor"], "C");
    }

    #[test]
    fn test_unparsed_field_serializes_as_null() {
        let eval = evaluate(
            FormulaKind::Sulfate,
            &raw(&[("cs1", "40"), ("cs2", "x"), ("cs3", "48"), ("so3", "2"), ("d", "0.5")]),
        );
        let json = serde_json::to_value(&eval).unwrap();
        assert!(json["input"]["cs2"].is_null());
        assert_eq!(json["report"]["dosage"]["Err"]["type"], "InvalidInput");
    }
}
