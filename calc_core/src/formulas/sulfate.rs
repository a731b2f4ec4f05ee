//! # Anhydrous Sulfate Dosage
//!
//! Optimum SO₃ adjustment from three successive strength readings, plus a
//! judgement on whether the readings are usable or the test must be rerun.
//!
//! ## Formula
//!
//! ```text
//! a = cs2 − cs1
//! b = cs3 − cs2
//! c = so3/100
//! G = (a/(a − b)) · c + d + c/2
//! ```
//!
//! ## Judgement
//!
//! Evaluated on `(a, b)` only, first match wins:
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | a < 0 and b > 0 | Retest |
//! | b = 0 | Acceptable (ratio not evaluated) |
//! | a > 0, b > 0, a/b < 2.0 | Retest |
//! | a < 0, b < 0, a/b > 0.5 | Retest |
//! | otherwise | Acceptable |
//!
//! The judgement is reported even when `G` cannot be computed.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::formulas::sulfate::{calculate, Judgement, SulfateInput};
//!
//! let input = SulfateInput { cs1: 40.0, cs2: 46.0, cs3: 48.0, so3: 2.0, d: 0.5 };
//! let report = calculate(&input);
//! assert_eq!((report.a, report.b), (6.0, 2.0));
//! assert_eq!(report.judgement, Some(Judgement::Acceptable));
//! assert!((report.dosage.unwrap().dosage - 0.54).abs() < 1e-9);
//! ```

use std::fmt;

use log::{debug, trace};
use serde::Serialize;

use crate::errors::{CalcError, CalcResult};
use crate::numeric::{non_finite_fields, RawInput};

/// Lower bound of a/b when both differences are positive
pub const POSITIVE_RATIO_MIN: f64 = 2.0;

/// Upper bound of a/b when both differences are negative
pub const NEGATIVE_RATIO_MAX: f64 = 0.5;

/// Binary verdict on the strength readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Judgement {
    Retest,
    Acceptable,
}

impl Judgement {
    /// Label shown next to the dosage
    pub fn label(&self) -> &'static str {
        match self {
            Judgement::Retest => "(Retest)",
            Judgement::Acceptable => "(Acceptable)",
        }
    }
}

impl fmt::Display for Judgement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify the strength differences.
///
/// Callers pass finite values; with `NaN` every comparison is false and the
/// result falls through to `Acceptable`.
pub fn judge(a: f64, b: f64) -> Judgement {
    if a < 0.0 && b > 0.0 {
        return Judgement::Retest;
    }
    // ratio undefined, skip the ratio rules
    if b == 0.0 {
        return Judgement::Acceptable;
    }

    let ratio = a / b;
    if a > 0.0 && b > 0.0 && ratio < POSITIVE_RATIO_MIN {
        return Judgement::Retest;
    }
    if a < 0.0 && b < 0.0 && ratio > NEGATIVE_RATIO_MAX {
        return Judgement::Retest;
    }
    Judgement::Acceptable
}

/// Difference of two readings; `NaN` unless both are finite.
pub fn difference(later: f64, earlier: f64) -> f64 {
    if later.is_finite() && earlier.is_finite() {
        later - earlier
    } else {
        f64::NAN
    }
}

/// Input parameters for the sulfate dosage.
///
/// ## JSON Example
///
/// ```json
/// { "cs1": 40.0, "cs2": 46.0, "cs3": 48.0, "so3": 2.0, "d": 0.5 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SulfateInput {
    /// First strength reading
    pub cs1: f64,
    /// Second strength reading
    pub cs2: f64,
    /// Third strength reading
    pub cs3: f64,
    /// SO₃ step between readings (%)
    pub so3: f64,
    /// Offset added to the dosage
    pub d: f64,
}

impl SulfateInput {
    pub const FIELDS: [&'static str; 5] = ["cs1", "cs2", "cs3", "so3", "d"];

    /// Build from raw form text. Missing or malformed fields become `NaN`.
    pub fn from_raw(raw: &RawInput) -> Self {
        Self {
            cs1: raw.number("cs1"),
            cs2: raw.number("cs2"),
            cs3: raw.number("cs3"),
            so3: raw.number("so3"),
            d: raw.number("d"),
        }
    }

    /// a = cs2 − cs1
    pub fn a(&self) -> f64 {
        difference(self.cs2, self.cs1)
    }

    /// b = cs3 − cs2
    pub fn b(&self) -> f64 {
        difference(self.cs3, self.cs2)
    }
}

/// Computed dosage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SulfateDosage {
    /// so3/100
    pub c: f64,
    /// G
    pub dosage: f64,
}

/// Everything the sulfate formula reports.
///
/// `dosage` may fail while `a`, `b` and `judgement` are still available.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SulfateReport {
    pub a: f64,
    pub b: f64,
    /// Present whenever both `a` and `b` are finite
    pub judgement: Option<Judgement>,
    pub dosage: CalcResult<SulfateDosage>,
}

/// Compute G from the differences.
///
/// Fails with `InvalidInput` unless `a`, `b`, `so3`, `d` are all finite,
/// then with `DivisionByZero` when `a − b` is 0.
pub fn dosage(a: f64, b: f64, so3: f64, d: f64) -> CalcResult<SulfateDosage> {
    let bad = non_finite_fields(&[("a", a), ("b", b), ("so3", so3), ("d", d)]);
    if !bad.is_empty() {
        return Err(CalcError::invalid_input(bad));
    }

    let denom = a - b;
    if denom == 0.0 {
        return Err(CalcError::division_by_zero("a-b"));
    }

    let c = so3 / 100.0;
    let dosage = (a / denom) * c + d + c / 2.0;
    Ok(SulfateDosage { c, dosage })
}

/// Run the sulfate formula and the judgement.
pub fn calculate(input: &SulfateInput) -> SulfateReport {
    let a = input.a();
    let b = input.b();

    let judgement = (a.is_finite() && b.is_finite()).then(|| judge(a, b));
    let dosage = dosage(a, b, input.so3, input.d);

    match &dosage {
        Ok(g) => trace!("sulfate: a={} b={} c={} G={} judgement={:?}", a, b, g.c, g.dosage, judgement),
        Err(e) => debug!("sulfate dosage rejected: {} (judgement={:?})", e, judgement),
    }

    SulfateReport {
        a,
        b,
        judgement,
        dosage,
    }
}
