//! # Air Content
//!
//! Estimates the air content (%) of a mortar from the water quantity and the
//! specific gravities of cement and sand, with an admixture percentage term.
//!
//! ## Formula
//!
//! ```text
//! pTerm = 337.5 · P · 0.01
//! air   = 100 · (1 − (w/400) · (337.5/C + 1350/S + pTerm) / (337.5 + 1350 + pTerm))
//! ```
//!
//! 337.5 g of cement and 1350 g of standard sand per batch.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::formulas::air_content::{calculate, AirContentInput};
//!
//! let input = AirContentInput { w: 0.0, c: 1.0, s: 1.0, p: 0.0 };
//! let result = calculate(&input).unwrap();
//! assert!((result.air_content_pct - 100.0).abs() < 1e-9);
//! ```

use log::{debug, trace};
use serde::Serialize;

use crate::errors::{CalcError, CalcResult};
use crate::numeric::{non_finite_fields, RawInput};

/// Cement mass per batch (g)
pub const CEMENT_MASS_G: f64 = 337.5;

/// Standard sand mass per batch (g)
pub const SAND_MASS_G: f64 = 1350.0;

/// Divisor applied to the water quantity
pub const WATER_DIVISOR: f64 = 400.0;

/// Input parameters for the air-content estimate.
///
/// ## JSON Example
///
/// ```json
/// { "w": 250.0, "C": 3.15, "S": 2.65, "P": 0.5 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirContentInput {
    /// Water quantity
    pub w: f64,
    /// Specific gravity of cement
    #[serde(rename = "C")]
    pub c: f64,
    /// Specific gravity of sand
    #[serde(rename = "S")]
    pub s: f64,
    /// Admixture percentage
    #[serde(rename = "P")]
    pub p: f64,
}

impl AirContentInput {
    /// Field names as they appear on the form, in validation order
    pub const FIELDS: [&'static str; 4] = ["w", "C", "S", "P"];

    /// Build from raw form text. Missing or malformed fields become `NaN`.
    pub fn from_raw(raw: &RawInput) -> Self {
        Self {
            w: raw.number("w"),
            c: raw.number("C"),
            s: raw.number("S"),
            p: raw.number("P"),
        }
    }

    /// Validate input parameters, first failing check wins.
    pub fn validate(&self) -> CalcResult<()> {
        let bad = non_finite_fields(&[("w", self.w), ("C", self.c), ("S", self.s), ("P", self.p)]);
        if !bad.is_empty() {
            return Err(CalcError::invalid_input(bad));
        }
        if self.c == 0.0 {
            return Err(CalcError::division_by_zero("C"));
        }
        if self.s == 0.0 {
            return Err(CalcError::division_by_zero("S"));
        }
        Ok(())
    }

    /// Admixture term 337.5 · P · 0.01
    pub fn p_term(&self) -> f64 {
        CEMENT_MASS_G * self.p * 0.01
    }
}

/// Results of the air-content estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirContentResult {
    /// 337.5 · P · 0.01
    pub p_term: f64,
    /// 337.5/C + 1350/S + pTerm
    pub numerator: f64,
    /// 337.5 + 1350 + pTerm
    pub denominator: f64,
    /// Estimated air content (%). Not range-checked; extreme inputs may
    /// produce a non-finite value.
    pub air_content_pct: f64,
}

/// Calculate the air content.
///
/// # Returns
///
/// * `Ok(AirContentResult)` - Calculation results
/// * `Err(CalcError)` - `InvalidInput`, or `DivisionByZero` for `C`, `S` or
///   the combined `denominator`
pub fn calculate(input: &AirContentInput) -> CalcResult<AirContentResult> {
    if let Err(e) = input.validate() {
        debug!("air content rejected: {}", e);
        return Err(e);
    }

    let p_term = input.p_term();
    let numerator = CEMENT_MASS_G / input.c + SAND_MASS_G / input.s + p_term;
    let denominator = CEMENT_MASS_G + SAND_MASS_G + p_term;

    if denominator == 0.0 {
        debug!("air content rejected: denominator is 0 (P = {})", input.p);
        return Err(CalcError::division_by_zero("denominator"));
    }

    let air_content_pct = 100.0 * (1.0 - (input.w / WATER_DIVISOR) * (numerator / denominator));
    trace!(
        "air content: pTerm={} numerator={} denominator={} result={}",
        p_term,
        numerator,
        denominator,
        air_content_pct
    );

    Ok(AirContentResult {
        p_term,
        numerator,
        denominator,
        air_content_pct,
    })
}
