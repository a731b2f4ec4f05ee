//! # Specific Surface Area
//!
//! Fineness estimate from an air-permeability comparison against a
//! reference sample: density ratio, flow-time scaling and porosity terms.
//!
//! ## Formula
//!
//! ```text
//! T = √(t/t₀)
//! S = S₀ · (ρ₀/ρ) · T · ((1 − e₀)/√(e₀³)) · (√(e³)/(1 − e))
//! ```
//!
//! ## Validation Order
//!
//! 1. all seven inputs finite
//! 2. ρ ≠ 0
//! 3. t₀ ≠ 0
//! 4. t/t₀ ≥ 0
//! 5. e₀ > 0
//! 6. e ≥ 0
//! 7. 1 − e ≠ 0
//!
//! ## Example
//!
//! ```rust
//! use calc_core::formulas::specific_surface::{calculate, SpecificSurfaceInput};
//!
//! let input = SpecificSurfaceInput {
//!     s0: 1.0, rho0: 1.0, rho: 1.0, e0: 0.5, e: 0.5, t: 1.0, t0: 1.0,
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.specific_surface - 1.0).abs() < 1e-9);
//! ```

use log::{debug, trace};
use serde::Serialize;

use crate::errors::{CalcError, CalcResult};
use crate::numeric::{non_finite_fields, RawInput};

/// Input parameters for the specific-surface-area estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpecificSurfaceInput {
    /// Specific surface of the reference sample
    #[serde(rename = "S0")]
    pub s0: f64,
    /// Density of the reference sample
    pub rho0: f64,
    /// Density of the test sample
    pub rho: f64,
    /// Porosity of the reference bed
    pub e0: f64,
    /// Porosity of the test bed
    pub e: f64,
    /// Flow time of the test sample
    pub t: f64,
    /// Flow time of the reference sample
    pub t0: f64,
}

impl SpecificSurfaceInput {
    pub const FIELDS: [&'static str; 7] = ["S0", "rho0", "rho", "e0", "e", "t", "t0"];

    /// Build from raw form text. Missing or malformed fields become `NaN`.
    pub fn from_raw(raw: &RawInput) -> Self {
        Self {
            s0: raw.number("S0"),
            rho0: raw.number("rho0"),
            rho: raw.number("rho"),
            e0: raw.number("e0"),
            e: raw.number("e"),
            t: raw.number("t"),
            t0: raw.number("t0"),
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        let bad = non_finite_fields(&[
            ("S0", self.s0),
            ("rho0", self.rho0),
            ("rho", self.rho),
            ("e0", self.e0),
            ("e", self.e),
            ("t", self.t),
            ("t0", self.t0),
        ]);
        if !bad.is_empty() {
            return Err(CalcError::invalid_input(bad));
        }
        if self.rho == 0.0 {
            return Err(CalcError::division_by_zero("rho"));
        }
        if self.t0 == 0.0 {
            return Err(CalcError::division_by_zero("t0"));
        }
        if self.t / self.t0 < 0.0 {
            return Err(CalcError::domain_error(
                "t/t0",
                "T = √(t/t₀), so t/t₀ must be 0 or more.",
            ));
        }
        if self.e0 <= 0.0 {
            return Err(CalcError::domain_error(
                "e0",
                "e₀ must be greater than 0. (√(e₀³) denominator)",
            ));
        }
        if self.e < 0.0 {
            return Err(CalcError::domain_error("e", "e must be 0 or more. (√(e³))"));
        }
        if 1.0 - self.e == 0.0 {
            return Err(CalcError::division_by_zero("1-e"));
        }
        Ok(())
    }
}

/// Results of the specific-surface-area estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpecificSurfaceResult {
    /// T = √(t/t₀)
    pub t_factor: f64,
    /// (1 − e₀)/√(e₀³)
    pub term_a: f64,
    /// √(e³)/(1 − e)
    pub term_b: f64,
    /// S
    pub specific_surface: f64,
}

/// Calculate the specific surface area.
pub fn calculate(input: &SpecificSurfaceInput) -> CalcResult<SpecificSurfaceResult> {
    if let Err(e) = input.validate() {
        debug!("specific surface rejected: {}", e);
        return Err(e);
    }

    let t_factor = (input.t / input.t0).sqrt();
    let term_a = (1.0 - input.e0) / input.e0.powi(3).sqrt();
    let term_b = input.e.powi(3).sqrt() / (1.0 - input.e);
    let specific_surface = input.s0 * (input.rho0 / input.rho) * t_factor * term_a * term_b;
    trace!(
        "specific surface: T={} termA={} termB={} S={}",
        t_factor,
        term_a,
        term_b,
        specific_surface
    );

    Ok(SpecificSurfaceResult {
        t_factor,
        term_a,
        term_b,
        specific_surface,
    })
}
