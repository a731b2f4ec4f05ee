//! # Error Types
//!
//! Structured error types for calc_core. Every formula reports failure as
//! data: exactly one `CalcError` per call, from the first validation check
//! that rejects the inputs.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult, ErrorKind};
//!
//! fn inverse(x: f64) -> CalcResult<f64> {
//!     if x == 0.0 {
//!         return Err(CalcError::division_by_zero("x"));
//!     }
//!     Ok(1.0 / x)
//! }
//!
//! let err = inverse(0.0).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::DivisionByZero);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// The three classes of formula failure, without their payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// One or more fields are not finite numbers
    InvalidInput,
    /// A named divisor evaluates to zero
    DivisionByZero,
    /// An operand violates a mathematical precondition (negative radicand, etc.)
    DomainError,
}

/// Structured error type for formula evaluation.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// One or more inputs did not parse to a finite number
    #[error("Invalid input: {} not a finite number", .fields.join(", "))]
    InvalidInput { fields: Vec<String> },

    /// A divisor in the formula is zero
    #[error("Division by zero: '{divisor}' is 0")]
    DivisionByZero { divisor: String },

    /// An operand is outside the formula's domain
    #[error("Domain error for '{field}': {reason}")]
    DomainError { field: String, reason: String },
}

impl CalcError {
    /// Create an InvalidInput error listing the offending fields
    pub fn invalid_input<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CalcError::InvalidInput {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a DivisionByZero error tagged with the divisor's symbol
    pub fn division_by_zero(divisor: impl Into<String>) -> Self {
        CalcError::DivisionByZero {
            divisor: divisor.into(),
        }
    }

    /// Create a DomainError
    pub fn domain_error(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::DomainError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// The payload-free error class
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::InvalidInput { .. } => ErrorKind::InvalidInput,
            CalcError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            CalcError::DomainError { .. } => ErrorKind::DomainError,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::DomainError { .. } => "DOMAIN_ERROR",
        }
    }

    /// The diagnostic shown next to a blanked result.
    ///
    /// Division-by-zero and domain messages are fixed per divisor/field so
    /// the presentation layer can show them verbatim.
    pub fn message(&self) -> String {
        match self {
            CalcError::InvalidInput { .. } => "Check the numbers.".to_string(),
            CalcError::DivisionByZero { divisor } => match divisor.as_str() {
                "C" => "C cannot be 0. (337.5/C)".to_string(),
                "S" => "S cannot be 0. (1350/S)".to_string(),
                "denominator" => "The denominator is 0, cannot calculate.".to_string(),
                "rho" => "ρ cannot be 0. (ρ₀/ρ)".to_string(),
                "t0" => "t₀ cannot be 0. (t/t₀)".to_string(),
                "1-e" => "(1−e) is 0, cannot calculate.".to_string(),
                "a-b" => "a−b is 0, cannot calculate.".to_string(),
                other => format!("{} cannot be 0.", other),
            },
            CalcError::DomainError { reason, .. } => reason.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::domain_error("e0", "e₀ must be greater than 0.");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"DomainError\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::invalid_input(["w"]).error_code(), "INVALID_INPUT");
        assert_eq!(CalcError::division_by_zero("C").error_code(), "DIVISION_BY_ZERO");
        assert_eq!(CalcError::domain_error("e", "x").error_code(), "DOMAIN_ERROR");
    }

    #[test]
    fn test_kind() {
        assert_eq!(CalcError::invalid_input(["a", "b"]).kind(), ErrorKind::InvalidInput);
        assert_eq!(CalcError::division_by_zero("S").kind(), ErrorKind::DivisionByZero);
        assert_eq!(CalcError::domain_error("t", "x").kind(), ErrorKind::DomainError);
    }

    #[test]
    fn test_messages() {
        assert_eq!(CalcError::invalid_input(["w"]).message(), "Check the numbers.");
        assert_eq!(CalcError::division_by_zero("C").message(), "C cannot be 0. (337.5/C)");
        assert_eq!(CalcError::division_by_zero("a-b").message(), "a−b is 0, cannot calculate.");
        assert_eq!(CalcError::domain_error("e", "e must be 0 or more.").message(), "e must be 0 or more.");
    }

    #[test]
    fn test_display_lists_fields() {
        let err = CalcError::invalid_input(["w", "P"]);
        assert_eq!(err.to_string(), "Invalid input: w, P not a finite number");
    }
}
