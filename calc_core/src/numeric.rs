//! # Numeric Parsing & Formatting
//!
//! Permissive text-to-number conversion used at the boundary between form
//! fields and the formulas. Absence of a usable number is represented by
//! `f64::NAN`; downstream code checks `is_finite()` rather than matching
//! on a parse error.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::numeric::{format_result, negate, parse_number};
//!
//! assert_eq!(parse_number(" 1,350.5 "), 1350.5);
//! assert!(parse_number("").is_nan());
//! assert_eq!(format_result(100.0), "100.000000");
//! assert_eq!(negate("abc"), "0");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of digits after the decimal point in every rendered result
pub const RESULT_DECIMALS: usize = 6;

/// Parse user-entered text into a number.
///
/// All `,` grouping characters are removed and surrounding whitespace is
/// trimmed. Empty or non-numeric text yields `NaN`.
pub fn parse_number(text: &str) -> f64 {
    let cleaned: String = text.chars().filter(|&ch| ch != ',').collect();
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

/// Format a result with exactly six decimals.
///
/// Negative zero renders as `0.000000`. Non-finite values render as their
/// literal token: `NaN`, `Infinity`, `-Infinity`.
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        // + 0.0 folds -0.0 into 0.0
        format!("{:.*}", RESULT_DECIMALS, value + 0.0)
    }
}

/// Flip the sign of a field's text.
///
/// Unparseable text becomes `"0"`. Zero stays `"0"` (never `"-0"`).
pub fn negate(text: &str) -> String {
    let value = parse_number(text);
    if value.is_finite() && value != 0.0 {
        (-value).to_string()
    } else {
        "0".to_string()
    }
}

/// Raw field values as typed by the user, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawInput {
    fields: BTreeMap<String, String>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, text: impl Into<String>) -> Self {
        self.set(field, text);
        self
    }

    /// Set (or replace) a field's text
    pub fn set(&mut self, field: impl Into<String>, text: impl Into<String>) {
        self.fields.insert(field.into(), text.into());
    }

    /// Raw text of a field, if present
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Parsed value of a field; a missing field parses as `NaN`
    pub fn number(&self, field: &str) -> f64 {
        self.get(field).map_or(f64::NAN, parse_number)
    }

    /// Iterate over `(field, text)` pairs in field-name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for RawInput
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut raw = RawInput::new();
        for (field, text) in iter {
            raw.set(field, text);
        }
        raw
    }
}

/// Names of the fields whose values are not finite, in the given order.
pub(crate) fn non_finite_fields<'a>(values: &[(&'a str, f64)]) -> Vec<&'a str> {
    values
        .iter()
        .filter(|(_, v)| !v.is_finite())
        .map(|(name, _)| *name)
        .collect()
}
