//! # calc_core - Cement Test Formula Engine
//!
//! `calc_core` is the computational heart of Cemcalc: three independent
//! laboratory formulas (mortar air content, specific surface area,
//! anhydrous sulfate dosage) with input validation and structured results.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Validated once**: Raw form text is parsed into typed inputs at the boundary
//! - **Errors as data**: Every failure is a `CalcError`, first failing check wins
//! - **JSON-First**: Inputs, results and errors implement Serialize
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::formulas::{evaluate, FormulaKind};
//! use calc_core::numeric::RawInput;
//!
//! let raw = RawInput::new()
//!     .with("S0", "1").with("rho0", "1").with("rho", "1")
//!     .with("e0", "0.5").with("e", "0.5").with("t", "1").with("t0", "1");
//!
//! let eval = evaluate(FormulaKind::SpecificSurface, &raw);
//! assert_eq!(eval.result_text(), "1.000000");
//! ```
//!
//! ## Modules
//!
//! - [`formulas`] - The three formulas and the dispatcher
//! - [`numeric`] - Text parsing, result formatting, sign flipping
//! - [`equations`] - Equation metadata and reference generation
//! - [`errors`] - Structured error types

pub mod equations;
pub mod errors;
pub mod formulas;
pub mod numeric;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult, ErrorKind};
pub use formulas::{evaluate, Evaluation, FormulaKind, Judgement};
pub use numeric::{format_result, negate, parse_number, RawInput};
