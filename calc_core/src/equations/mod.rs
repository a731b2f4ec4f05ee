//! # Equations
//!
//! Metadata for every formula in [`crate::formulas`], kept in one place so
//! the implemented math can be audited against its reference and a
//! reference document can be generated from source.
//!
//! ## Modules
//!
//! - [`registry`] - Equation metadata and the markdown generator

pub mod registry;

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
