//! # Equation Registry
//!
//! Central registry of every formula the engine evaluates. Each equation has
//! metadata including its reference, plain-text formula, variable
//! definitions and the function that implements it.
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::equations::registry::Equation;
//!
//! let meta = Equation::SpecificSurface.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! ```

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Source of a formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum CodeReference {
    /// ASTM standard test method
    Astm {
        designation: &'static str,
        title: &'static str,
    },
    /// In-house laboratory procedure (no published reference)
    Laboratory,
}

impl CodeReference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            CodeReference::Astm { designation, title } => format!("ASTM {} ({})", designation, title),
            CodeReference::Laboratory => "Laboratory procedure".to_string(),
        }
    }
}

const ASTM_C204: CodeReference = CodeReference::Astm {
    designation: "C204",
    title: "Fineness of Hydraulic Cement by Air-Permeability Apparatus",
};

const ASTM_C563: CodeReference = CodeReference::Astm {
    designation: "C563",
    title: "Approximation of Optimum SO3 in Hydraulic Cement",
};

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for grouping equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Mortar air content
    AirContent,
    /// Specific surface area (fineness)
    Fineness,
    /// Sulfate dosage
    SulfateDosage,
    /// Pass/retest classification
    Judgement,
}

impl EquationCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::AirContent => "Air Content",
            EquationCategory::Fineness => "Specific Surface Area",
            EquationCategory::SulfateDosage => "Anhydrous Sulfate Dosage",
            EquationCategory::Judgement => "Judgement",
        }
    }

    /// Sort order in the reference document (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::AirContent => 1,
            EquationCategory::Fineness => 2,
            EquationCategory::SulfateDosage => 3,
            EquationCategory::Judgement => 4,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "w", "ρ₀")
    pub symbol: &'static str,
    pub description: &'static str,
    /// Units; "-" for dimensionless
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    /// Preconditions checked before evaluation, in order
    pub preconditions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the implementation lives
    pub source_module: &'static str,
    /// Function implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations evaluated by calc_core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// pTerm = 337.5 · P · 0.01
    AirContentAdmixtureTerm,
    /// air = 100 · (1 − (w/400) · num/den)
    AirContent,
    /// T = √(t/t₀)
    FlowTimeFactor,
    /// S = S₀ · (ρ₀/ρ) · T · termA · termB
    SpecificSurface,
    /// a = cs2 − cs1, b = cs3 − cs2
    StrengthDifferences,
    /// G = (a/(a−b)) · c + d + c/2
    SulfateDosage,
    /// Retest / Acceptable from (a, b)
    SulfateJudgement,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::AirContentAdmixtureTerm => EquationMetadata {
                name: "Admixture Term",
                description: "Contribution of the admixture percentage to the batch volume terms",
                formula_plain: "pTerm = 337.5 * P * 0.01",
                reference: CodeReference::Laboratory,
                variables: vec![
                    Variable::new("P", "Admixture percentage", "%"),
                    Variable::new("337.5", "Cement mass per batch", "g"),
                ],
                preconditions: vec!["P finite"],
                category: EquationCategory::AirContent,
                source_module: "formulas/air_content.rs",
                source_function: "AirContentInput::p_term",
            },

            Equation::AirContent => EquationMetadata {
                name: "Air Content",
                description: "Estimated air content of the mortar from water quantity and specific gravities",
                formula_plain: "air = 100 * (1 - (w/400) * ((337.5/C + 1350/S + pTerm) / (337.5 + 1350 + pTerm)))",
                reference: CodeReference::Laboratory,
                variables: vec![
                    Variable::new("w", "Water quantity", "-"),
                    Variable::new("C", "Specific gravity of cement", "-"),
                    Variable::new("S", "Specific gravity of sand", "-"),
                    Variable::new("pTerm", "Admixture term", "-"),
                    Variable::new("1350", "Standard sand mass per batch", "g"),
                ],
                preconditions: vec![
                    "w, C, S, P finite",
                    "C != 0",
                    "S != 0",
                    "337.5 + 1350 + pTerm != 0",
                ],
                category: EquationCategory::AirContent,
                source_module: "formulas/air_content.rs",
                source_function: "calculate",
            },

            Equation::FlowTimeFactor => EquationMetadata {
                name: "Flow Time Factor",
                description: "Square root of the ratio of test to reference air-flow times",
                formula_plain: "T = sqrt(t/t0)",
                reference: ASTM_C204,
                variables: vec![
                    Variable::new("t", "Flow time of the test sample", "s"),
                    Variable::new("t0", "Flow time of the reference sample", "s"),
                ],
                preconditions: vec!["t0 != 0", "t/t0 >= 0"],
                category: EquationCategory::Fineness,
                source_module: "formulas/specific_surface.rs",
                source_function: "calculate",
            },

            Equation::SpecificSurface => EquationMetadata {
                name: "Specific Surface Area",
                description: "Fineness of the test sample relative to the reference sample",
                formula_plain: "S = S0 * (rho0/rho) * T * ((1-e0)/sqrt(e0^3)) * (sqrt(e^3)/(1-e))",
                reference: ASTM_C204,
                variables: vec![
                    Variable::new("S0", "Specific surface of the reference sample", "cm^2/g"),
                    Variable::new("rho0", "Density of the reference sample", "g/cm^3"),
                    Variable::new("rho", "Density of the test sample", "g/cm^3"),
                    Variable::new("e0", "Porosity of the reference bed", "-"),
                    Variable::new("e", "Porosity of the test bed", "-"),
                    Variable::new("T", "Flow time factor", "-"),
                ],
                preconditions: vec![
                    "S0, rho0, rho, e0, e, t, t0 finite",
                    "rho != 0",
                    "t0 != 0",
                    "t/t0 >= 0",
                    "e0 > 0",
                    "e >= 0",
                    "1 - e != 0",
                ],
                category: EquationCategory::Fineness,
                source_module: "formulas/specific_surface.rs",
                source_function: "calculate",
            },

            Equation::StrengthDifferences => EquationMetadata {
                name: "Strength Differences",
                description: "Successive differences of the three strength readings",
                formula_plain: "a = cs2 - cs1, b = cs3 - cs2",
                reference: ASTM_C563,
                variables: vec![
                    Variable::new("cs1", "First strength reading", "MPa"),
                    Variable::new("cs2", "Second strength reading", "MPa"),
                    Variable::new("cs3", "Third strength reading", "MPa"),
                ],
                preconditions: vec!["both operands finite, otherwise the difference is NaN"],
                category: EquationCategory::SulfateDosage,
                source_module: "formulas/sulfate.rs",
                source_function: "difference",
            },

            Equation::SulfateDosage => EquationMetadata {
                name: "Anhydrous Sulfate Dosage",
                description: "Optimum SO3 estimate from the strength differences",
                formula_plain: "G = (a/(a-b)) * c + d + c/2, c = so3/100",
                reference: ASTM_C563,
                variables: vec![
                    Variable::new("a", "cs2 - cs1", "MPa"),
                    Variable::new("b", "cs3 - cs2", "MPa"),
                    Variable::new("so3", "SO3 step between readings", "%"),
                    Variable::new("d", "Offset", "%"),
                ],
                preconditions: vec!["a, b, so3, d finite", "a - b != 0"],
                category: EquationCategory::SulfateDosage,
                source_module: "formulas/sulfate.rs",
                source_function: "dosage",
            },

            Equation::SulfateJudgement => EquationMetadata {
                name: "Retest Judgement",
                description: "Classifies the strength differences as Retest or Acceptable",
                formula_plain: "Retest if (a<0 and b>0) or (b!=0 and a>0 and b>0 and a/b<2.0) or (b!=0 and a<0 and b<0 and a/b>0.5)",
                reference: ASTM_C563,
                variables: vec![
                    Variable::new("a", "cs2 - cs1", "MPa"),
                    Variable::new("b", "cs3 - cs2", "MPa"),
                ],
                preconditions: vec!["a, b finite", "b = 0 skips the ratio rules"],
                category: EquationCategory::Judgement,
                source_module: "formulas/sulfate.rs",
                source_function: "judge",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories, sorted
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![Judgement, SulfateDosage, Fineness, AirContent];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::AirContentAdmixtureTerm,
    Equation::AirContent,
    Equation::FlowTimeFactor,
    Equation::SpecificSurface,
    Equation::StrengthDifferences,
    Equation::SulfateDosage,
    Equation::SulfateJudgement,
];

// ============================================================================
// Markdown Generation
// ============================================================================

/// Generate the equations reference document.
///
/// ```rust
/// use calc_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Cemcalc Equations Reference"));
/// assert!(markdown.contains("Specific Surface Area"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(
        r#"# Cemcalc Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `calc_cli equations --output EQUATIONS.md`

Every formula the calculator evaluates, with its preconditions in the order
they are checked. The first failing precondition is the one reported.

---

"#,
    );

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.preconditions.is_empty() {
                output.push_str("**Preconditions:**\n");
                for (i, pre) in meta.preconditions.iter().enumerate() {
                    output.push_str(&format!("{}. {}\n", i + 1, pre));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

// ============================================================================
// Tests
// ============================================================================
