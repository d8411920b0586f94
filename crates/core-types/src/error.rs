use thiserror::Error;

/// Everything that can go wrong while evaluating a formula.
///
/// Evaluations are pure, so none of these are transient: the caller fixes the
/// input and evaluates again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormulaError {
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Dimension mismatch in {context}: expected {expected} values, found {found}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Missing input '{name}' for concept '{concept}'")]
    MissingInput { concept: String, name: String },

    #[error("Unknown value '{value}' for '{name}'")]
    UnknownLabel { name: String, value: String },
}
