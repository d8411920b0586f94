use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("Calculation error: Division by zero encountered in '{0}'")]
    DivisionByZero(String),

    #[error("Series lengths differ: expected {expected} values, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Error in calculation: {0}")]
    Calculation(String),
}
