use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row}, column '{column}': '{value}' is not a number")]
    Parse { row: usize, column: String, value: String },

    #[error("Column '{0}' not found in dataset")]
    MissingColumn(String),

    #[error("Dataset '{0}' has no rows")]
    Empty(String),
}
