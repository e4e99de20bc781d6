use thiserror::Error;

/// Schema-level problems with an input table. Any of these aborts startup.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': '{value}' is not a valid {expected}")]
    InvalidCell {
        row: usize,
        column: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("column '{column}' has unsupported type {data_type}")]
    UnsupportedColumnType {
        column: &'static str,
        data_type: String,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}
