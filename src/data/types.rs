//! Data layer types

use thiserror::Error;

/// Storage and retrieval errors
#[derive(Debug, Error)]
pub enum DataError {
    /// No stored history for the ticker
    #[error("No data for ticker {0}")]
    NotFound(String),
    /// Column missing or of the wrong type
    #[error("Invalid column: {0}")]
    InvalidColumn(String),
    /// Price text that is not a decimal
    #[error("Invalid decimal in column {column}: {value:?}")]
    InvalidDecimal { column: String, value: String },
    /// Date32 value outside the calendar range
    #[error("Invalid date value: {0}")]
    InvalidDate(i32),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}
