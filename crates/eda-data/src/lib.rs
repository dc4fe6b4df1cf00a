//! Tabular data handling for the EDA plotting helpers
//!
//! This crate loads tables into Arrow record batches and exposes the
//! read-only [`Dataset`] view the plotters work against, together with the
//! explicit column classification step.

pub mod config;
pub mod dataset;
pub mod schema;
pub mod sources;

use arrow::error::ArrowError;
use thiserror::Error;

// Re-exports
pub use config::{CsvOptions, NullConfig, SerializableDataType};
pub use dataset::Dataset;
pub use schema::{classify_columns, numeric_columns_excluding, ColumnClassification, ColumnKind};
pub use sources::{BatchSource, CsvSource, DataSource};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Arrow error: {0}")]
    Arrow(ArrowError),

    #[error("CSV parsing error: {0}")]
    Csv(String),

    #[error("Schema detection error: {0}")]
    SchemaDetection(String),

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Column '{column}' is {found}, expected {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        found: String,
    },
}

impl From<csv::Error> for DataError {
    fn from(error: csv::Error) -> Self {
        match error.kind() {
            csv::ErrorKind::Io(io_err) => DataError::Io(std::io::Error::new(io_err.kind(), error.to_string())),
            _ => DataError::Csv(error.to_string()),
        }
    }
}

impl From<ArrowError> for DataError {
    fn from(error: ArrowError) -> Self {
        DataError::Arrow(error)
    }
}
