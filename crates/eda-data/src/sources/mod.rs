//! Data sources feeding the plotters

pub mod csv_source;
pub mod batch_source;

pub use csv_source::CsvSource;
pub use batch_source::BatchSource;

use std::sync::Arc;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;

use crate::DataError;

/// Trait for tabular data providers
pub trait DataSource {
    /// Get the schema of this data source
    fn schema(&self) -> Arc<Schema>;

    /// Load every row into a single record batch
    fn load(&self) -> Result<RecordBatch, DataError>;

    /// Get total row count
    fn row_count(&self) -> usize;

    /// Get the source name/path
    fn source_name(&self) -> &str;
}
