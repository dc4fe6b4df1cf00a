use std::sync::Arc;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;

use super::DataSource;
use crate::DataError;

/// In-memory data source over an existing record batch
#[derive(Debug, Clone)]
pub struct BatchSource {
    name: String,
    batch: RecordBatch,
}

impl BatchSource {
    pub fn new(name: impl Into<String>, batch: RecordBatch) -> Self {
        Self {
            name: name.into(),
            batch,
        }
    }
}

impl DataSource for BatchSource {
    fn schema(&self) -> Arc<Schema> {
        self.batch.schema()
    }

    fn load(&self) -> Result<RecordBatch, DataError> {
        Ok(self.batch.clone())
    }

    fn row_count(&self) -> usize {
        self.batch.num_rows()
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
