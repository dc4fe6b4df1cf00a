//! CSV loading configuration

use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use arrow::datatypes::DataType;

use super::null_handling::NullConfig;

/// Data type override that can be serialized
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SerializableDataType {
    Boolean,
    Int64,
    Float64,
    Utf8,
}

impl From<SerializableDataType> for DataType {
    fn from(sdt: SerializableDataType) -> Self {
        match sdt {
            SerializableDataType::Boolean => DataType::Boolean,
            SerializableDataType::Int64 => DataType::Int64,
            SerializableDataType::Float64 => DataType::Float64,
            SerializableDataType::Utf8 => DataType::Utf8,
        }
    }
}

/// Options for reading a CSV file into a record batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: char,

    /// Whether the first record holds the column names
    pub has_headers: bool,

    /// Column type overrides, keyed by column name
    pub column_types: HashMap<String, SerializableDataType>,

    /// Null handling configuration
    pub null_config: NullConfig,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_headers: true,
            column_types: HashMap::new(),
            null_config: NullConfig::default(),
        }
    }
}

impl CsvOptions {
    /// Override the inferred type of a column
    pub fn with_column_type(mut self, column: impl Into<String>, data_type: SerializableDataType) -> Self {
        self.column_types.insert(column.into(), data_type);
        self
    }

    /// Delimiter as the single byte the csv reader expects
    pub(crate) fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            b','
        }
    }
}
