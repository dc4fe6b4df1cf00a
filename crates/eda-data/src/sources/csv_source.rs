use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use arrow::array::*;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use super::DataSource;
use crate::config::{CsvOptions, NullConfig};
use crate::DataError;

/// CSV data source for loading CSV files into a single record batch
pub struct CsvSource {
    /// Path to the CSV file
    path: PathBuf,
    /// Schema inferred from every row
    schema: Arc<Schema>,
    /// Row count
    row_count: usize,
    /// Reader options
    options: CsvOptions,
}

impl CsvSource {
    /// Create a new CSV source from a file path with default options
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DataError> {
        Self::with_options(path, CsvOptions::default())
    }

    /// Create a new CSV source, analysing the file to detect its schema
    pub fn with_options(path: impl Into<PathBuf>, options: CsvOptions) -> Result<Self, DataError> {
        let path = path.into();
        let (schema, row_count) = Self::analyze_file(&path, &options)?;
        debug!(path = %path.display(), columns = schema.fields().len(), rows = row_count, "analyzed CSV file");

        Ok(Self {
            path,
            schema: Arc::new(schema),
            row_count,
            options,
        })
    }

    fn reader(path: &Path, options: &CsvOptions) -> Result<csv::Reader<BufReader<File>>, DataError> {
        let file = File::open(path)?;
        Ok(ReaderBuilder::new()
            .has_headers(options.has_headers)
            .delimiter(options.delimiter_byte())
            .flexible(true)
            .from_reader(BufReader::new(file)))
    }

    /// Analyze the CSV file to detect schema and count rows.
    ///
    /// Every record takes part in type inference, so a column is only
    /// numeric when all of its non-null cells parse as numbers.
    fn analyze_file(path: &Path, options: &CsvOptions) -> Result<(Schema, usize), DataError> {
        let mut csv_reader = Self::reader(path, options)?;

        let headers: Option<Vec<String>> = if options.has_headers {
            Some(csv_reader.headers()?.iter().map(str::to_string).collect())
        } else {
            None
        };

        let mut detectors = vec![TypeDetector::default(); headers.as_ref().map_or(0, Vec::len)];
        let mut total_rows = 0;

        for result in csv_reader.records() {
            let record = result?;
            if record.len() > detectors.len() {
                detectors.resize(record.len(), TypeDetector::default());
            }
            for (detector, value) in detectors.iter_mut().zip(record.iter()) {
                if !options.null_config.is_null(value) {
                    detector.observe(value);
                }
            }
            total_rows += 1;
        }

        let names: Vec<String> = match headers {
            Some(headers) => headers,
            None => (1..=detectors.len()).map(|i| format!("column_{i}")).collect(),
        };
        if names.is_empty() {
            return Err(DataError::SchemaDetection(format!("no columns found in {}", path.display())));
        }

        let fields = names.iter().enumerate().map(|(idx, name)| {
            let data_type = match options.column_types.get(name) {
                Some(&forced) => forced.into(),
                None => detectors.get(idx).copied().unwrap_or_default().data_type(),
            };
            Field::new(name, data_type, true)
        }).collect::<Vec<_>>();

        Ok((Schema::new(fields), total_rows))
    }

    /// Read every row and build one arrow array per column
    fn read_all(&self) -> Result<RecordBatch, DataError> {
        let mut csv_reader = Self::reader(&self.path, &self.options)?;
        let mut rows: Vec<StringRecord> = Vec::with_capacity(self.row_count);
        for result in csv_reader.records() {
            rows.push(result?);
        }

        let nulls = &self.options.null_config;
        let columns = self.schema.fields().iter().enumerate().map(|(col_idx, field)| {
            let cells = rows.iter().map(|row| {
                row.get(col_idx).filter(|value| !nulls.is_null(value))
            });
            build_array(field, cells)
        }).collect::<Result<Vec<_>, _>>()?;

        RecordBatch::try_new(self.schema.clone(), columns).map_err(|e| e.into())
    }
}

/// Running type inference for one column
#[derive(Debug, Clone, Copy)]
struct TypeDetector {
    seen: bool,
    is_int: bool,
    is_float: bool,
    is_bool: bool,
}

impl Default for TypeDetector {
    fn default() -> Self {
        Self {
            seen: false,
            is_int: true,
            is_float: true,
            is_bool: true,
        }
    }
}

impl TypeDetector {
    fn observe(&mut self, value: &str) {
        self.seen = true;
        let value = value.trim();

        if self.is_int && value.parse::<i64>().is_err() {
            self.is_int = false;
        }
        if self.is_float && value.parse::<f64>().is_err() {
            self.is_float = false;
        }
        if self.is_bool && !(value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")) {
            self.is_bool = false;
        }
    }

    fn data_type(&self) -> DataType {
        if !self.seen {
            // An all-missing column reads as floating point NaNs
            DataType::Float64
        } else if self.is_int {
            DataType::Int64
        } else if self.is_float {
            DataType::Float64
        } else if self.is_bool {
            DataType::Boolean
        } else {
            DataType::Utf8
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Parse every non-null cell, failing on the first one that does not fit the column type
fn parse_cells<'a, T>(
    field: &Field,
    cells: impl Iterator<Item = Option<&'a str>>,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Vec<Option<T>>, DataError> {
    cells
        .enumerate()
        .map(|(row, cell)| match cell {
            None => Ok(None),
            Some(value) => parse(value).map(Some).ok_or_else(|| {
                DataError::Csv(format!(
                    "row {}: value '{}' in column '{}' is not {}",
                    row + 1,
                    value,
                    field.name(),
                    field.data_type()
                ))
            }),
        })
        .collect()
}

/// Build an arrow array from optional cell values
fn build_array<'a>(field: &Field, cells: impl Iterator<Item = Option<&'a str>>) -> Result<ArrayRef, DataError> {
    Ok(match field.data_type() {
        DataType::Int64 => Arc::new(Int64Array::from(parse_cells(field, cells, |v| v.trim().parse::<i64>().ok())?)),
        DataType::Float64 => Arc::new(Float64Array::from(parse_cells(field, cells, |v| v.trim().parse::<f64>().ok())?)),
        DataType::Boolean => Arc::new(BooleanArray::from(parse_cells(field, cells, parse_bool)?)),
        _ => {
            let array: StringArray = cells.collect();
            Arc::new(array)
        }
    })
}

impl DataSource for CsvSource {
    fn schema(&self) -> Arc<Schema> {
        self.schema.clone()
    }

    fn load(&self) -> Result<RecordBatch, DataError> {
        self.read_all()
    }

    fn row_count(&self) -> usize {
        self.row_count
    }

    fn source_name(&self) -> &str {
        self.path.file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown.csv")
    }
}
