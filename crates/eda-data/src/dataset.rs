//! Read-only view over a loaded table

use ahash::AHashSet;
use arrow::array::{Array, ArrayRef, Float64Array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use ordered_float::OrderedFloat;

use crate::schema::ColumnKind;
use crate::sources::DataSource;
use crate::DataError;

/// A named table of typed columns.
///
/// The plotters only ever read from a dataset: column names in schema order,
/// column kinds, numeric values and display labels.
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    batch: RecordBatch,
}

impl Dataset {
    pub fn new(name: impl Into<String>, batch: RecordBatch) -> Self {
        Self {
            name: name.into(),
            batch,
        }
    }

    /// Load every row of a data source
    pub fn from_source(source: &dyn DataSource) -> Result<Self, DataError> {
        Ok(Self::new(source.source_name(), source.load()?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    /// Column names in schema order
    pub fn column_names(&self) -> Vec<&str> {
        self.batch
            .schema_ref()
            .fields()
            .iter()
            .map(|f| f.name().as_str())
            .collect()
    }

    fn column(&self, name: &str) -> Result<&ArrayRef, DataError> {
        self.batch
            .column_by_name(name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    pub fn data_type(&self, name: &str) -> Result<&DataType, DataError> {
        Ok(self.column(name)?.data_type())
    }

    pub fn column_kind(&self, name: &str) -> Result<ColumnKind, DataError> {
        Ok(ColumnKind::of(self.data_type(name)?))
    }

    /// Values of a numeric column as `f64`, with nulls and NaNs as `None`
    pub fn numeric_values(&self, name: &str) -> Result<Vec<Option<f64>>, DataError> {
        let column = self.column(name)?;
        if ColumnKind::of(column.data_type()) != ColumnKind::Numeric {
            return Err(DataError::ColumnType {
                column: name.to_string(),
                expected: "numeric",
                found: column.data_type().to_string(),
            });
        }

        let floats = cast(column, &DataType::Float64)?;
        let floats = floats
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| DataError::ColumnType {
                column: name.to_string(),
                expected: "Float64 after cast",
                found: floats.data_type().to_string(),
            })?;

        Ok(floats
            .iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    /// Display label of every row, `None` for nulls
    pub fn labels(&self, name: &str) -> Result<Vec<Option<String>>, DataError> {
        let column = self.column(name)?;
        (0..column.len())
            .map(|i| {
                if column.is_null(i) {
                    Ok(None)
                } else {
                    array_value_to_string(column, i).map(Some).map_err(DataError::from)
                }
            })
            .collect()
    }

    /// Number of unique values, a missing value counting as one value
    pub fn unique_count(&self, name: &str) -> Result<usize, DataError> {
        if self.column_kind(name)? == ColumnKind::Numeric {
            let values = self.numeric_values(name)?;
            let has_missing = values.iter().any(Option::is_none);
            let distinct: AHashSet<OrderedFloat<f64>> =
                values.into_iter().flatten().map(OrderedFloat).collect();
            Ok(distinct.len() + usize::from(has_missing))
        } else {
            let distinct: AHashSet<Option<String>> = self.labels(name)?.into_iter().collect();
            Ok(distinct.len())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use arrow::array::{Int64Array, StringArray};

    fn sample() -> Dataset {
        let batch = RecordBatch::try_from_iter(vec![
            ("age", Arc::new(Int64Array::from(vec![Some(30), None, Some(41)])) as ArrayRef),
            ("score", Arc::new(Float64Array::from(vec![1.0, f64::NAN, 1.0])) as ArrayRef),
            ("city", Arc::new(StringArray::from(vec![Some("Oslo"), Some("Rome"), None])) as ArrayRef),
        ])
        .unwrap();
        Dataset::new("sample", batch)
    }

    #[test]
    fn numeric_values_cast_and_drop_nan() {
        let ds = sample();
        assert_eq!(ds.numeric_values("age").unwrap(), vec![Some(30.0), None, Some(41.0)]);
        assert_eq!(ds.numeric_values("score").unwrap(), vec![Some(1.0), None, Some(1.0)]);
    }

    #[test]
    fn numeric_values_rejects_strings() {
        let err = sample().numeric_values("city").unwrap_err();
        assert!(matches!(err, DataError::ColumnType { .. }));
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        match sample().labels("nope") {
            Err(DataError::MissingColumn(name)) => assert_eq!(name, "nope"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn unique_count_counts_missing_once() {
        let ds = sample();
        assert_eq!(ds.unique_count("age").unwrap(), 3);
        assert_eq!(ds.unique_count("score").unwrap(), 2);
        assert_eq!(ds.unique_count("city").unwrap(), 3);
    }

    #[test]
    fn labels_keep_row_order() {
        let ds = sample();
        assert_eq!(
            ds.labels("city").unwrap(),
            vec![Some("Oslo".to_string()), Some("Rome".to_string()), None]
        );
        assert_eq!(ds.column_names(), vec!["age", "score", "city"]);
    }
}
