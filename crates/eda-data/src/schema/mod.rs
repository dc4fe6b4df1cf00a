//! Column classification
//!
//! Plotters never inspect Arrow types themselves: they receive the ordered
//! column sets computed here once per call.

use arrow::datatypes::DataType;
use tracing::debug;

use crate::{DataError, Dataset};

/// Broad kind of a column as seen by the plotters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Integer or floating point values
    Numeric,
    /// String or dictionary-encoded string values
    Categorical,
    /// Anything else (booleans, temporal, binary, nested); never plotted
    Other,
}

impl ColumnKind {
    pub fn of(data_type: &DataType) -> Self {
        match data_type {
            DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 |
            DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 |
            DataType::Float16 | DataType::Float32 | DataType::Float64 => ColumnKind::Numeric,
            DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => ColumnKind::Categorical,
            DataType::Dictionary(_, value) => match value.as_ref() {
                DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => ColumnKind::Categorical,
                _ => ColumnKind::Other,
            },
            _ => ColumnKind::Other,
        }
    }
}

/// Two disjoint, ordered sets of column names used by the distribution plots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnClassification {
    /// Continuous numeric columns, in schema order
    pub numeric: Vec<String>,
    /// Categorical columns in schema order, followed by promoted binary columns
    pub categorical: Vec<String>,
}

/// Split columns into numeric and categorical sets.
///
/// A numeric column with exactly two unique values (a missing value counts
/// as one) is moved to the end of the categorical set. Columns of any other
/// kind are left out of both sets.
pub fn classify_columns(dataset: &Dataset) -> Result<ColumnClassification, DataError> {
    let mut numeric = Vec::new();
    let mut categorical = Vec::new();
    let mut promoted = Vec::new();

    for name in dataset.column_names() {
        match dataset.column_kind(name)? {
            ColumnKind::Numeric => {
                if dataset.unique_count(name)? == 2 {
                    promoted.push(name.to_string());
                } else {
                    numeric.push(name.to_string());
                }
            }
            ColumnKind::Categorical => categorical.push(name.to_string()),
            ColumnKind::Other => debug!(column = name, "skipping column of unsupported type"),
        }
    }

    categorical.extend(promoted);
    Ok(ColumnClassification { numeric, categorical })
}

/// Numeric columns in schema order, without the `exclude` column if present
pub fn numeric_columns_excluding(dataset: &Dataset, exclude: Option<&str>) -> Result<Vec<String>, DataError> {
    let mut columns = Vec::new();
    for name in dataset.column_names() {
        if Some(name) == exclude {
            continue;
        }
        if dataset.column_kind(name)? == ColumnKind::Numeric {
            columns.push(name.to_string());
        }
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
    use arrow::record_batch::RecordBatch;

    fn dataset() -> Dataset {
        let batch = RecordBatch::try_from_iter(vec![
            ("age", Arc::new(Int64Array::from(vec![30, 41, 52, 63])) as ArrayRef),
            ("gender", Arc::new(Int64Array::from(vec![0, 1, 0, 1])) as ArrayRef),
            ("city", Arc::new(StringArray::from(vec!["a", "b", "c", "a"])) as ArrayRef),
            ("member", Arc::new(BooleanArray::from(vec![true, false, true, true])) as ArrayRef),
            ("income", Arc::new(Float64Array::from(vec![1.0, 2.5, 3.0, 4.0])) as ArrayRef),
            ("churn", Arc::new(Float64Array::from(vec![Some(1.0), None, Some(1.0), None])) as ArrayRef),
        ])
        .unwrap();
        Dataset::new("people", batch)
    }

    #[test]
    fn binary_numeric_columns_are_promoted() {
        let classes = classify_columns(&dataset()).unwrap();
        assert_eq!(classes.numeric, vec!["age", "income"]);
        assert_eq!(classes.categorical, vec!["city", "gender", "churn"]);
    }

    #[test]
    fn sets_are_disjoint_and_skip_other_kinds() {
        let classes = classify_columns(&dataset()).unwrap();
        for name in &classes.numeric {
            assert!(!classes.categorical.contains(name));
        }
        assert!(!classes.numeric.iter().any(|c| c == "member"));
        assert!(!classes.categorical.iter().any(|c| c == "member"));
    }

    #[test]
    fn numeric_selection_ignores_absent_exclusion() {
        let ds = dataset();
        assert_eq!(
            numeric_columns_excluding(&ds, Some("gender")).unwrap(),
            vec!["age", "income", "churn"]
        );
        assert_eq!(
            numeric_columns_excluding(&ds, Some("not_a_column")).unwrap(),
            vec!["age", "gender", "income", "churn"]
        );
    }

    #[test]
    fn kinds_follow_arrow_types() {
        assert_eq!(ColumnKind::of(&DataType::UInt16), ColumnKind::Numeric);
        assert_eq!(ColumnKind::of(&DataType::LargeUtf8), ColumnKind::Categorical);
        assert_eq!(
            ColumnKind::of(&DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8))),
            ColumnKind::Categorical
        );
        assert_eq!(ColumnKind::of(&DataType::Boolean), ColumnKind::Other);
        assert_eq!(ColumnKind::of(&DataType::Date32), ColumnKind::Other);
    }
}
