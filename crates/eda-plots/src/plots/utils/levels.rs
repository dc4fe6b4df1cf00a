//! Distinct levels of a grouping column

use eda_data::{ColumnKind, DataError, Dataset};
use indexmap::IndexMap;
use itertools::Itertools;
use ordered_float::OrderedFloat;

/// Distinct non-null values of a column and the level of every row.
///
/// Numeric columns are ordered by value, anything else by first appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct Levels {
    pub names: Vec<String>,
    /// Level index per row, `None` for missing values
    pub row_levels: Vec<Option<usize>>,
}

impl Levels {
    pub fn from_column(dataset: &Dataset, column: &str) -> Result<Self, DataError> {
        let labels = dataset.labels(column)?;

        if dataset.column_kind(column)? == ColumnKind::Numeric {
            let values = dataset.numeric_values(column)?;
            let ordered: Vec<(OrderedFloat<f64>, &String)> = values
                .iter()
                .zip(&labels)
                .filter_map(|(v, l)| Some((OrderedFloat((*v)?), l.as_ref()?)))
                .sorted_by_key(|(v, _)| *v)
                .dedup_by(|a, b| a.0 == b.0)
                .collect();

            let names: Vec<String> = ordered.iter().map(|(_, l)| (*l).clone()).collect();
            let row_levels = values
                .iter()
                .map(|v| {
                    let v = OrderedFloat((*v)?);
                    ordered.binary_search_by_key(&v, |(k, _)| *k).ok()
                })
                .collect();
            return Ok(Self { names, row_levels });
        }

        let mut index: IndexMap<&str, usize> = IndexMap::new();
        let row_levels = labels
            .iter()
            .map(|label| {
                let label = label.as_deref()?;
                let next = index.len();
                Some(*index.entry(label).or_insert(next))
            })
            .collect();
        let names = index.keys().map(|k| k.to_string()).collect();
        Ok(Self { names, row_levels })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Present values of `values` whose row belongs to `level`
    pub fn select(&self, values: &[Option<f64>], level: usize) -> Vec<f64> {
        values
            .iter()
            .zip(&self.row_levels)
            .filter_map(|(v, l)| if *l == Some(level) { *v } else { None })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use arrow::array::{ArrayRef, Float64Array, StringArray};
    use arrow::record_batch::RecordBatch;

    fn dataset() -> Dataset {
        let batch = RecordBatch::try_from_iter(vec![
            ("grade", Arc::new(Float64Array::from(vec![Some(3.0), Some(1.0), None, Some(3.0), Some(2.0)])) as ArrayRef),
            ("city", Arc::new(StringArray::from(vec![Some("rome"), Some("oslo"), Some("rome"), None, Some("kyiv")])) as ArrayRef),
        ])
        .unwrap();
        Dataset::new("levels", batch)
    }

    #[test]
    fn numeric_levels_are_sorted_by_value() {
        let levels = Levels::from_column(&dataset(), "grade").unwrap();
        assert_eq!(levels.len(), 3);
        assert!(levels.names[0].starts_with('1'));
        assert!(levels.names[2].starts_with('3'));
        assert_eq!(levels.row_levels, vec![Some(2), Some(0), None, Some(2), Some(1)]);
    }

    #[test]
    fn string_levels_keep_first_appearance() {
        let levels = Levels::from_column(&dataset(), "city").unwrap();
        assert_eq!(levels.names, vec!["rome", "oslo", "kyiv"]);
        assert_eq!(levels.row_levels, vec![Some(0), Some(1), Some(0), None, Some(2)]);
    }

    #[test]
    fn select_filters_by_level_and_presence() {
        let ds = dataset();
        let levels = Levels::from_column(&ds, "city").unwrap();
        let grades = ds.numeric_values("grade").unwrap();
        assert_eq!(levels.select(&grades, 0), vec![3.0]);
        assert_eq!(levels.select(&grades, 2), vec![2.0]);
    }
}
