//! Scatter plot panels

use eda_data::Dataset;
use serde::{Deserialize, Serialize};

use super::utils::levels::Levels;
use crate::figure::{ScatterChart, ScatterSeries};
use crate::PlotError;

/// Marker styling forwarded unchanged to every scatter panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterStyle {
    /// Marker radius in pixels
    pub point_size: u32,
    /// Marker opacity, 0 to 1
    pub alpha: f64,
    pub filled: bool,
    /// Fixed `#rrggbb` colour for unsplit series
    pub color: Option<String>,
}

impl Default for ScatterStyle {
    fn default() -> Self {
        Self {
            point_size: 3,
            alpha: 0.7,
            filled: true,
            color: None,
        }
    }
}

/// Points of `x` against `y`, keeping rows where both are present.
///
/// With a hue, one series per level; rows with a missing hue are dropped.
pub fn scatter_chart(
    dataset: &Dataset,
    x: &str,
    y: &str,
    hue: Option<&Levels>,
    style: &ScatterStyle,
) -> Result<ScatterChart, PlotError> {
    let xs = dataset.numeric_values(x)?;
    let ys = dataset.numeric_values(y)?;

    let point = |row: usize| Some((xs[row]?, ys[row]?));

    let series = match hue {
        Some(levels) => (0..levels.len())
            .map(|level| ScatterSeries {
                label: Some(levels.names[level].clone()),
                points: (0..xs.len())
                    .filter(|&row| levels.row_levels[row] == Some(level))
                    .filter_map(point)
                    .collect(),
            })
            .collect(),
        None => vec![ScatterSeries {
            label: None,
            points: (0..xs.len()).filter_map(point).collect(),
        }],
    };

    Ok(ScatterChart {
        x_column: x.to_string(),
        y_column: y.to_string(),
        series,
        style: style.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use arrow::array::{ArrayRef, Float64Array, StringArray};
    use arrow::record_batch::RecordBatch;

    fn dataset() -> Dataset {
        let batch = RecordBatch::try_from_iter(vec![
            ("a", Arc::new(Float64Array::from(vec![Some(1.0), Some(2.0), None, Some(4.0)])) as ArrayRef),
            ("b", Arc::new(Float64Array::from(vec![10.0, 20.0, 30.0, 40.0])) as ArrayRef),
            ("k", Arc::new(StringArray::from(vec![Some("x"), Some("y"), Some("x"), None])) as ArrayRef),
        ])
        .unwrap();
        Dataset::new("scatter", batch)
    }

    #[test]
    fn incomplete_rows_are_dropped() {
        let chart = scatter_chart(&dataset(), "a", "b", None, &ScatterStyle::default()).unwrap();
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].points, vec![(1.0, 10.0), (2.0, 20.0), (4.0, 40.0)]);
        assert_eq!(chart.x_column, "a");
    }

    #[test]
    fn hue_splits_points_by_level() {
        let ds = dataset();
        let hue = Levels::from_column(&ds, "k").unwrap();
        let chart = scatter_chart(&ds, "a", "b", Some(&hue), &ScatterStyle::default()).unwrap();
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].points, vec![(1.0, 10.0)]);
        assert_eq!(chart.series[1].points, vec![(2.0, 20.0)]);
    }

    #[test]
    fn style_round_trips_through_json_with_defaults() {
        let style: ScatterStyle = serde_json::from_str(r##"{"alpha": 0.3, "color": "#112233"}"##).unwrap();
        assert_eq!(style.alpha, 0.3);
        assert_eq!(style.point_size, 3);
        assert!(style.filled);
        assert_eq!(style.color.as_deref(), Some("#112233"));
    }
}
