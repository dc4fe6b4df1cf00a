//! Box plot grid for numeric columns

use eda_data::{numeric_columns_excluding, Dataset};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::utils::levels::Levels;
use super::utils::stats::box_stats;
use crate::export::FigureSink;
use crate::figure::{BoxChart, BoxGroup, Chart, Figure};
use crate::layout::{prepare_plot_fig, FigureKind};
use crate::PlotError;

/// Configuration for the box plot grid
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxPlotOptions {
    /// Column to group boxes by; excluded from the plotted columns
    pub hue: Option<String>,

    /// Explicit grid column count
    pub n_cols: Option<usize>,
}

/// Boxes for one numeric column: one per hue level, or a single box
pub fn box_chart(dataset: &Dataset, column: &str, hue: Option<&Levels>) -> Result<BoxChart, PlotError> {
    let values = dataset.numeric_values(column)?;

    let groups = match hue {
        Some(levels) => levels
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| BoxGroup {
                label: Some(name.clone()),
                stats: box_stats(&levels.select(&values, i)),
            })
            .collect(),
        None => {
            let present: Vec<f64> = values.iter().flatten().copied().collect();
            vec![BoxGroup {
                label: None,
                stats: box_stats(&present),
            }]
        }
    };

    Ok(BoxChart { groups })
}

/// Build the box plot figure, or `None` when there is no numeric column to show
pub fn build_boxplot_figure(dataset: &Dataset, options: &BoxPlotOptions) -> Result<Option<Figure>, PlotError> {
    let hue_column = options.hue.as_deref();
    let columns = numeric_columns_excluding(dataset, hue_column)?;
    if columns.is_empty() {
        warn!(dataset = dataset.name(), "no numeric columns to box plot");
        return Ok(None);
    }

    let hue = hue_column
        .map(|column| Levels::from_column(dataset, column))
        .transpose()?;

    let mut figure = prepare_plot_fig(columns.len(), options.n_cols, FigureKind::Numeric, None)?;
    for column in &columns {
        let chart = box_chart(dataset, column, hue.as_ref())?;
        figure.push_panel(column.as_str(), Chart::Box(chart))?;
    }
    Ok(Some(figure))
}

/// Plot one boxplot per numeric column, grouped by the hue column
pub fn boxplot_grid(
    dataset: &Dataset,
    options: &BoxPlotOptions,
    sink: &mut dyn FigureSink,
) -> Result<Option<Figure>, PlotError> {
    let Some(figure) = build_boxplot_figure(dataset, options)? else {
        return Ok(None);
    };
    info!(title = %figure.title, panels = figure.panels.len(), "showing box plot grid");
    sink.show(&figure)?;
    Ok(Some(figure))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
    use arrow::record_batch::RecordBatch;

    fn dataset() -> Dataset {
        let batch = RecordBatch::try_from_iter(vec![
            ("bmi", Arc::new(Float64Array::from(vec![20.0, 25.0, 30.0, 35.0])) as ArrayRef),
            ("group", Arc::new(Int64Array::from(vec![1, 2, 1, 2])) as ArrayRef),
            ("city", Arc::new(StringArray::from(vec!["a", "b", "a", "b"])) as ArrayRef),
        ])
        .unwrap();
        Dataset::new("box", batch)
    }

    #[test]
    fn ungrouped_box_uses_all_values() {
        let chart = box_chart(&dataset(), "bmi", None).unwrap();
        assert_eq!(chart.groups.len(), 1);
        let stats = chart.groups[0].stats.as_ref().unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.median, 27.5);
    }

    #[test]
    fn numeric_hue_column_is_excluded_from_panels() {
        let options = BoxPlotOptions {
            hue: Some("group".to_string()),
            n_cols: None,
        };
        let figure = build_boxplot_figure(&dataset(), &options).unwrap().unwrap();
        let titles: Vec<&str> = figure.panels.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["bmi"]);

        let Chart::Box(chart) = &figure.panels[0].chart else {
            panic!("expected a box chart");
        };
        assert_eq!(chart.groups.len(), 2);
        assert_eq!(chart.groups[0].stats.as_ref().unwrap().count, 2);
    }

    #[test]
    fn categorical_hue_keeps_every_numeric_column() {
        let options = BoxPlotOptions {
            hue: Some("city".to_string()),
            n_cols: Some(1),
        };
        let figure = build_boxplot_figure(&dataset(), &options).unwrap().unwrap();
        assert_eq!(figure.panels.len(), 2);
        assert_eq!((figure.layout.rows, figure.layout.cols), (2, 1));
        assert_eq!(figure.title, "Numerical Columns");
    }

    #[test]
    fn missing_hue_column_is_an_error() {
        let options = BoxPlotOptions {
            hue: Some("nope".to_string()),
            n_cols: None,
        };
        assert!(build_boxplot_figure(&dataset(), &options).is_err());
    }
}
