//! Scatter plots of strongly correlated column pairs

use eda_data::{numeric_columns_excluding, Dataset};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::scatter::{scatter_chart, ScatterStyle};
use super::utils::levels::Levels;
use super::utils::stats::pearson;
use crate::export::FigureSink;
use crate::figure::{Chart, Figure};
use crate::layout::{prepare_plot_fig, FigureKind};
use crate::PlotError;

/// Configuration for correlated-pair scatter plots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationOptions {
    /// Minimum absolute Pearson coefficient, exclusive
    pub threshold: f64,
    /// Column used to colour points; excluded from the pairs
    pub hue: Option<String>,
    pub n_cols: Option<usize>,
    pub style: ScatterStyle,
}

impl Default for CorrelationOptions {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            hue: None,
            n_cols: None,
            style: ScatterStyle::default(),
        }
    }
}

/// Two columns and their Pearson coefficient
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelatedPair {
    pub x: String,
    pub y: String,
    pub coefficient: f64,
}

impl CorrelatedPair {
    /// Panel title, e.g. `AGE vs INCOME (0.60)`
    pub fn title(&self) -> String {
        format!("{} vs {} ({:.2})", self.x.to_uppercase(), self.y.to_uppercase(), self.coefficient)
    }
}

/// Every pair of numeric columns (other than `hue`) whose absolute
/// correlation is strictly above `threshold`.
///
/// Columns are visited in schema order and each column is compared only
/// with the columns after it, so pairs come out in a stable order with no
/// duplicates and no self-pairs.
pub fn correlated_pairs(
    dataset: &Dataset,
    threshold: f64,
    hue: Option<&str>,
) -> Result<Vec<CorrelatedPair>, PlotError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(PlotError::InvalidThreshold(threshold));
    }

    let columns = numeric_columns_excluding(dataset, hue)?;
    let values = columns
        .iter()
        .map(|column| dataset.numeric_values(column))
        .collect::<Result<Vec<_>, _>>()?;

    let pairs: Vec<CorrelatedPair> = (0..columns.len())
        .tuple_combinations()
        .filter_map(|(i, j)| {
            let coefficient = pearson(&values[i], &values[j])?;
            (coefficient.abs() > threshold).then(|| CorrelatedPair {
                x: columns[i].clone(),
                y: columns[j].clone(),
                coefficient,
            })
        })
        .collect();

    debug!(columns = columns.len(), pairs = pairs.len(), threshold, "selected correlated pairs");
    Ok(pairs)
}

/// Figure title naming the threshold, formatted like `0.5` or `1.0`
pub fn correlation_title(threshold: f64) -> String {
    let threshold = if threshold.fract() == 0.0 {
        format!("{threshold:.1}")
    } else {
        threshold.to_string()
    };
    format!("Highly Correlated Columns (Pearson > {threshold})")
}

/// Build the scatter figure, or `None` when no pair passes the threshold
pub fn build_correlation_figure(
    dataset: &Dataset,
    options: &CorrelationOptions,
) -> Result<Option<Figure>, PlotError> {
    let hue_column = options.hue.as_deref();
    let pairs = correlated_pairs(dataset, options.threshold, hue_column)?;
    if pairs.is_empty() {
        info!(threshold = options.threshold, "no column pairs above the correlation threshold");
        return Ok(None);
    }

    let hue = hue_column
        .map(|column| Levels::from_column(dataset, column))
        .transpose()?;

    let title = correlation_title(options.threshold);
    let mut figure = prepare_plot_fig(pairs.len(), options.n_cols, FigureKind::Numeric, Some(&title))?;
    for pair in &pairs {
        let chart = scatter_chart(dataset, &pair.x, &pair.y, hue.as_ref(), &options.style)?;
        figure.push_panel(pair.title(), Chart::Scatter(chart))?;
    }
    Ok(Some(figure))
}

/// Plot a scatterplot for every strongly correlated pair of numeric columns
pub fn scatterplot_high_corr(
    dataset: &Dataset,
    options: &CorrelationOptions,
    sink: &mut dyn FigureSink,
) -> Result<Option<Figure>, PlotError> {
    let Some(figure) = build_correlation_figure(dataset, options)? else {
        return Ok(None);
    };
    info!(title = %figure.title, panels = figure.panels.len(), "showing correlation figure");
    sink.show(&figure)?;
    Ok(Some(figure))
}
