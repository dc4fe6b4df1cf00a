//! Distribution plots: histograms for numeric columns, count plots for the rest

use eda_data::{classify_columns, Dataset};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::count::count_chart;
use super::histogram::{check_bins, histogram_chart};
use super::utils::levels::Levels;
use crate::export::FigureSink;
use crate::figure::{Chart, Figure};
use crate::layout::{prepare_plot_fig, FigureKind};
use crate::PlotError;

/// Configuration for distribution plots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionOptions {
    /// Histogram bin count
    pub bins: usize,
    /// Overlay a kernel density estimate on histograms
    pub kde: bool,
    /// Column to split every other column by
    pub hue: Option<String>,
    /// Explicit grid column count
    pub n_cols: Option<usize>,
}

impl Default for DistributionOptions {
    fn default() -> Self {
        Self {
            bins: 30,
            kde: true,
            hue: None,
            n_cols: None,
        }
    }
}

/// Build the numeric figure and the categorical figure, in that order.
///
/// A group with no columns produces no figure. A column is never split by
/// itself: when it is the hue column its panel has a single series.
pub fn build_distribution_figures(
    dataset: &Dataset,
    options: &DistributionOptions,
) -> Result<Vec<Figure>, PlotError> {
    let mut figures = Vec::with_capacity(2);
    for_each_distribution_figure(dataset, options, |figure| {
        figures.push(figure);
        Ok(())
    })?;
    Ok(figures)
}

/// Plot the distribution of every numeric, categorical and binary column.
///
/// Each non-empty group is shown as its own figure as soon as it is built.
pub fn plot_distributions(
    dataset: &Dataset,
    options: &DistributionOptions,
    sink: &mut dyn FigureSink,
) -> Result<Vec<Figure>, PlotError> {
    let mut figures = Vec::with_capacity(2);
    for_each_distribution_figure(dataset, options, |figure| {
        info!(title = %figure.title, panels = figure.panels.len(), "showing distribution figure");
        sink.show(&figure)?;
        figures.push(figure);
        Ok(())
    })?;
    Ok(figures)
}

fn for_each_distribution_figure(
    dataset: &Dataset,
    options: &DistributionOptions,
    mut emit: impl FnMut(Figure) -> Result<(), PlotError>,
) -> Result<(), PlotError> {
    check_bins(options.bins)?;
    let classes = classify_columns(dataset)?;
    let hue_column = options.hue.as_deref();
    let hue = hue_column
        .map(|column| Levels::from_column(dataset, column))
        .transpose()?;

    if classes.numeric.is_empty() {
        warn!(dataset = dataset.name(), "no numeric columns to plot");
    } else {
        let mut figure = prepare_plot_fig(classes.numeric.len(), options.n_cols, FigureKind::Numeric, None)?;
        for column in &classes.numeric {
            let hue = split_by(hue.as_ref(), hue_column, column);
            let chart = histogram_chart(dataset, column, options.bins, options.kde, hue)?;
            figure.push_panel(column.as_str(), Chart::Histogram(chart))?;
        }
        emit(figure)?;
    }

    if classes.categorical.is_empty() {
        warn!(dataset = dataset.name(), "no categorical or binary columns to plot");
    } else {
        let mut figure = prepare_plot_fig(
            classes.categorical.len(),
            options.n_cols,
            FigureKind::Categorical,
            None,
        )?;
        for column in &classes.categorical {
            let chart = count_chart(dataset, column, split_by(hue.as_ref(), hue_column, column))?;
            figure.push_panel(column.as_str(), Chart::Count(chart))?;
        }
        emit(figure)?;
    }

    Ok(())
}

fn split_by<'a>(hue: Option<&'a Levels>, hue_column: Option<&str>, column: &str) -> Option<&'a Levels> {
    hue.filter(|_| hue_column != Some(column))
}
