//! Exploratory plotting helpers for tabular data
//!
//! Three plotters arrange one chart per column (or per correlated column
//! pair) into an automatically sized grid:
//!
//! - [`plot_distributions`]: histograms for numeric columns, count plots for
//!   categorical and binary columns
//! - [`boxplot_grid`]: one boxplot per numeric column, grouped by a hue column
//! - [`scatterplot_high_corr`]: scatterplots for strongly correlated pairs
//!
//! Each plotter builds [`Figure`] values and hands them to a [`FigureSink`],
//! which displays them (by writing image files, or by keeping them in memory).

pub mod export;
pub mod figure;
pub mod layout;
pub mod plots;
pub mod render;

use eda_data::DataError;
use thiserror::Error;

pub use export::{ExportFormat, FigureSink, FileSink, MemorySink};
pub use figure::{Chart, Figure, Panel};
pub use layout::{prepare_plot_fig, FigureKind, GridLayout};
pub use plots::box_plot::{boxplot_grid, build_boxplot_figure, BoxPlotOptions};
pub use plots::correlation::{
    build_correlation_figure, correlated_pairs, correlation_title, scatterplot_high_corr,
    CorrelatedPair, CorrelationOptions,
};
pub use plots::distribution::{build_distribution_figures, plot_distributions, DistributionOptions};
pub use plots::scatter::ScatterStyle;
pub use render::{figure_pixel_size, render_figure, render_svg, render_to_file, DEFAULT_DPI};

/// Errors raised while planning, building or rendering figures
#[derive(Error, Debug)]
pub enum PlotError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("cannot lay out a grid for zero plots")]
    EmptyGrid,

    #[error("column count must be at least 1")]
    InvalidColumnCount,

    #[error("bin count {0} is outside 1..={max}", max = plots::histogram::MAX_BINS)]
    InvalidBins(usize),

    #[error("correlation threshold {0} is outside [0, 1]")]
    InvalidThreshold(f64),

    #[error("figure '{title}' has {cells} cells, no room for another panel")]
    GridFull { title: String, cells: usize },

    #[error("Rendering error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub(crate) fn render_err<E: std::fmt::Display>(error: E) -> PlotError {
    PlotError::Render(error.to_string())
}
