use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eda_plots::ExportFormat;

#[derive(Parser, Debug)]
#[command(name = "edaplot", about = "Exploratory plots for tabular data", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Histograms for numeric columns and count plots for categorical ones
    Distributions(PlotArgs),
    /// One boxplot per numeric column, grouped by the hue column
    Boxplots(PlotArgs),
    /// Scatterplots for strongly correlated numeric column pairs
    Correlations(PlotArgs),
    /// Every plot above
    All(PlotArgs),
}

/// A kind of figure the tool can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plot {
    Distributions,
    Boxplots,
    Correlations,
}

impl Command {
    pub fn args(&self) -> &PlotArgs {
        match self {
            Command::Distributions(args)
            | Command::Boxplots(args)
            | Command::Correlations(args)
            | Command::All(args) => args,
        }
    }

    pub fn plots(&self) -> &'static [Plot] {
        match self {
            Command::Distributions(_) => &[Plot::Distributions],
            Command::Boxplots(_) => &[Plot::Boxplots],
            Command::Correlations(_) => &[Plot::Correlations],
            Command::All(_) => &[Plot::Distributions, Plot::Boxplots, Plot::Correlations],
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlotArgs {
    /// CSV file to plot
    pub file: PathBuf,

    /// Directory for the image files [default: plots]
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Image format: svg or png [default: svg]
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Column used to split, group or colour the plots
    #[arg(long)]
    pub hue: Option<String>,

    /// Number of grid columns (automatic when omitted)
    #[arg(long = "cols")]
    pub n_cols: Option<usize>,

    /// Histogram bin count [default: 30]
    #[arg(long)]
    pub bins: Option<usize>,

    /// Do not draw density curves over histograms
    #[arg(long)]
    pub no_kde: bool,

    /// Minimum absolute Pearson coefficient for scatterplots [default: 0.5]
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Pixels per inch of the output images [default: 100]
    #[arg(long)]
    pub dpi: Option<u32>,

    /// JSON settings file; flags given here take precedence
    #[arg(long)]
    pub settings: Option<PathBuf>,
}
