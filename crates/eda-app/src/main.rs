//! Main application entry point

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use eda_data::{CsvSource, Dataset};
use eda_plots::{boxplot_grid, plot_distributions, scatterplot_high_corr, FileSink};

mod cli;
mod config;

use cli::{Cli, Command, Plot};
use config::Settings;

fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .context("Failed to create env filter")?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    run(&cli.command)
}

fn run(command: &Command) -> Result<()> {
    let args = command.args();
    let settings = Settings::resolve(args)?;

    let source = CsvSource::with_options(&args.file, settings.csv.clone())
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let dataset = Dataset::from_source(&source)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    info!(
        name = dataset.name(),
        rows = dataset.num_rows(),
        columns = dataset.column_names().len(),
        "loaded dataset"
    );

    let mut sink = FileSink::new(&settings.out, settings.format).with_dpi(settings.dpi);
    for plot in command.plots() {
        match plot {
            Plot::Distributions => {
                plot_distributions(&dataset, &settings.distribution_options(), &mut sink)
                    .context("Failed to plot distributions")?;
            }
            Plot::Boxplots => {
                boxplot_grid(&dataset, &settings.boxplot_options(), &mut sink)
                    .context("Failed to plot boxplots")?;
            }
            Plot::Correlations => {
                scatterplot_high_corr(&dataset, &settings.correlation_options(), &mut sink)
                    .context("Failed to plot correlated pairs")?;
            }
        }
    }

    info!(figures = sink.written().len(), dir = %sink.dir().display(), "finished");
    Ok(())
}
