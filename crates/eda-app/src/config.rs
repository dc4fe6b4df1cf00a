//! Settings file handling
//!
//! A JSON settings file carries every plotting option plus CSV parsing and
//! scatter styling. Command-line flags override whatever the file sets.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use eda_data::CsvOptions;
use eda_plots::{
    BoxPlotOptions, CorrelationOptions, DistributionOptions, ExportFormat, ScatterStyle, DEFAULT_DPI,
};
use serde::{Deserialize, Serialize};

use crate::cli::PlotArgs;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub out: PathBuf,
    pub format: ExportFormat,
    pub dpi: u32,
    pub hue: Option<String>,
    pub n_cols: Option<usize>,
    pub bins: usize,
    pub kde: bool,
    pub threshold: f64,
    pub csv: CsvOptions,
    pub scatter: ScatterStyle,
}

impl Default for Settings {
    fn default() -> Self {
        let distributions = DistributionOptions::default();
        Self {
            out: PathBuf::from("plots"),
            format: ExportFormat::default(),
            dpi: DEFAULT_DPI,
            hue: None,
            n_cols: None,
            bins: distributions.bins,
            kde: distributions.kde,
            threshold: CorrelationOptions::default().threshold,
            csv: CsvOptions::default(),
            scatter: ScatterStyle::default(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Settings from the file named on the command line (if any), with the
    /// remaining flags applied on top
    pub fn resolve(args: &PlotArgs) -> Result<Self> {
        let mut settings = match &args.settings {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply(args);
        Ok(settings)
    }

    pub fn apply(&mut self, args: &PlotArgs) {
        if let Some(out) = &args.out {
            self.out = out.clone();
        }
        if let Some(format) = args.format {
            self.format = format;
        }
        if let Some(dpi) = args.dpi {
            self.dpi = dpi;
        }
        if let Some(hue) = &args.hue {
            self.hue = Some(hue.clone());
        }
        if let Some(n_cols) = args.n_cols {
            self.n_cols = Some(n_cols);
        }
        if let Some(bins) = args.bins {
            self.bins = bins;
        }
        if args.no_kde {
            self.kde = false;
        }
        if let Some(threshold) = args.threshold {
            self.threshold = threshold;
        }
    }

    pub fn distribution_options(&self) -> DistributionOptions {
        DistributionOptions {
            bins: self.bins,
            kde: self.kde,
            hue: self.hue.clone(),
            n_cols: self.n_cols,
        }
    }

    pub fn boxplot_options(&self) -> BoxPlotOptions {
        BoxPlotOptions {
            hue: self.hue.clone(),
            n_cols: self.n_cols,
        }
    }

    pub fn correlation_options(&self) -> CorrelationOptions {
        CorrelationOptions {
            threshold: self.threshold,
            hue: self.hue.clone(),
            n_cols: self.n_cols,
            style: self.scatter.clone(),
        }
    }
}
