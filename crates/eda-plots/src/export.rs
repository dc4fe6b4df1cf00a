//! Figure display: writing image files or collecting figures in memory

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::figure::Figure;
use crate::render::{render_to_file, DEFAULT_DPI};
use crate::PlotError;

/// Export format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Svg,
    Png,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "png" => Ok(ExportFormat::Png),
            other => Err(format!("unknown export format '{other}', expected svg or png")),
        }
    }
}

/// Where plotters send finished figures
pub trait FigureSink {
    fn show(&mut self, figure: &Figure) -> Result<(), PlotError>;
}

/// Writes every figure to `NN-<title>.<ext>` inside a directory
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    format: ExportFormat,
    dpi: u32,
    written: Vec<PathBuf>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>, format: ExportFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
            dpi: DEFAULT_DPI,
            written: Vec::new(),
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi.max(1);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in order
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn next_path(&self, title: &str) -> PathBuf {
        let name = format!("{:02}-{}.{}", self.written.len() + 1, slug(title), self.format.extension());
        self.dir.join(name)
    }
}

impl FigureSink for FileSink {
    fn show(&mut self, figure: &Figure) -> Result<(), PlotError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.next_path(&figure.title);
        render_to_file(figure, &path, self.format, self.dpi)?;
        info!(path = %path.display(), "wrote figure");
        self.written.push(path);
        Ok(())
    }
}

/// Keeps shown figures, in order
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub figures: Vec<Figure>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FigureSink for MemorySink {
    fn show(&mut self, figure: &Figure) -> Result<(), PlotError> {
        self.figures.push(figure.clone());
        Ok(())
    }
}

/// Lowercase file-name stem: runs of anything but ASCII letters and digits become `-`
fn slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        "figure".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Chart, CountChart, CountSeries};
    use crate::layout::{prepare_plot_fig, FigureKind};

    #[test]
    fn slugs_are_file_name_safe() {
        assert_eq!(slug("Categorical & Binary Columns"), "categorical-binary-columns");
        assert_eq!(slug("Highly Correlated Columns (Pearson > 0.5)"), "highly-correlated-columns-pearson-0-5");
        assert_eq!(slug("!!!"), "figure");
    }

    #[test]
    fn formats_parse_case_insensitively() {
        assert_eq!("PNG".parse::<ExportFormat>(), Ok(ExportFormat::Png));
        assert_eq!("svg".parse::<ExportFormat>(), Ok(ExportFormat::Svg));
        assert!("pdf".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::default().extension(), "svg");
    }

    #[test]
    fn file_names_are_numbered() {
        let sink = FileSink::new("out", ExportFormat::Png);
        assert_eq!(sink.next_path("Numerical Columns"), Path::new("out").join("01-numerical-columns.png"));
    }

    #[test]
    fn png_files_are_written_with_titles() {
        let dir = tempfile::tempdir().unwrap();
        let mut figure = prepare_plot_fig(1, None, FigureKind::Categorical, None).unwrap();
        figure
            .push_panel(
                "smoker",
                Chart::Count(CountChart {
                    categories: vec!["no".to_string(), "yes".to_string()],
                    series: vec![CountSeries { label: None, counts: vec![4, 2] }],
                }),
            )
            .unwrap();

        let mut sink = FileSink::new(dir.path(), ExportFormat::Png).with_dpi(40);
        sink.show(&figure).unwrap();
        sink.show(&figure).unwrap();

        assert_eq!(sink.written().len(), 2);
        assert!(sink.written()[1].ends_with("02-categorical-binary-columns.png"));
        let bytes = fs::read(&sink.written()[0]).unwrap();
        assert!(bytes.starts_with(b"\x89PNG"));
    }
}
