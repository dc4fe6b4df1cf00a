//! Figure model
//!
//! Figures describe what to draw, independent of any backend: the grid, the
//! titles and, for every panel, the computed chart data.

use crate::layout::GridLayout;
use crate::plots::scatter::ScatterStyle;
use crate::plots::utils::stats::BoxStats;
use crate::PlotError;

/// A titled grid of panels
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    /// Bold suptitle size, in points
    pub title_font_size: f64,
    pub layout: GridLayout,
    /// Panels in grid order; cells past the last panel stay empty
    pub panels: Vec<Panel>,
}

impl Figure {
    pub fn new(title: impl Into<String>, layout: GridLayout) -> Self {
        Self {
            title: title.into(),
            title_font_size: layout.title_font_size(),
            layout,
            panels: Vec::with_capacity(layout.items),
        }
    }

    /// Append a panel to the next free cell
    pub fn push_panel(&mut self, title: impl Into<String>, chart: Chart) -> Result<(), PlotError> {
        if self.panels.len() >= self.layout.cells() {
            return Err(PlotError::GridFull {
                title: self.title.clone(),
                cells: self.layout.cells(),
            });
        }
        self.panels.push(Panel {
            title: title.into(),
            title_font_size: self.layout.panel_title_font_size(),
            chart,
        });
        Ok(())
    }

    pub fn panel(&self, title: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.title == title)
    }
}

/// One subplot. Axis labels are always left blank; the title names the data.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub title: String,
    /// Bold title size, in points
    pub title_font_size: f64,
    pub chart: Chart,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Histogram(HistogramChart),
    Count(CountChart),
    Box(BoxChart),
    Scatter(ScatterChart),
}

impl Chart {
    /// Whether the chart is split by a hue column
    pub fn has_hue(&self) -> bool {
        let labels: Vec<Option<&String>> = match self {
            Chart::Histogram(c) => c.series.iter().map(|s| s.label.as_ref()).collect(),
            Chart::Count(c) => c.series.iter().map(|s| s.label.as_ref()).collect(),
            Chart::Box(c) => c.groups.iter().map(|g| g.label.as_ref()).collect(),
            Chart::Scatter(c) => c.series.iter().map(|s| s.label.as_ref()).collect(),
        };
        labels.iter().any(Option::is_some)
    }
}

/// Equal-width histogram, one layered series per hue level
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramChart {
    /// `bins + 1` bin edges
    pub edges: Vec<f64>,
    pub series: Vec<HistogramSeries>,
    /// Upper y-axis limit, 5% above the tallest bar
    pub y_max: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    /// Hue level, `None` when not split
    pub label: Option<String>,
    pub counts: Vec<usize>,
    /// Kernel density estimate scaled to counts
    pub density: Option<Vec<(f64, f64)>>,
}

/// Bar per category, dodged per hue level
#[derive(Debug, Clone, PartialEq)]
pub struct CountChart {
    pub categories: Vec<String>,
    pub series: Vec<CountSeries>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountSeries {
    pub label: Option<String>,
    /// One count per category
    pub counts: Vec<usize>,
}

/// One box per hue level, or a single box
#[derive(Debug, Clone, PartialEq)]
pub struct BoxChart {
    pub groups: Vec<BoxGroup>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxGroup {
    pub label: Option<String>,
    /// `None` when the group has no values
    pub stats: Option<BoxStats>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterChart {
    pub x_column: String,
    pub y_column: String,
    pub series: Vec<ScatterSeries>,
    pub style: ScatterStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_chart() -> Chart {
        Chart::Count(CountChart {
            categories: vec!["a".to_string()],
            series: vec![CountSeries { label: None, counts: vec![1] }],
        })
    }

    #[test]
    fn panels_fill_cells_in_order_until_full() {
        let layout = GridLayout::plan(3, Some(2)).unwrap();
        let mut figure = Figure::new("Test", layout);
        for name in ["a", "b", "c", "d"] {
            figure.push_panel(name, count_chart()).unwrap();
        }
        assert!(matches!(
            figure.push_panel("e", count_chart()),
            Err(PlotError::GridFull { cells: 4, .. })
        ));
        assert_eq!(figure.panels[2].title, "c");
        assert_eq!(figure.panels[2].title_font_size, 10.0);
        assert_eq!(figure.title_font_size, 16.0);
    }

    #[test]
    fn hue_detection_uses_series_labels() {
        assert!(!count_chart().has_hue());
        let split = Chart::Count(CountChart {
            categories: vec!["a".to_string()],
            series: vec![CountSeries { label: Some("x".to_string()), counts: vec![1] }],
        });
        assert!(split.has_hue());
    }
}
