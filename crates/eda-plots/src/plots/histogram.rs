//! Histogram panels

use eda_data::Dataset;

use super::utils::levels::Levels;
use super::utils::stats::{bin_counts, bin_edges, kde_curve};
use crate::figure::{HistogramChart, HistogramSeries};
use crate::PlotError;

/// Headroom above the tallest bar
pub const Y_HEADROOM: f64 = 1.05;

/// Largest accepted histogram bin count
pub const MAX_BINS: usize = 10_000;

/// Reject bin counts of zero or above [`MAX_BINS`]
pub fn check_bins(bins: usize) -> Result<(), PlotError> {
    if (1..=MAX_BINS).contains(&bins) {
        Ok(())
    } else {
        Err(PlotError::InvalidBins(bins))
    }
}

/// Histogram of one numeric column.
///
/// Bins span the whole column so every hue level shares the same edges.
/// The density curve, when requested, is scaled to bar counts.
pub fn histogram_chart(
    dataset: &Dataset,
    column: &str,
    bins: usize,
    kde: bool,
    hue: Option<&Levels>,
) -> Result<HistogramChart, PlotError> {
    check_bins(bins)?;
    let values = dataset.numeric_values(column)?;
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let edges = bin_edges(&present, bins);
    let bin_width = edges[1] - edges[0];

    let series_for = |label: Option<String>, data: Vec<f64>| {
        let counts = bin_counts(&data, &edges);
        let density = if kde {
            kde_curve(&data, data.len() as f64 * bin_width)
        } else {
            None
        };
        HistogramSeries { label, counts, density }
    };

    let series: Vec<HistogramSeries> = match hue {
        Some(levels) => levels
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| series_for(Some(name.clone()), levels.select(&values, i)))
            .collect(),
        None => vec![series_for(None, present)],
    };

    let tallest = series
        .iter()
        .flat_map(|s| s.counts.iter().copied())
        .max()
        .unwrap_or(0);
    let y_max = if tallest == 0 { 1.0 } else { tallest as f64 * Y_HEADROOM };

    Ok(HistogramChart { edges, series, y_max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use arrow::array::{ArrayRef, Float64Array, StringArray};
    use arrow::record_batch::RecordBatch;

    fn dataset() -> Dataset {
        let batch = RecordBatch::try_from_iter(vec![
            ("x", Arc::new(Float64Array::from(vec![0.0, 1.0, 1.0, 1.0, 2.0, 3.0, 4.0, f64::NAN])) as ArrayRef),
            ("g", Arc::new(StringArray::from(vec!["a", "a", "b", "b", "b", "a", "a", "b"])) as ArrayRef),
        ])
        .unwrap();
        Dataset::new("hist", batch)
    }

    #[test]
    fn y_limit_is_five_percent_above_tallest_bar() {
        let chart = histogram_chart(&dataset(), "x", 4, false, None).unwrap();
        assert_eq!(chart.edges.len(), 5);
        assert_eq!(chart.series.len(), 1);
        assert_eq!(chart.series[0].counts, vec![1, 3, 1, 2]);
        assert!((chart.y_max - 3.0 * 1.05).abs() < 1e-12);
        assert!(chart.series[0].density.is_none());
    }

    #[test]
    fn hue_levels_share_bin_edges() {
        let ds = dataset();
        let levels = Levels::from_column(&ds, "g").unwrap();
        let chart = histogram_chart(&ds, "x", 4, true, Some(&levels)).unwrap();

        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].label.as_deref(), Some("a"));
        assert_eq!(chart.series[0].counts, vec![1, 1, 0, 2]);
        assert_eq!(chart.series[1].counts, vec![0, 2, 1, 0]);
        assert!((chart.y_max - 2.0 * 1.05).abs() < 1e-12);
        assert!(chart.series.iter().all(|s| s.density.is_some()));
    }

    #[test]
    fn zero_bins_are_rejected() {
        assert!(matches!(
            histogram_chart(&dataset(), "x", 0, false, None),
            Err(PlotError::InvalidBins(0))
        ));
    }

    #[test]
    fn huge_bin_counts_are_rejected() {
        assert!(matches!(
            histogram_chart(&dataset(), "x", usize::MAX, false, None),
            Err(PlotError::InvalidBins(usize::MAX))
        ));
        assert!(check_bins(MAX_BINS).is_ok());
        assert!(check_bins(MAX_BINS + 1).is_err());
    }
}
