//! Count plot panels

use eda_data::Dataset;

use super::utils::levels::Levels;
use crate::figure::{CountChart, CountSeries};
use crate::PlotError;

/// Number of rows per category of `column`, split per hue level when given.
///
/// Rows with a missing category (or a missing hue) are not counted.
pub fn count_chart(dataset: &Dataset, column: &str, hue: Option<&Levels>) -> Result<CountChart, PlotError> {
    let categories = Levels::from_column(dataset, column)?;

    let series = match hue {
        Some(levels) => (0..levels.len())
            .map(|level| CountSeries {
                label: Some(levels.names[level].clone()),
                counts: tally(&categories, |row| levels.row_levels[row] == Some(level)),
            })
            .collect(),
        None => vec![CountSeries {
            label: None,
            counts: tally(&categories, |_| true),
        }],
    };

    Ok(CountChart {
        categories: categories.names,
        series,
    })
}

fn tally(categories: &Levels, keep: impl Fn(usize) -> bool) -> Vec<usize> {
    let mut counts = vec![0; categories.len()];
    for (row, level) in categories.row_levels.iter().enumerate() {
        if let Some(level) = level {
            if keep(row) {
                counts[*level] += 1;
            }
        }
    }
    counts
}
