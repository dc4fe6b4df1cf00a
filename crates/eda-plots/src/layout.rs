//! Subplot grid planning

use tracing::debug;

use crate::figure::Figure;
use crate::PlotError;

/// Column count used when the caller does not pick one
pub const MAX_AUTO_COLUMNS: usize = 5;

/// Figure size per grid cell, in inches
pub const CELL_SIZE_INCHES: f64 = 3.0;

/// What a figure shows; picks the default suptitle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FigureKind {
    Numeric,
    Categorical,
}

impl FigureKind {
    pub fn default_title(self) -> &'static str {
        match self {
            FigureKind::Numeric => "Numerical Columns",
            FigureKind::Categorical => "Categorical & Binary Columns",
        }
    }
}

/// A rows x columns arrangement able to hold `items` plots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub items: usize,
}

impl GridLayout {
    /// Plan a grid for `items` plots.
    ///
    /// Without an explicit column count the grid uses
    /// `min(5, ceil(sqrt(items)))` columns; rows are always
    /// `ceil(items / cols)`.
    pub fn plan(items: usize, n_cols: Option<usize>) -> Result<Self, PlotError> {
        if items == 0 {
            return Err(PlotError::EmptyGrid);
        }
        let cols = match n_cols {
            Some(0) => return Err(PlotError::InvalidColumnCount),
            Some(cols) => cols,
            None => ceil_sqrt(items).min(MAX_AUTO_COLUMNS),
        };
        let rows = items.div_ceil(cols);

        debug!(items, rows, cols, "planned grid");
        Ok(Self { rows, cols, items })
    }

    pub fn cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Trailing cells left blank after the last plot
    pub fn empty_cells(&self) -> usize {
        self.cells() - self.items
    }

    /// Row and column of the `index`-th cell, filled row by row
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Figure width and height in inches
    pub fn figure_size(&self) -> (f64, f64) {
        (self.cols as f64 * CELL_SIZE_INCHES, self.rows as f64 * CELL_SIZE_INCHES)
    }

    /// Suptitle font size in points
    pub fn title_font_size(&self) -> f64 {
        (self.cols * 4).max(16) as f64
    }

    /// Panel title font size in points
    pub fn panel_title_font_size(&self) -> f64 {
        (self.cols * 2).max(10) as f64
    }
}

/// Smallest `c` with `c * c >= n`
fn ceil_sqrt(n: usize) -> usize {
    let mut c = (n as f64).sqrt() as usize;
    while c * c < n {
        c += 1;
    }
    while c > 1 && (c - 1) * (c - 1) >= n {
        c -= 1;
    }
    c
}

/// Plan a grid for `items` plots and create the empty, titled figure.
///
/// Without a title the figure is named after `kind`.
pub fn prepare_plot_fig(
    items: usize,
    n_cols: Option<usize>,
    kind: FigureKind,
    title: Option<&str>,
) -> Result<Figure, PlotError> {
    let layout = GridLayout::plan(items, n_cols)?;
    let title = title.unwrap_or_else(|| kind.default_title());
    Ok(Figure::new(title, layout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_columns_follow_square_root_capped_at_five() {
        for items in 1..=200 {
            let grid = GridLayout::plan(items, None).unwrap();
            let expected_cols = ((items as f64).sqrt().ceil() as usize).min(5);
            assert_eq!(grid.cols, expected_cols, "items = {items}");
            assert_eq!(grid.rows, (items + grid.cols - 1) / grid.cols, "items = {items}");
            assert!(grid.cells() >= items);
            assert!(grid.empty_cells() < grid.cols);
        }
    }

    #[test]
    fn explicit_columns_only_change_rows() {
        for items in 1..=50 {
            for cols in 1..=8 {
                let grid = GridLayout::plan(items, Some(cols)).unwrap();
                assert_eq!(grid.cols, cols);
                assert_eq!(grid.rows, (items + cols - 1) / cols);
            }
        }
    }

    #[test]
    fn seven_items_use_a_three_by_three_grid() {
        let grid = GridLayout::plan(7, None).unwrap();
        assert_eq!((grid.rows, grid.cols), (3, 3));
        assert_eq!(grid.empty_cells(), 2);
        assert_eq!(grid.position(6), (2, 0));
    }

    #[test]
    fn single_item_is_still_a_sequence_of_cells() {
        let grid = GridLayout::plan(1, None).unwrap();
        assert_eq!((grid.rows, grid.cols, grid.cells()), (1, 1, 1));
        assert_eq!(grid.position(0), (0, 0));
    }

    #[test]
    fn sizes_and_fonts_scale_with_columns() {
        let grid = GridLayout::plan(12, None).unwrap();
        assert_eq!((grid.rows, grid.cols), (3, 4));
        assert_eq!(grid.figure_size(), (12.0, 9.0));
        assert_eq!(grid.title_font_size(), 16.0);
        assert_eq!(grid.panel_title_font_size(), 10.0);

        let wide = GridLayout::plan(3, Some(6)).unwrap();
        assert_eq!(wide.title_font_size(), 24.0);
        assert_eq!(wide.panel_title_font_size(), 12.0);
    }

    #[test]
    fn empty_grid_and_zero_columns_are_rejected() {
        assert!(matches!(GridLayout::plan(0, None), Err(PlotError::EmptyGrid)));
        assert!(matches!(GridLayout::plan(3, Some(0)), Err(PlotError::InvalidColumnCount)));
    }

    #[test]
    fn prepared_figures_get_default_titles() {
        let numeric = prepare_plot_fig(4, None, FigureKind::Numeric, None).unwrap();
        assert_eq!(numeric.title, "Numerical Columns");
        let categorical = prepare_plot_fig(4, None, FigureKind::Categorical, None).unwrap();
        assert_eq!(categorical.title, "Categorical & Binary Columns");
        let custom = prepare_plot_fig(4, Some(2), FigureKind::Numeric, Some("Mine")).unwrap();
        assert_eq!(custom.title, "Mine");
        assert_eq!(custom.layout.rows, 2);
        assert!(custom.panels.is_empty());
    }
}
