//! Drawing figures with plotters

use std::ops::Range;
use std::path::Path;

use plotters::coord::{CoordTranslate, Shift};
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use tracing::debug;

use crate::export::ExportFormat;
use crate::figure::{BoxChart, Chart, CountChart, Figure, HistogramChart, Panel, ScatterChart};
use crate::plots::utils::colors::{base_color, categorical_color, parse_hex};
use crate::{render_err, PlotError};

/// Pixels per inch used when none is configured
pub const DEFAULT_DPI: u32 = 100;

/// Tick label size, in points
const TICK_FONT_POINTS: f64 = 8.0;

/// Half the width of a box or a group of dodged bars, in category units
const BAND_HALF_WIDTH: f64 = 0.4;

fn points_to_pixels(points: f64, dpi: u32) -> u32 {
    (points * dpi as f64 / 72.0).round().max(1.0) as u32
}

fn font(pixels: u32, style: FontStyle) -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, pixels as f64, style)
}

/// Canvas size of a figure in pixels
pub fn figure_pixel_size(figure: &Figure, dpi: u32) -> (u32, u32) {
    let (width, height) = figure.layout.figure_size();
    let dpi = dpi as f64;
    ((width * dpi).round() as u32, (height * dpi).round() as u32)
}

/// Draw a figure onto `root`: bold suptitle, then one panel per grid cell
/// in row-major order. Cells past the last panel stay blank.
pub fn render_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    dpi: u32,
) -> Result<(), PlotError> {
    root.fill(&WHITE).map_err(render_err)?;

    let title_size = points_to_pixels(figure.title_font_size, dpi);
    let body = root
        .titled(&figure.title, font(title_size, FontStyle::Bold))
        .map_err(render_err)?;

    let layout = figure.layout;
    debug!(title = %figure.title, panels = figure.panels.len(), blank = layout.empty_cells(), "rendering figure");
    let cells = body.split_evenly((layout.rows, layout.cols));
    for (index, panel) in figure.panels.iter().enumerate() {
        let (row, col) = layout.position(index);
        let cell = cells.get(row * layout.cols + col).ok_or_else(|| PlotError::GridFull {
            title: figure.title.clone(),
            cells: layout.cells(),
        })?;
        draw_panel(cell, panel, dpi)?;
    }
    Ok(())
}

fn draw_panel<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, panel: &Panel, dpi: u32) -> Result<(), PlotError> {
    let caption_size = points_to_pixels(panel.title_font_size, dpi);
    let tick_size = points_to_pixels(TICK_FONT_POINTS, dpi);

    let mut builder = ChartBuilder::on(area);
    builder
        .caption(&panel.title, font(caption_size, FontStyle::Bold))
        .margin(tick_size)
        .x_label_area_size(tick_size * 3)
        .y_label_area_size(tick_size * 4);

    match &panel.chart {
        Chart::Histogram(chart) => draw_histogram(&mut builder, chart, tick_size),
        Chart::Count(chart) => draw_counts(&mut builder, chart, tick_size),
        Chart::Box(chart) => draw_boxes(&mut builder, chart, tick_size),
        Chart::Scatter(chart) => draw_scatter(&mut builder, chart, tick_size),
    }
}

fn series_color(index: usize, split: bool) -> RGBColor {
    if split {
        categorical_color(index)
    } else {
        base_color()
    }
}

/// Range covering `[min, max]` with 5% padding on both sides
fn padded(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if min == max {
        return (min - 0.5)..(max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}

/// Category axis spanning one unit per category, centred on 0, 1, 2, ...
///
/// Asking plotters for `count` labels over this range puts them on the
/// whole numbers, which `category_label` maps back to names.
fn category_axis(count: usize) -> (Range<f64>, usize) {
    let count = count.max(1);
    (-0.5..count as f64 - 0.5, count)
}

fn category_label(names: &[String], x: f64) -> String {
    let index = x.round();
    if index < 0.0 || (x - index).abs() > 1e-6 {
        return String::new();
    }
    names.get(index as usize).cloned().unwrap_or_default()
}

fn draw_legend<'a, DB: DrawingBackend + 'a, CT: CoordTranslate>(
    chart: &mut ChartContext<'a, DB, CT>,
    tick_size: u32,
) -> Result<(), PlotError> {
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .label_font(font(tick_size, FontStyle::Normal))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)
}

fn draw_histogram<DB: DrawingBackend>(
    builder: &mut ChartBuilder<'_, '_, DB>,
    hist: &HistogramChart,
    tick_size: u32,
) -> Result<(), PlotError> {
    let first = hist.edges.first().copied().unwrap_or(0.0);
    let last = hist.edges.last().copied().unwrap_or(1.0);
    let mut chart = builder
        .build_cartesian_2d(first..last, 0.0..hist.y_max)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_labels(5)
        .y_labels(5)
        .label_style(font(tick_size, FontStyle::Normal))
        .draw()
        .map_err(render_err)?;

    let split = hist.series.iter().any(|s| s.label.is_some());
    let alpha = if split { 0.45 } else { 0.75 };

    for (i, series) in hist.series.iter().enumerate() {
        let color = series_color(i, split);
        let bars = series
            .counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(bin, &count)| {
                Rectangle::new(
                    [(hist.edges[bin], 0.0), (hist.edges[bin + 1], count as f64)],
                    color.mix(alpha).filled(),
                )
            });
        let drawn = chart.draw_series(bars).map_err(render_err)?;
        if let Some(label) = &series.label {
            drawn
                .label(label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 10, y + 4)], color.filled()));
        }

        if let Some(curve) = &series.density {
            chart
                .draw_series(LineSeries::new(curve.iter().copied(), color.stroke_width(2)))
                .map_err(render_err)?;
        }
    }

    if split {
        draw_legend(&mut chart, tick_size)?;
    }
    Ok(())
}

fn draw_counts<DB: DrawingBackend>(
    builder: &mut ChartBuilder<'_, '_, DB>,
    counts: &CountChart,
    tick_size: u32,
) -> Result<(), PlotError> {
    let tallest = counts
        .series
        .iter()
        .flat_map(|s| s.counts.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1);
    let (x_range, labels) = category_axis(counts.categories.len());
    let mut chart = builder
        .build_cartesian_2d(x_range, 0.0..tallest as f64)
        .map_err(render_err)?;

    let formatter = |x: &f64| category_label(&counts.categories, *x);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels)
        .y_labels(5)
        .x_label_formatter(&formatter)
        .label_style(font(tick_size, FontStyle::Normal))
        .draw()
        .map_err(render_err)?;

    let split = counts.series.iter().any(|s| s.label.is_some());
    let width = 2.0 * BAND_HALF_WIDTH / counts.series.len().max(1) as f64;

    for (i, series) in counts.series.iter().enumerate() {
        let color = series_color(i, split);
        let offset = -BAND_HALF_WIDTH + i as f64 * width;
        let bars = series.counts.iter().enumerate().map(|(category, &count)| {
            let left = category as f64 + offset;
            Rectangle::new([(left, 0.0), (left + width, count as f64)], color.mix(0.85).filled())
        });
        let drawn = chart.draw_series(bars).map_err(render_err)?;
        if let Some(label) = &series.label {
            drawn
                .label(label.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 4), (x + 10, y + 4)], color.filled()));
        }
    }

    if split {
        draw_legend(&mut chart, tick_size)?;
    }
    Ok(())
}

fn draw_boxes<DB: DrawingBackend>(
    builder: &mut ChartBuilder<'_, '_, DB>,
    boxes: &BoxChart,
    tick_size: u32,
) -> Result<(), PlotError> {
    let y_range = padded(boxes.groups.iter().flat_map(|g| {
        g.stats
            .iter()
            .flat_map(|s| [s.whisker_low, s.whisker_high].into_iter().chain(s.fliers.iter().copied()))
    }));
    let names: Vec<String> = boxes
        .groups
        .iter()
        .map(|g| g.label.clone().unwrap_or_default())
        .collect();
    let (x_range, labels) = category_axis(names.len());
    let mut chart = builder
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_err)?;

    let formatter = |x: &f64| category_label(&names, *x);
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels)
        .y_labels(5)
        .x_label_formatter(&formatter)
        .label_style(font(tick_size, FontStyle::Normal))
        .draw()
        .map_err(render_err)?;

    let split = boxes.groups.iter().any(|g| g.label.is_some());
    let half = BAND_HALF_WIDTH * 0.75;

    for (i, group) in boxes.groups.iter().enumerate() {
        let Some(stats) = &group.stats else {
            continue;
        };
        let x = i as f64;
        let color = series_color(i, split);
        let outline = BLACK.stroke_width(1);

        chart
            .draw_series([
                Rectangle::new([(x - half, stats.q1), (x + half, stats.q3)], color.mix(0.8).filled()),
                Rectangle::new([(x - half, stats.q1), (x + half, stats.q3)], outline),
            ])
            .map_err(render_err)?;
        chart
            .draw_series([
                PathElement::new(vec![(x - half, stats.median), (x + half, stats.median)], BLACK.stroke_width(2)),
                PathElement::new(vec![(x, stats.whisker_low), (x, stats.q1)], outline),
                PathElement::new(vec![(x, stats.q3), (x, stats.whisker_high)], outline),
                PathElement::new(vec![(x - half / 2.0, stats.whisker_low), (x + half / 2.0, stats.whisker_low)], outline),
                PathElement::new(vec![(x - half / 2.0, stats.whisker_high), (x + half / 2.0, stats.whisker_high)], outline),
            ])
            .map_err(render_err)?;
        chart
            .draw_series(stats.fliers.iter().map(|&v| Circle::new((x, v), 2, outline)))
            .map_err(render_err)?;
    }
    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(
    builder: &mut ChartBuilder<'_, '_, DB>,
    scatter: &ScatterChart,
    tick_size: u32,
) -> Result<(), PlotError> {
    let points = || scatter.series.iter().flat_map(|s| s.points.iter().copied());
    let x_range = padded(points().map(|(x, _)| x));
    let y_range = padded(points().map(|(_, y)| y));
    let mut chart = builder.build_cartesian_2d(x_range, y_range).map_err(render_err)?;
    chart
        .configure_mesh()
        .x_labels(5)
        .y_labels(5)
        .label_style(font(tick_size, FontStyle::Normal))
        .draw()
        .map_err(render_err)?;

    let style = &scatter.style;
    let split = scatter.series.iter().any(|s| s.label.is_some());
    let fixed = style.color.as_deref().and_then(parse_hex);
    let alpha = style.alpha.clamp(0.0, 1.0);

    for (i, series) in scatter.series.iter().enumerate() {
        let color = match fixed {
            Some(color) if !split => color,
            _ => series_color(i, split),
        };
        let marker = if style.filled {
            color.mix(alpha).filled()
        } else {
            color.mix(alpha).stroke_width(1)
        };
        let drawn = chart
            .draw_series(series.points.iter().map(|&p| Circle::new(p, style.point_size, marker)))
            .map_err(render_err)?;
        if let Some(label) = &series.label {
            drawn
                .label(label.as_str())
                .legend(move |(x, y)| Circle::new((x + 5, y), 4, color.filled()));
        }
    }

    if split {
        draw_legend(&mut chart, tick_size)?;
    }
    Ok(())
}

/// Render a figure to an SVG document
pub fn render_svg(figure: &Figure, dpi: u32) -> Result<String, PlotError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, figure_pixel_size(figure, dpi)).into_drawing_area();
        render_figure(&root, figure, dpi)?;
        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

/// Render a figure into an image file of the given format
pub fn render_to_file(figure: &Figure, path: &Path, format: ExportFormat, dpi: u32) -> Result<(), PlotError> {
    let size = figure_pixel_size(figure, dpi);
    match format {
        ExportFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            render_figure(&root, figure, dpi)?;
            root.present().map_err(render_err)
        }
        ExportFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            render_figure(&root, figure, dpi)?;
            root.present().map_err(render_err)
        }
    }
}
