//! Statistical utilities for plots

use statrs::statistics::Statistics;

/// Points at which a density curve is evaluated
pub const KDE_GRID_POINTS: usize = 200;

/// Five-number summary plus fliers for one box
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lowest observation within 1.5 IQR below the box
    pub whisker_low: f64,
    /// Highest observation within 1.5 IQR above the box
    pub whisker_high: f64,
    pub mean: f64,
    /// Observations beyond the whiskers
    pub fliers: Vec<f64>,
    pub count: usize,
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Calculate quartiles of sorted values using linear interpolation
pub fn calculate_quartiles(sorted: &[f64]) -> (f64, f64, f64) {
    let n = sorted.len();
    if n == 0 {
        return (0.0, 0.0, 0.0);
    }

    let q1 = interpolate(sorted, (n - 1) as f64 * 0.25);
    let q2 = interpolate(sorted, (n - 1) as f64 * 0.5);
    let q3 = interpolate(sorted, (n - 1) as f64 * 0.75);

    (q1, q2, q3)
}

fn interpolate(sorted: &[f64], idx: f64) -> f64 {
    let lower = idx.floor() as usize;
    let upper = idx.ceil() as usize;

    if lower == upper || upper >= sorted.len() {
        sorted[lower]
    } else {
        let fraction = idx - lower as f64;
        sorted[lower] * (1.0 - fraction) + sorted[upper] * fraction
    }
}

/// Box statistics with whiskers at 1.5 IQR, `None` for no values
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted(values);
    let (q1, median, q3) = calculate_quartiles(&sorted);

    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    let inside = sorted.iter().copied().filter(|v| (lower_fence..=upper_fence).contains(v));
    let (whisker_low, whisker_high) = inside.fold((q1, q3), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let fliers = sorted
        .iter()
        .copied()
        .filter(|&v| v < lower_fence || v > upper_fence)
        .collect();

    Some(BoxStats {
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        mean: values.mean(),
        fliers,
        count: values.len(),
    })
}

/// `bins + 1` equal-width edges spanning the data.
///
/// A degenerate range is widened by 0.5 on either side; no data gives `[0, 1]`.
pub fn bin_edges(values: &[f64], bins: usize) -> Vec<f64> {
    let bins = bins.max(1);
    let (mut min, mut max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if values.is_empty() {
        min = 0.0;
        max = 1.0;
    } else if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    (0..=bins)
        .map(|i| if i == bins { max } else { min + i as f64 * width })
        .collect()
}

/// Count values per bin; the last bin is closed on the right.
/// Values outside the edges are ignored.
pub fn bin_counts(values: &[f64], edges: &[f64]) -> Vec<usize> {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0; bins];
    if bins == 0 {
        return counts;
    }
    let min = edges[0];
    let max = edges[bins];
    let width = (max - min) / bins as f64;

    for &v in values {
        if v < min || v > max {
            continue;
        }
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
}

/// Gaussian kernel density estimate over the data range, scaled by `scale`.
///
/// Uses Scott's rule for the bandwidth. Returns `None` when the values do
/// not spread (fewer than two distinct values).
pub fn kde_curve(values: &[f64], scale: f64) -> Option<Vec<(f64, f64)>> {
    if values.len() < 2 {
        return None;
    }
    let std_dev = values.std_dev();
    if !(std_dev > 0.0) {
        return None;
    }
    let bandwidth = std_dev * (values.len() as f64).powf(-0.2);
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let norm = values.len() as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt();

    let curve = (0..KDE_GRID_POINTS)
        .map(|i| {
            let x = min + (max - min) * i as f64 / (KDE_GRID_POINTS - 1) as f64;
            let density = values
                .iter()
                .map(|&v| {
                    let u = (x - v) / bandwidth;
                    (-0.5 * u * u).exp()
                })
                .sum::<f64>()
                / norm;
            (x, density * scale)
        })
        .collect();
    Some(curve)
}

/// Pearson correlation over rows where both values are present.
///
/// `None` when fewer than two complete rows remain or either side is constant.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip();
    if xs.len() < 2 {
        return None;
    }
    let xs: &[f64] = &xs;
    let ys: &[f64] = &ys;

    let r = xs.covariance(ys) / (xs.std_dev() * ys.std_dev());
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}
