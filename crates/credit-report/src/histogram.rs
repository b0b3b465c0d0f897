//! Probability distribution with a smoothed density overlay.

use std::f64::consts::PI;

/// Number of equal-width bins in the distribution chart.
pub const HISTOGRAM_BINS: usize = 10;

/// Half-width added on each side when every value is identical.
const DEGENERATE_RANGE_PAD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
    /// KDE value at the bin centre, scaled to counts.
    pub density: Option<f64>,
}

impl HistogramBin {
    #[must_use]
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }
}

/// Equal-width histogram over `[min, max]`.
///
/// Bins are half-open except the last, which includes `max`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    bins: Vec<HistogramBin>,
    total: usize,
}

impl Histogram {
    /// Bins the finite values; `None` when there are none.
    #[must_use]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let first = *finite.first()?;
        let (mut min, mut max) = finite
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        if min == max {
            min -= DEGENERATE_RANGE_PAD;
            max += DEGENERATE_RANGE_PAD;
        }

        let width = (max - min) / HISTOGRAM_BINS as f64;
        let mut edges: Vec<f64> = (0..=HISTOGRAM_BINS)
            .map(|i| min + width * i as f64)
            .collect();
        edges[HISTOGRAM_BINS] = max;

        let mut counts = [0usize; HISTOGRAM_BINS];
        for &value in &finite {
            counts[bin_index(value, min, width, &edges)] += 1;
        }

        let kde = GaussianKde::fit(&finite);
        let scale = finite.len() as f64 * width;
        let bins = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let lower = edges[i];
                let upper = edges[i + 1];
                let density = kde
                    .as_ref()
                    .map(|kde| kde.evaluate((lower + upper) / 2.0) * scale);
                HistogramBin {
                    lower,
                    upper,
                    count,
                    density,
                }
            })
            .collect();
        Some(Self {
            bins,
            total: finite.len(),
        })
    }

    #[must_use]
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    /// Number of values binned.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn has_density(&self) -> bool {
        self.bins.iter().any(|bin| bin.density.is_some())
    }

    /// Largest bar or density value, used to scale the chart.
    #[must_use]
    pub fn peak(&self) -> f64 {
        self.bins
            .iter()
            .map(|bin| (bin.count as f64).max(bin.density.unwrap_or(0.0)))
            .fold(0.0, f64::max)
    }
}

fn bin_index(value: f64, min: f64, width: f64, edges: &[f64]) -> usize {
    let last = HISTOGRAM_BINS - 1;
    let mut idx = (((value - min) / width).floor().max(0.0) as usize).min(last);
    // Float division can land one bin off near an edge.
    if idx > 0 && value < edges[idx] {
        idx -= 1;
    } else if idx < last && value >= edges[idx + 1] {
        idx += 1;
    }
    idx
}

/// Gaussian kernel density estimate with Scott's bandwidth rule.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// `None` when fewer than two distinct values are given.
    #[must_use]
    pub fn fit(samples: &[f64]) -> Option<Self> {
        let first = *samples.first()?;
        if samples.iter().all(|&v| v == first) {
            return None;
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let variance = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        let bandwidth = variance.sqrt() * n.powf(-0.2);
        Some(Self {
            samples: samples.to_vec(),
            bandwidth,
        })
    }

    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Probability density at `x`.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        let norm = 1.0 / ((2.0 * PI).sqrt() * self.bandwidth * self.samples.len() as f64);
        self.samples
            .iter()
            .map(|sample| {
                let z = (x - sample) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
            * norm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(histogram: &Histogram) -> Vec<usize> {
        histogram.bins().iter().map(|bin| bin.count).collect()
    }

    #[test]
    fn ten_bins_spanning_min_to_max() {
        let histogram = Histogram::from_values(&[0.0, 0.25, 0.5, 1.0]).unwrap();
        assert_eq!(histogram.bins().len(), HISTOGRAM_BINS);
        assert_eq!(histogram.bins()[0].lower, 0.0);
        assert_eq!(histogram.bins()[9].upper, 1.0);
        assert_eq!(counts(&histogram), vec![1, 0, 1, 0, 0, 1, 0, 0, 0, 1]);
    }

    #[test]
    fn max_falls_in_last_bin() {
        let histogram = Histogram::from_values(&[0.2, 0.8, 0.8]).unwrap();
        assert_eq!(histogram.bins()[9].count, 2);
        assert_eq!(histogram.total(), 3);
    }

    #[test]
    fn identical_values_widen_range() {
        let histogram = Histogram::from_values(&[0.5, 0.5]).unwrap();
        assert_eq!(histogram.bins()[0].lower, 0.0);
        assert_eq!(histogram.bins()[9].upper, 1.0);
        assert_eq!(histogram.bins()[5].count, 2);
        assert!(!histogram.has_density());
    }

    #[test]
    fn empty_input_has_no_histogram() {
        assert!(Histogram::from_values(&[]).is_none());
        assert!(Histogram::from_values(&[f64::NAN]).is_none());
    }

    #[test]
    fn kde_uses_scott_bandwidth() {
        let kde = GaussianKde::fit(&[0.2, 0.4]).unwrap();
        let expected = (0.02f64).sqrt() * 2f64.powf(-0.2);
        assert!((kde.bandwidth() - expected).abs() < 1e-12);
    }

    #[test]
    fn kde_is_symmetric_for_symmetric_samples() {
        let histogram = Histogram::from_values(&[0.2, 0.4]).unwrap();
        let first = histogram.bins()[0].density.unwrap();
        let last = histogram.bins()[9].density.unwrap();
        assert!((first - last).abs() < 1e-9);
        assert!(first > 0.0);
    }

    #[test]
    fn kde_integrates_to_one() {
        let kde = GaussianKde::fit(&[0.1, 0.35, 0.6, 0.62, 0.9]).unwrap();
        let step = 0.001;
        let area: f64 = (-2000..3000)
            .map(|i| kde.evaluate(f64::from(i) * step) * step)
            .sum();
        assert!((area - 1.0).abs() < 1e-3);
    }
}
