// Descriptive statistics over one metric sample
//
// Degenerate inputs degrade to zeros: an empty sample yields an all-zero
// summary, a single observation yields zero variance. Variance uses the
// n-1 (sample) denominator; skewness and kurtosis are the population
// standardized third/fourth moments, so a normal sample has kurtosis near
// 3 (not 0).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Summary statistics of one sample of metric values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub n: usize,
    pub mean: f64,
    /// Linear-interpolated median
    pub median: f64,
    /// First value (in input order) reaching the maximum frequency
    pub mode: f64,
    /// Sample variance (n - 1 denominator)
    pub variance: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// 25th percentile, linear interpolation
    pub q1: f64,
    /// 75th percentile, linear interpolation
    pub q3: f64,
    pub iqr: f64,
    /// Third standardized moment (population)
    pub skewness: f64,
    /// Fourth standardized moment (population); ~3 for normal data
    pub kurtosis: f64,
}

impl DescriptiveStats {
    /// Summarize a sample; empty input yields an all-zero summary
    pub fn from_sample(sample: &[f64]) -> Self {
        let n = sample.len();
        if n == 0 {
            return Self::zero();
        }

        let n_f = n as f64;
        let mean = sample.iter().sum::<f64>() / n_f;

        let mut sorted = sample.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let median = percentile_of_sorted(&sorted, 0.5);
        let q1 = percentile_of_sorted(&sorted, 0.25);
        let q3 = percentile_of_sorted(&sorted, 0.75);

        let variance = if n > 1 {
            sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n_f - 1.0)
        } else {
            0.0
        };

        // Population central moments for the standardized shape measures
        let m2 = sample.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n_f;
        let (skewness, kurtosis) = if m2 > 0.0 {
            let m3 = sample.iter().map(|x| (x - mean).powi(3)).sum::<f64>() / n_f;
            let m4 = sample.iter().map(|x| (x - mean).powi(4)).sum::<f64>() / n_f;
            (m3 / m2.powf(1.5), m4 / (m2 * m2))
        } else {
            (0.0, 0.0)
        };

        Self {
            n,
            mean,
            median,
            mode: mode_of(sample),
            variance,
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[n - 1],
            q1,
            q3,
            iqr: q3 - q1,
            skewness,
            kurtosis,
        }
    }

    fn zero() -> Self {
        Self {
            n: 0,
            mean: 0.0,
            median: 0.0,
            mode: 0.0,
            variance: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
            q1: 0.0,
            q3: 0.0,
            iqr: 0.0,
            skewness: 0.0,
            kurtosis: 0.0,
        }
    }
}

/// First value (in input order) with the maximum occurrence count
fn mode_of(sample: &[f64]) -> f64 {
    let mut counts: HashMap<u64, usize> = HashMap::with_capacity(sample.len());
    for value in sample {
        *counts.entry(value.to_bits()).or_insert(0) += 1;
    }
    let max_count = counts.values().copied().max().unwrap_or(0);
    sample
        .iter()
        .copied()
        .find(|v| counts[&v.to_bits()] == max_count)
        .unwrap_or(0.0)
}

/// Linear-interpolated quantile of an ascending-sorted slice
pub(crate) fn percentile_of_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let index = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let weight = index - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}
