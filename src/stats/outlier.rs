// IQR-rule outlier detection with the standard 1.5x fences

use super::descriptive::percentile_of_sorted;
use serde::{Deserialize, Serialize};

/// One observation outside the IQR fences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    /// Index of the observation in the original sample
    pub index: usize,
    pub value: f64,
}

/// Detect outliers with the 1.5x IQR rule
///
/// Fences: [q1 - 1.5 IQR, q3 + 1.5 IQR]. Samples shorter than 4 cannot
/// support quartiles and yield no outliers.
pub fn detect_outliers(sample: &[f64]) -> Vec<Outlier> {
    if sample.len() < 4 {
        return Vec::new();
    }

    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let q1 = percentile_of_sorted(&sorted, 0.25);
    let q3 = percentile_of_sorted(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower_fence = q1 - 1.5 * iqr;
    let upper_fence = q3 + 1.5 * iqr;

    sample
        .iter()
        .enumerate()
        .filter(|(_, &v)| v < lower_fence || v > upper_fence)
        .map(|(index, &value)| Outlier { index, value })
        .collect()
}
