// Cohen's d effect size with conventional magnitude buckets

use super::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Conventional |d| buckets (Cohen 1988, extended with very_large)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectMagnitude {
    /// |d| < 0.2
    Negligible,
    /// 0.2 <= |d| < 0.5
    Small,
    /// 0.5 <= |d| < 0.8
    Medium,
    /// 0.8 <= |d| < 1.3
    Large,
    /// |d| >= 1.3
    VeryLarge,
}

impl EffectMagnitude {
    fn from_d(d: f64) -> Self {
        let abs = d.abs();
        if abs < 0.2 {
            EffectMagnitude::Negligible
        } else if abs < 0.5 {
            EffectMagnitude::Small
        } else if abs < 0.8 {
            EffectMagnitude::Medium
        } else if abs < 1.3 {
            EffectMagnitude::Large
        } else {
            EffectMagnitude::VeryLarge
        }
    }
}

impl fmt::Display for EffectMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EffectMagnitude::Negligible => "negligible",
            EffectMagnitude::Small => "small",
            EffectMagnitude::Medium => "medium",
            EffectMagnitude::Large => "large",
            EffectMagnitude::VeryLarge => "very_large",
        };
        write!(f, "{label}")
    }
}

/// Standardized mean difference between two samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    /// (mean_a - mean_b) / pooled standard deviation; signed, so
    /// cohens_d(a, b).cohens_d == -cohens_d(b, a).cohens_d
    pub cohens_d: f64,
    pub magnitude: EffectMagnitude,
}

/// Cohen's d with the pooled standard deviation
///
/// pooled = sqrt(((n1-1) v1 + (n2-1) v2) / (n1 + n2 - 2)).
/// Degenerate inputs (either sample shorter than 2, or zero pooled
/// variance) yield d = 0.
pub fn cohens_d(a: &[f64], b: &[f64]) -> EffectSize {
    let stats_a = DescriptiveStats::from_sample(a);
    let stats_b = DescriptiveStats::from_sample(b);

    let d = if stats_a.n < 2 || stats_b.n < 2 {
        0.0
    } else {
        let n1 = stats_a.n as f64;
        let n2 = stats_b.n as f64;
        let pooled_variance =
            ((n1 - 1.0) * stats_a.variance + (n2 - 1.0) * stats_b.variance) / (n1 + n2 - 2.0);
        let pooled_sd = pooled_variance.sqrt();
        if pooled_sd == 0.0 {
            0.0
        } else {
            (stats_a.mean - stats_b.mean) / pooled_sd
        }
    };

    EffectSize {
        cohens_d: d,
        magnitude: EffectMagnitude::from_d(d),
    }
}
