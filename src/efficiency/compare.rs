// Candidate-vs-baseline efficiency comparison
//
// Percentage deltas against the baseline approach's recorded average,
// bucketed into a coarse significance level by how many deltas clear 10%.

use super::registry::{EfficiencyProfile, ProfileRegistry};
use serde::{Deserialize, Serialize};

/// Delta magnitude that counts as a material change
const MATERIAL_DELTA_PCT: f64 = 10.0;

/// Coarse significance bucket from the count of material deltas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignificanceBucket {
    /// All three deltas exceed 10%
    High,
    /// Two deltas exceed 10%
    Medium,
    /// One delta exceeds 10%
    Low,
    /// No delta exceeds 10%
    None,
}

impl SignificanceBucket {
    fn from_material_count(count: usize) -> Self {
        match count {
            0 => SignificanceBucket::None,
            1 => SignificanceBucket::Low,
            2 => SignificanceBucket::Medium,
            _ => SignificanceBucket::High,
        }
    }
}

/// Result of comparing a candidate run against a baseline approach
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyComparison {
    pub baseline_approach: String,

    /// Positive when the candidate is faster than the baseline average
    pub time_improvement_pct: f64,

    /// Positive when the candidate uses less memory
    pub memory_improvement_pct: f64,

    /// Positive when the candidate analyzes more tests per second
    pub throughput_increase_pct: f64,

    pub significance: SignificanceBucket,
}

/// Compare one candidate profile against the baseline approach's averages
///
/// Baseline values are the means over every recorded profile of
/// `baseline_approach`. Returns `None` when the baseline has no recorded
/// profiles.
pub fn compare_efficiency(
    candidate: &EfficiencyProfile,
    registry: &ProfileRegistry,
    baseline_approach: &str,
) -> Option<EfficiencyComparison> {
    let baseline_profiles = registry.snapshot(baseline_approach);
    if baseline_profiles.is_empty() {
        return None;
    }

    let count = baseline_profiles.len() as f64;
    let baseline_time =
        baseline_profiles.iter().map(|p| p.total_time_ms as f64).sum::<f64>() / count;
    let baseline_memory =
        baseline_profiles.iter().map(|p| p.peak_memory_mb).sum::<f64>() / count;
    let baseline_throughput =
        baseline_profiles.iter().map(|p| p.metrics.throughput).sum::<f64>() / count;

    let time_improvement_pct = if baseline_time > 0.0 {
        (baseline_time - candidate.total_time_ms as f64) / baseline_time * 100.0
    } else {
        0.0
    };
    let memory_improvement_pct = if baseline_memory > 0.0 {
        (baseline_memory - candidate.peak_memory_mb) / baseline_memory * 100.0
    } else {
        0.0
    };
    let throughput_increase_pct = if baseline_throughput > 0.0 {
        (candidate.metrics.throughput - baseline_throughput) / baseline_throughput * 100.0
    } else {
        0.0
    };

    let material = [
        time_improvement_pct,
        memory_improvement_pct,
        throughput_increase_pct,
    ]
    .iter()
    .filter(|delta| delta.abs() > MATERIAL_DELTA_PCT)
    .count();

    Some(EfficiencyComparison {
        baseline_approach: baseline_approach.to_string(),
        time_improvement_pct,
        memory_improvement_pct,
        throughput_increase_pct,
        significance: SignificanceBucket::from_material_count(material),
    })
}
