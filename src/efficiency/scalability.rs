// Scalability classification from size-ordered efficiency profiles
//
// Consecutive profile pairs give observed growth ratios; each ratio is
// normalized to a per-10K-size-units factor before averaging, so a ratio
// measured across any size gap is comparable. The buckets are heuristic.

use super::registry::ProfileRegistry;
use serde::{Deserialize, Serialize};

/// Size normalization unit for growth factors
const SIZE_UNIT: f64 = 10_000.0;

/// Heuristic growth-trend bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalabilityTrend {
    /// Average growth factor < 1.1 per 10K units
    Constant,
    /// < 1.5
    Linear,
    /// < 2.5
    Quadratic,
    /// Anything beyond
    Exponential,
}

impl ScalabilityTrend {
    fn from_growth(factor: f64) -> Self {
        if factor < 1.1 {
            ScalabilityTrend::Constant
        } else if factor < 1.5 {
            ScalabilityTrend::Linear
        } else if factor < 2.5 {
            ScalabilityTrend::Quadratic
        } else {
            ScalabilityTrend::Exponential
        }
    }
}

/// Scalability assessment of one approach across recorded sizes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalabilityAnalysis {
    pub approach: String,

    /// Profiles that contributed growth pairs
    pub profile_count: usize,

    /// Mean time growth factor per 10K size-units
    pub time_growth_per_unit: f64,

    /// Mean memory growth factor per 10K size-units
    pub memory_growth_per_unit: f64,

    pub time_trend: ScalabilityTrend,
    pub memory_trend: ScalabilityTrend,
}

/// Growth factor between two measurements, normalized per 10K size-units
///
/// factor = (v2 / v1) ^ (10_000 / (s2 - s1)): a ratio observed over
/// exactly one size unit passes through unchanged.
fn normalized_growth(v1: f64, v2: f64, size_delta: f64) -> Option<f64> {
    if v1 <= 0.0 || v2 <= 0.0 || size_delta <= 0.0 {
        return None;
    }
    Some((v2 / v1).powf(SIZE_UNIT / size_delta))
}

/// Classify how one approach's time and memory grow with project size
///
/// Profiles are ordered by project size; pairs with non-increasing size
/// or unusable measurements are skipped. Returns `None` when fewer than
/// two usable profiles exist.
pub fn analyze_scalability(
    registry: &ProfileRegistry,
    approach: &str,
) -> Option<ScalabilityAnalysis> {
    let mut profiles = registry.snapshot(approach);
    if profiles.len() < 2 {
        return None;
    }
    profiles.sort_by_key(|p| p.project_size);

    let mut time_factors = Vec::new();
    let mut memory_factors = Vec::new();

    for pair in profiles.windows(2) {
        let size_delta = pair[1].project_size as f64 - pair[0].project_size as f64;

        match normalized_growth(
            pair[0].total_time_ms as f64,
            pair[1].total_time_ms as f64,
            size_delta,
        ) {
            Some(factor) => time_factors.push(factor),
            None => {
                tracing::debug!(
                    approach,
                    size_a = pair[0].project_size,
                    size_b = pair[1].project_size,
                    "skipping unusable time growth pair"
                );
            }
        }

        if let Some(factor) =
            normalized_growth(pair[0].peak_memory_mb, pair[1].peak_memory_mb, size_delta)
        {
            memory_factors.push(factor);
        }
    }

    if time_factors.is_empty() {
        return None;
    }

    let time_growth = time_factors.iter().sum::<f64>() / time_factors.len() as f64;
    let memory_growth = if memory_factors.is_empty() {
        1.0
    } else {
        memory_factors.iter().sum::<f64>() / memory_factors.len() as f64
    };

    Some(ScalabilityAnalysis {
        approach: approach.to_string(),
        profile_count: profiles.len(),
        time_growth_per_unit: time_growth,
        memory_growth_per_unit: memory_growth,
        time_trend: ScalabilityTrend::from_growth(time_growth),
        memory_trend: ScalabilityTrend::from_growth(memory_growth),
    })
}
