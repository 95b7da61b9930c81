// Statistical power via the two-sample normal approximation
//
// power = Phi(|d| * sqrt(n / 2) - z_{1 - alpha/2}); when the achieved
// power misses the conventional 0.8 target, the sample size required to
// reach it for the same effect and alpha is reported alongside.

use super::distributions::{inverse_normal_cdf, normal_cdf};
use serde::{Deserialize, Serialize};

/// Target power below which a required sample size is suggested
const TARGET_POWER: f64 = 0.8;

/// Result of a power analysis for a two-sample comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerAnalysis {
    /// Achieved power in [0, 1] for the given effect size, per-group n,
    /// and alpha
    pub power: f64,

    /// Per-group sample size needed to reach power 0.8 at the same effect
    /// size and alpha; `None` when power is already sufficient or the
    /// effect size is zero (no finite n reaches the target)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_sample_size: Option<usize>,
}

/// Normal-approximation power for a two-sample mean comparison
///
/// `effect_size` is Cohen's d; `n` is the per-group sample size.
pub fn power_analysis(effect_size: f64, n: usize, alpha: f64) -> PowerAnalysis {
    let z_alpha = inverse_normal_cdf(1.0 - alpha / 2.0);
    let d = effect_size.abs();

    let power = normal_cdf(d * (n as f64 / 2.0).sqrt() - z_alpha).clamp(0.0, 1.0);

    let required_sample_size = if power >= TARGET_POWER || d == 0.0 {
        None
    } else {
        let z_power = inverse_normal_cdf(TARGET_POWER);
        let required = 2.0 * ((z_alpha + z_power) / d).powi(2);
        Some(required.ceil() as usize)
    };

    PowerAnalysis {
        power,
        required_sample_size,
    }
}
