// Trend and learning-curve analysis over iteration-ordered metric history
//
// Reinforcement-style adaptation runs produce one metric observation per
// iteration; this module answers whether the technique is still learning:
// the fitted trend, the early-vs-recent direction, and the first point at
// which improvement plateaus.

mod learning_curve;
mod plateau;
mod regression;

pub use learning_curve::{generate_learning_curve, LearningCurvePoint};
pub use plateau::{detect_plateau, PlateauDetection};
pub use regression::{linear_regression, LinearRegression};

use crate::config::EvalConfig;
use crate::stats::{DescriptiveStats, MetricKind};
use serde::{Deserialize, Serialize};

/// Direction of a metric trend, oriented by the metric's polarity
///
/// "Improving" means the metric is moving in its better direction:
/// upward for APFD or accuracy, downward for execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Improving,
    Declining,
    Stable,
}

/// Trend classification of one metric's iteration history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub metric: MetricKind,
    pub direction: TrendDirection,

    /// OLS slope of the metric over iteration index
    pub slope: f64,

    /// Mean of the early window
    pub early_mean: f64,

    /// Mean of the recent window
    pub recent_mean: f64,

    /// 1 - stddev/mean over the full history, clamped to [0, 1];
    /// 0 when the history is empty or centered on zero
    pub consistency: f64,
}

/// Dead-band on the OLS slope for non-APFD metrics
const SLOPE_DEAD_BAND: f64 = 0.001;

/// Dead-band on the early-vs-recent mean delta for APFD
const APFD_DELTA_DEAD_BAND: f64 = 0.05;

/// Classify the trend of one metric's iteration-ordered history
///
/// An early window and a recent window (both `config.trend_window`, shrunk
/// to half the history when shorter) are compared. APFD uses the mean
/// delta with a ±0.05 dead-band; every other metric uses the full-history
/// OLS slope with a ±0.001 dead-band. Histories shorter than 2 samples
/// are always stable.
pub fn analyze_trends(history: &[f64], metric: MetricKind, config: &EvalConfig) -> TrendAnalysis {
    let n = history.len();

    let stats = DescriptiveStats::from_sample(history);
    let consistency = if n == 0 || stats.mean == 0.0 {
        0.0
    } else {
        (1.0 - stats.std_dev / stats.mean.abs()).clamp(0.0, 1.0)
    };

    if n < 2 {
        return TrendAnalysis {
            metric,
            direction: TrendDirection::Stable,
            slope: 0.0,
            early_mean: stats.mean,
            recent_mean: stats.mean,
            consistency,
        };
    }

    let window = config.trend_window.min(n / 2).max(1);
    let early = &history[..window];
    let recent = &history[n - window..];
    let early_mean = early.iter().sum::<f64>() / window as f64;
    let recent_mean = recent.iter().sum::<f64>() / window as f64;

    let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let fit = linear_regression(&x, history);

    // Raw movement of the metric value, before polarity orientation
    let raw = match metric {
        MetricKind::Apfd => {
            let delta = recent_mean - early_mean;
            if delta.abs() <= APFD_DELTA_DEAD_BAND {
                0.0
            } else {
                delta
            }
        }
        _ => {
            if fit.slope.abs() <= SLOPE_DEAD_BAND {
                0.0
            } else {
                fit.slope
            }
        }
    };

    let direction = if raw == 0.0 {
        TrendDirection::Stable
    } else {
        let upward = raw > 0.0;
        if upward == metric.higher_is_better() {
            TrendDirection::Improving
        } else {
            TrendDirection::Declining
        }
    };

    TrendAnalysis {
        metric,
        direction,
        slope: fit.slope,
        early_mean,
        recent_mean,
        consistency,
    }
}
