// Configuration for the evaluation engines
//
// Key Innovation: every tunable the original analysis hard-coded (bootstrap
// depth, significance level, the heuristic false-negative leakage rate) is an
// explicit, validated configuration field. Malformed configuration is the one
// hard failure surface of the crate and fails fast here, never
// mid-computation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Multiple-comparison correction method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionMethod {
    /// Bonferroni: corrected alpha = alpha / numComparisons
    Bonferroni,
    /// No correction; every pairwise test uses the raw alpha
    None,
}

/// Configuration recognized by every engine in the crate
///
/// # Example
/// ```
/// use tamiz::config::EvalConfig;
///
/// let config = EvalConfig::default();
/// assert_eq!(config.confidence_level, 0.95);
/// assert_eq!(config.bootstrap_samples, 1000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Confidence level for bootstrap and difference intervals
    ///
    /// - 0.95 (default): conventional 95% intervals
    /// - 0.99: wider intervals, stricter claims
    ///
    /// Must lie strictly inside (0, 1).
    pub confidence_level: f64,

    /// Number of bootstrap resamples for APFD confidence intervals
    ///
    /// The only computation with non-trivial cost: O(samples × n). Acts as
    /// the iteration cap for the whole crate; there is no other
    /// timeout-like control.
    pub bootstrap_samples: usize,

    /// Statistical significance level (alpha) for hypothesis testing
    ///
    /// - 0.05 (default): 95% confidence, the conventional threshold
    /// - 0.01: stricter (fewer false positives, more false negatives)
    pub significance_level: f64,

    /// Correction applied when running all pairwise technique comparisons
    pub correction: CorrectionMethod,

    /// Window size for plateau detection and early/recent trend windows
    pub trend_window: usize,

    /// Retention bound for per-technique metric history and the efficiency
    /// profile registry. Oldest entries are evicted first.
    pub history_retention: usize,

    /// Assumed fraction of unselected tests that would have caught a missed
    /// fault, used by the heuristic confusion-matrix mode
    ///
    /// The original analysis hard-coded 0.1; it is an arbitrary leakage
    /// assumption, so it is exposed here for calibration. Must lie in
    /// [0, 1].
    pub fn_leakage_rate: f64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,  // conventional 95% intervals
            bootstrap_samples: 1000, // standard bootstrap depth
            significance_level: 0.05,
            correction: CorrectionMethod::Bonferroni,
            trend_window: 10,
            history_retention: 50,
            fn_leakage_rate: 0.1,
        }
    }
}

/// Configuration validation failure
///
/// The only error the core can raise: detected at configuration time,
/// never during metric computation.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("confidence_level must be in (0, 1), got {0}")]
    ConfidenceLevel(f64),

    #[error("significance_level must be in (0, 1), got {0}")]
    SignificanceLevel(f64),

    #[error("bootstrap_samples must be >= 1, got {0}")]
    BootstrapSamples(usize),

    #[error("trend_window must be >= 2, got {0}")]
    TrendWindow(usize),

    #[error("history_retention must be >= 1, got {0}")]
    HistoryRetention(usize),

    #[error("fn_leakage_rate must be in [0, 1], got {0}")]
    LeakageRate(f64),
}

impl EvalConfig {
    /// Strict preset: 99% intervals, 1% significance, deeper bootstrap
    ///
    /// Use when a claimed technique improvement must survive review.
    pub fn strict() -> Self {
        Self {
            confidence_level: 0.99,
            bootstrap_samples: 5000,
            significance_level: 0.01,
            correction: CorrectionMethod::Bonferroni,
            trend_window: 10,
            history_retention: 100,
            fn_leakage_rate: 0.1,
        }
    }

    /// Permissive preset: 90% intervals, 10% significance, shallow bootstrap
    ///
    /// Use for quick exploratory sweeps where false positives are cheap.
    pub fn permissive() -> Self {
        Self {
            confidence_level: 0.90,
            bootstrap_samples: 200,
            significance_level: 0.10,
            correction: CorrectionMethod::None,
            trend_window: 5,
            history_retention: 25,
            fn_leakage_rate: 0.1,
        }
    }

    /// Validate the configuration, failing fast on the first violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ConfigError::ConfidenceLevel(self.confidence_level));
        }
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(ConfigError::SignificanceLevel(self.significance_level));
        }
        if self.bootstrap_samples == 0 {
            return Err(ConfigError::BootstrapSamples(self.bootstrap_samples));
        }
        if self.trend_window < 2 {
            return Err(ConfigError::TrendWindow(self.trend_window));
        }
        if self.history_retention == 0 {
            return Err(ConfigError::HistoryRetention(self.history_retention));
        }
        if !(0.0..=1.0).contains(&self.fn_leakage_rate) {
            return Err(ConfigError::LeakageRate(self.fn_leakage_rate));
        }
        Ok(())
    }
}
