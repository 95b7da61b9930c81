// APFD (Average Percentage of Faults Detected) computation
//
// Scientific Foundation:
// [1] Rothermel, G., Untch, R. H., Chu, C., & Harrold, M. J. (1999).
//     Test case prioritization: An empirical study. ICSM. Defines APFD as
//     the area-based measure rewarding early fault detection.
// [2] Elbaum, S., Malishevsky, A. G., & Rothermel, G. (2002). Test case
//     prioritization: A family of empirical studies. IEEE TSE.
//
// APFD = 1 - (sum of 1-indexed fault positions) / (n * m) + 1 / (2n)
//
// Edge-case policy (preserved from the original analysis, debatable but
// documented): a run with zero detected faults scores APFD = 1.0: there
// were no faults to detect late. An empty run scores 0.0.

mod compare;
mod curve;

pub use compare::{compare_strategies, StrategyComparison, StrategyDelta};
pub use curve::{fault_detection_curve, CurvePoint, FaultDetectionCurve};

use crate::config::EvalConfig;
use crate::record::TestExecutionRecord;
pub use crate::stats::ConfidenceInterval;
pub(crate) use crate::stats::percentile_of_sorted;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Result of one APFD evaluation over an ordered run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApfdResult {
    /// APFD score in [0, 1]; higher is better (faults found earlier)
    pub apfd: f64,

    /// Number of tests in the evaluated ordering
    pub total_tests: usize,

    /// Number of fault-detecting positions in the ordering
    pub total_faults: usize,

    /// 1-indexed positions at which faults were detected, in run order
    pub fault_positions: Vec<usize>,

    /// Mean of `fault_positions`; 0 when no faults were detected
    pub average_fault_position: f64,

    /// Fraction of tests that detected a fault (m / n)
    pub fault_detection_rate: f64,

    /// Fraction of fault positions that fall in the first half of the run
    pub early_detection_rate: f64,

    /// Bootstrap percentile interval; present only when requested and the
    /// run had enough samples (n >= 10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_interval: Option<ConfidenceInterval>,
}

impl ApfdResult {
    fn zero() -> Self {
        Self {
            apfd: 0.0,
            total_tests: 0,
            total_faults: 0,
            fault_positions: Vec::new(),
            average_fault_position: 0.0,
            fault_detection_rate: 0.0,
            early_detection_rate: 0.0,
            confidence_interval: None,
        }
    }
}

/// Minimum run length before bootstrap resampling is attempted
const MIN_BOOTSTRAP_SAMPLES: usize = 10;

/// APFD from raw fault-detection flags in execution order
///
/// Shared by the full computation and the bootstrap resampler, which only
/// permutes flags, never whole records.
fn apfd_from_flags(flags: &[bool]) -> f64 {
    let n = flags.len();
    if n == 0 {
        return 0.0;
    }

    let mut position_sum = 0usize;
    let mut m = 0usize;
    for (idx, detected) in flags.iter().enumerate() {
        if *detected {
            position_sum += idx + 1;
            m += 1;
        }
    }

    if m == 0 {
        // No faults to miss: perfect score by convention
        return 1.0;
    }

    let n_f = n as f64;
    let apfd = 1.0 - (position_sum as f64) / (n_f * m as f64) + 1.0 / (2.0 * n_f);
    apfd.clamp(0.0, 1.0)
}

/// Compute the APFD score and detection summary for one ordered run
///
/// Precondition: `executions` is in the actual execution order under
/// evaluation. Degenerate inputs never fail:
/// - empty run: zero-valued result (apfd = 0.0)
/// - no detected faults: apfd = 1.0, fault_detection_rate = 0.0
///
/// # Example
/// ```
/// use tamiz::apfd::compute_apfd;
/// use tamiz::record::{TestExecutionRecord, TestStatus};
///
/// // fail, pass, pass, fail, pass: fault positions 1 and 4
/// let run: Vec<TestExecutionRecord> = [true, false, false, true, false]
///     .iter()
///     .enumerate()
///     .map(|(i, &fault)| {
///         TestExecutionRecord::executed(format!("t{i}"), TestStatus::Passed, fault)
///     })
///     .collect();
///
/// let result = compute_apfd(&run);
/// assert!((result.apfd - 0.6).abs() < 1e-9);
/// ```
pub fn compute_apfd(executions: &[TestExecutionRecord]) -> ApfdResult {
    let n = executions.len();
    if n == 0 {
        return ApfdResult::zero();
    }

    let fault_positions: Vec<usize> = executions
        .iter()
        .enumerate()
        .filter(|(_, r)| r.fault_detected)
        .map(|(idx, _)| idx + 1)
        .collect();
    let m = fault_positions.len();

    let flags: Vec<bool> = executions.iter().map(|r| r.fault_detected).collect();
    let apfd = apfd_from_flags(&flags);

    let (average_fault_position, early_detection_rate) = if m == 0 {
        (0.0, 0.0)
    } else {
        let sum: usize = fault_positions.iter().sum();
        let half = n as f64 / 2.0;
        let early = fault_positions
            .iter()
            .filter(|&&p| p as f64 <= half)
            .count();
        (sum as f64 / m as f64, early as f64 / m as f64)
    };

    ApfdResult {
        apfd,
        total_tests: n,
        total_faults: m,
        fault_positions,
        average_fault_position,
        fault_detection_rate: m as f64 / n as f64,
        early_detection_rate,
        confidence_interval: None,
    }
}

/// Compute APFD with a bootstrap percentile confidence interval
///
/// Draws `config.bootstrap_samples` resamples-with-replacement of size n
/// from the run, computes APFD per resample, and takes the
/// [alpha/2, 1 - alpha/2] percentiles of the sorted scores as the interval
/// (alpha = 1 - confidence_level). Runs shorter than 10 tests skip the
/// bootstrap and return the base result unchanged.
pub fn compute_with_confidence_interval(
    executions: &[TestExecutionRecord],
    config: &EvalConfig,
) -> ApfdResult {
    compute_with_confidence_interval_with_rng(executions, config, &mut rand::thread_rng())
}

/// Seedable variant of [`compute_with_confidence_interval`] for
/// deterministic evaluation pipelines and tests
pub fn compute_with_confidence_interval_with_rng<R: Rng>(
    executions: &[TestExecutionRecord],
    config: &EvalConfig,
    rng: &mut R,
) -> ApfdResult {
    let mut result = compute_apfd(executions);
    let n = executions.len();

    if n < MIN_BOOTSTRAP_SAMPLES {
        tracing::debug!(
            n,
            min = MIN_BOOTSTRAP_SAMPLES,
            "run too short for bootstrap, returning point estimate"
        );
        return result;
    }

    let flags: Vec<bool> = executions.iter().map(|r| r.fault_detected).collect();
    let mut scores = Vec::with_capacity(config.bootstrap_samples);
    let mut resample = vec![false; n];

    for _ in 0..config.bootstrap_samples {
        for slot in resample.iter_mut() {
            *slot = flags[rng.gen_range(0..n)];
        }
        scores.push(apfd_from_flags(&resample));
    }

    scores.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let alpha = 1.0 - config.confidence_level;
    let lower = percentile_of_sorted(&scores, alpha / 2.0);
    let upper = percentile_of_sorted(&scores, 1.0 - alpha / 2.0);

    result.confidence_interval = Some(ConfidenceInterval {
        lower,
        upper,
        level: config.confidence_level,
    });
    result
}
