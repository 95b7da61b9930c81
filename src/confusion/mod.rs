// Confusion-matrix estimation for test-selection classification quality
//
// Treats "selected test detects a fault" as a binary classification and
// derives the standard metric family from the four counts.
//
// Two mutually exclusive data situations, modelled as a tagged variant so
// downstream formulas stay mode-agnostic:
// - Exact: per-test ground truth (which tests detect which faults) exists
// - Heuristic: only aggregate counts survived (selected, total, detected,
//   injected) and the matrix is estimated under an explicit leakage
//   assumption
//
// Scientific Foundation:
// [3] Matthews, B. W. (1975). Comparison of the predicted and observed
//     secondary structure of T4 phage lysozyme. Biochim. Biophys. Acta.
//     (MCC: balanced single-number quality in [-1, 1].)
// [4] Powers, D. M. W. (2011). Evaluation: from precision, recall and
//     F-measure to ROC, informedness, markedness and correlation. JMLT.

mod metrics;

pub use metrics::ConfusionMetrics;

use crate::config::EvalConfig;
use crate::record::{FaultRecord, TestExecutionRecord, ValidationIssue};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which data situation produced a set of confusion counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfusionMode {
    /// Counts derived from per-test ground truth; they sum exactly to the
    /// total test count
    Exact,
    /// Counts estimated from aggregate totals; the sum is guaranteed by
    /// construction but individual counts are estimates
    Heuristic,
}

/// Aggregate totals available when per-test ground truth was not kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateCounts {
    pub total_tests: usize,
    pub selected_tests: usize,
    pub faults_injected: usize,
    pub faults_detected: usize,
}

impl AggregateCounts {
    /// Surface logical inconsistencies in the aggregate totals
    ///
    /// Inconsistent counts are not rejected; estimation clamps and the
    /// caller decides what to do with the named issues.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        if self.selected_tests > self.total_tests {
            issues.push(ValidationIssue::new(
                "selected_exceeds_total",
                format!(
                    "selected_tests {} exceeds total_tests {}",
                    self.selected_tests, self.total_tests
                ),
            ));
        }
        if self.faults_detected > self.faults_injected {
            issues.push(ValidationIssue::new(
                "detected_exceeds_injected",
                format!(
                    "faults_detected {} exceeds faults_injected {}",
                    self.faults_detected, self.faults_injected
                ),
            ));
        }
        issues
    }
}

/// Input variant for confusion-matrix estimation
///
/// The mode is selected by data availability, never by a flag: callers
/// holding ground truth construct `Exact`, callers holding only totals
/// construct `Heuristic`.
#[derive(Debug, Clone, Copy)]
pub enum ConfusionSource<'a> {
    /// Per-test ground truth: the evaluated run plus the fault records
    /// naming their detecting tests
    Exact {
        executions: &'a [TestExecutionRecord],
        faults: &'a [FaultRecord],
    },
    /// Aggregate totals only
    Heuristic(AggregateCounts),
}

/// The four classification counts plus their provenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
    pub mode: ConfusionMode,
}

impl ConfusionCounts {
    /// Derive the four counts from either input variant
    ///
    /// Exact mode:
    /// - TP: selected tests present in some fault's detecting-test set
    /// - FP: selected tests detecting no fault
    /// - FN: faults whose detecting-test set has zero selected members
    /// - TN: all remaining (unselected, non-detecting) tests
    ///
    /// Heuristic mode estimates the matrix from aggregate totals under the
    /// configured false-negative leakage assumption
    /// (`EvalConfig::fn_leakage_rate`).
    pub fn from_source(source: ConfusionSource<'_>, config: &EvalConfig) -> Self {
        match source {
            ConfusionSource::Exact { executions, faults } => Self::exact(executions, faults),
            ConfusionSource::Heuristic(counts) => {
                Self::heuristic(counts, config.fn_leakage_rate)
            }
        }
    }

    fn exact(executions: &[TestExecutionRecord], faults: &[FaultRecord]) -> Self {
        let total = executions.len();

        let detecting_union: HashSet<&str> = faults
            .iter()
            .flat_map(|f| f.detecting_tests.iter().map(String::as_str))
            .collect();

        let selected: HashSet<&str> = executions
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.test_id.as_str())
            .collect();

        let true_positives = executions
            .iter()
            .filter(|r| r.selected && detecting_union.contains(r.test_id.as_str()))
            .count();
        let false_positives = executions
            .iter()
            .filter(|r| r.selected && !detecting_union.contains(r.test_id.as_str()))
            .count();

        let false_negatives = faults
            .iter()
            .filter(|f| f.detecting_tests.iter().all(|t| !selected.contains(t.as_str())))
            .count();

        // Remaining unselected, non-detecting tests. Saturating keeps the
        // counts well-formed on degenerate inputs (more missed faults than
        // unselected tests); validate() surfaces the sum mismatch.
        let true_negatives = total
            .saturating_sub(true_positives)
            .saturating_sub(false_positives)
            .saturating_sub(false_negatives);

        Self {
            true_positives,
            false_positives,
            true_negatives,
            false_negatives,
            mode: ConfusionMode::Exact,
        }
    }

    fn heuristic(counts: AggregateCounts, leakage_rate: f64) -> Self {
        let AggregateCounts {
            total_tests,
            selected_tests,
            faults_injected,
            faults_detected,
        } = counts;

        let detection_rate = faults_detected as f64 / faults_injected.max(1) as f64;

        let mut est_tp = (selected_tests as f64 * detection_rate).round() as usize;
        if est_tp > selected_tests {
            tracing::warn!(
                est_tp,
                selected_tests,
                "heuristic TP estimate exceeds selected count, clamping"
            );
            est_tp = selected_tests;
        }
        let est_fp = selected_tests - est_tp;

        let unselected = total_tests.saturating_sub(selected_tests);
        let missed_faults = faults_injected.saturating_sub(faults_detected);
        let est_fn = missed_faults.min((unselected as f64 * leakage_rate).round() as usize);
        let est_tn = unselected - est_fn;

        Self {
            true_positives: est_tp,
            false_positives: est_fp,
            true_negatives: est_tn,
            false_negatives: est_fn,
            mode: ConfusionMode::Heuristic,
        }
    }

    /// Sum of the four counts
    pub fn total(&self) -> usize {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// Check the exact-mode invariant: counts sum to the expected total
    ///
    /// Heuristic counts sum to the total by construction, so a mismatch
    /// there indicates inconsistent aggregate inputs.
    pub fn validate(&self, expected_total: usize) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();
        let sum = self.total();
        if sum != expected_total {
            issues.push(ValidationIssue::new(
                "counts_sum_mismatch",
                format!(
                    "confusion counts sum to {sum}, expected {expected_total} \
                     (TP={} FP={} TN={} FN={})",
                    self.true_positives,
                    self.false_positives,
                    self.true_negatives,
                    self.false_negatives
                ),
            ));
        }
        issues
    }
}

/// One-step convenience: counts plus the full derived metric family
pub fn estimate_metrics(source: ConfusionSource<'_>, config: &EvalConfig) -> ConfusionMetrics {
    ConfusionMetrics::from_counts(ConfusionCounts::from_source(source, config))
}

#[cfg(test)]
mod tests;
