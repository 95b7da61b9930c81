// Cross-strategy APFD comparison with a deterministic textual summary
//
// Rule-based, no statistics here: raw APFD deltas against each baseline
// ordering and a best-method pick. Statistical significance of technique
// differences across iterations lives in the stats module.

use super::{compute_apfd, ApfdResult};
use crate::record::TestExecutionRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// APFD delta of the primary strategy against one baseline ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDelta {
    /// Baseline label as supplied by the caller
    pub baseline: String,

    /// Baseline's own APFD score
    pub baseline_apfd: f64,

    /// primary_apfd - baseline_apfd
    pub delta: f64,

    /// Delta as a percentage of the baseline score; 0 when the baseline
    /// scored 0
    pub improvement_pct: f64,
}

/// Result of comparing one primary ordering against named baselines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyComparison {
    /// Full APFD result of the primary ordering
    pub primary: ApfdResult,

    /// Per-baseline deltas, sorted by baseline label
    pub deltas: Vec<StrategyDelta>,

    /// Label of the best method by raw APFD ("primary" when the primary
    /// ordering wins or ties)
    pub best_strategy: String,

    /// Deterministic rule-based summary, one clause per baseline
    pub summary: String,
}

/// Compare a primary ordering against a set of labelled baseline orderings
///
/// Ties go to the primary strategy. Baselines are reported in label order
/// so the summary string is deterministic regardless of map iteration.
pub fn compare_strategies(
    primary: &[TestExecutionRecord],
    baselines: &HashMap<String, Vec<TestExecutionRecord>>,
) -> StrategyComparison {
    let primary_result = compute_apfd(primary);

    let mut labels: Vec<&String> = baselines.keys().collect();
    labels.sort();

    let mut deltas = Vec::with_capacity(labels.len());
    let mut best_label = "primary".to_string();
    let mut best_apfd = primary_result.apfd;

    for label in labels {
        let baseline_result = compute_apfd(&baselines[label]);
        let delta = primary_result.apfd - baseline_result.apfd;
        let improvement_pct = if baseline_result.apfd > 0.0 {
            delta / baseline_result.apfd * 100.0
        } else {
            0.0
        };

        if baseline_result.apfd > best_apfd {
            best_apfd = baseline_result.apfd;
            best_label = label.clone();
        }

        deltas.push(StrategyDelta {
            baseline: label.clone(),
            baseline_apfd: baseline_result.apfd,
            delta,
            improvement_pct,
        });
    }

    let summary = build_summary(&primary_result, &deltas, &best_label);

    StrategyComparison {
        primary: primary_result,
        deltas,
        best_strategy: best_label,
        summary,
    }
}

fn build_summary(primary: &ApfdResult, deltas: &[StrategyDelta], best: &str) -> String {
    let mut summary = format!("primary APFD {:.4}", primary.apfd);

    for delta in deltas {
        let clause = if delta.delta >= 0.0 {
            format!(
                "; {:.1}% better than '{}' ({:.4})",
                delta.improvement_pct.abs(),
                delta.baseline,
                delta.baseline_apfd
            )
        } else {
            format!(
                "; {:.1}% worse than '{}' ({:.4})",
                delta.improvement_pct.abs(),
                delta.baseline,
                delta.baseline_apfd
            )
        };
        summary.push_str(&clause);
    }

    summary.push_str(&format!("; best method: {best}"));
    summary
}
