// Learning-curve construction: one point per adaptation iteration
//
// Each iteration's ordered run is scored with the APFD engine; prediction
// accuracy compares the technique's pre-execution impact predictions
// against what actually detected faults.

use crate::apfd::compute_apfd;
use crate::record::TestExecutionRecord;
use serde::{Deserialize, Serialize};

/// Threshold above which a predicted impact counts as "predicted faulty"
const IMPACT_THRESHOLD: f64 = 0.5;

/// One point of a technique's learning curve
///
/// Plain serializable data, regenerable at any time from stored iteration
/// history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningCurvePoint {
    /// 0-indexed iteration number
    pub iteration: usize,

    /// APFD of this iteration's ordering
    pub apfd: f64,

    /// Fraction of tests whose impact prediction (> 0.5) matched the
    /// fault-detection outcome; records without a prediction count as
    /// "predicted clean"
    pub accuracy: f64,

    /// Fraction of the suite not selected for execution
    pub reduction_ratio: f64,

    /// Total execution time of the iteration in milliseconds
    pub execution_time_ms: u64,

    /// Number of adaptations the technique made during this iteration
    pub adaptation_count: u32,
}

/// Prediction accuracy of one run: match rate of impact predictions
/// against fault outcomes
fn prediction_accuracy(executions: &[TestExecutionRecord]) -> f64 {
    if executions.is_empty() {
        return 0.0;
    }
    let matches = executions
        .iter()
        .filter(|r| {
            let predicted_faulty = r.predicted_impact.unwrap_or(0.0) > IMPACT_THRESHOLD;
            predicted_faulty == r.fault_detected
        })
        .count();
    matches as f64 / executions.len() as f64
}

/// Build the learning curve for a sequence of per-iteration runs
///
/// `adaptation_counts`, when present, is indexed by iteration; missing
/// entries default to 0. The result is finite, iteration-ordered, and
/// restartable (pure function of its inputs).
pub fn generate_learning_curve(
    iterations: &[Vec<TestExecutionRecord>],
    adaptation_counts: Option<&[u32]>,
) -> Vec<LearningCurvePoint> {
    iterations
        .iter()
        .enumerate()
        .map(|(iteration, executions)| {
            let apfd = compute_apfd(executions);

            let selected = executions.iter().filter(|r| r.selected).count();
            let reduction_ratio = if executions.is_empty() {
                0.0
            } else {
                1.0 - selected as f64 / executions.len() as f64
            };

            LearningCurvePoint {
                iteration,
                apfd: apfd.apfd,
                accuracy: prediction_accuracy(executions),
                reduction_ratio,
                execution_time_ms: executions.iter().map(|r| r.execution_time_ms).sum(),
                adaptation_count: adaptation_counts
                    .and_then(|counts| counts.get(iteration))
                    .copied()
                    .unwrap_or(0),
            }
        })
        .collect()
}
