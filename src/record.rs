//! Execution and fault value records shared by every evaluation engine
//!
//! These are the input contracts of the crate: an external test runner
//! produces ordered `TestExecutionRecord` sequences, a fault-tracking
//! collaborator produces `FaultRecord` ground truth. Both are immutable
//! once constructed.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of a single test execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

/// One test in one ordered run of a selection/prioritization technique
///
/// Sequence position is implicit: the index of the record in the ordered
/// collection handed to the engines is the execution position under
/// evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestExecutionRecord {
    /// Opaque test identifier (fully-qualified name, hash, etc.)
    pub test_id: String,

    /// Whether the technique under evaluation selected this test
    pub selected: bool,

    /// Whether the test actually ran (selected tests can still be skipped)
    pub executed: bool,

    /// Execution outcome
    pub status: TestStatus,

    /// Wall-clock execution time in milliseconds
    pub execution_time_ms: u64,

    /// Whether this execution detected a fault (ground truth from the
    /// fault-tracking collaborator)
    pub fault_detected: bool,

    /// Impact score predicted by the technique before execution, in [0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_impact: Option<f64>,
}

impl TestExecutionRecord {
    /// Convenience constructor for the common case: a selected, executed
    /// test with a known outcome.
    pub fn executed(test_id: impl Into<String>, status: TestStatus, fault_detected: bool) -> Self {
        Self {
            test_id: test_id.into(),
            selected: true,
            executed: true,
            status,
            execution_time_ms: 0,
            fault_detected,
            predicted_impact: None,
        }
    }
}

/// Ground-truth record of one injected or historical fault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultRecord {
    /// Opaque fault identifier
    pub fault_id: String,

    /// Tests able to detect this fault (ground truth)
    pub detecting_tests: HashSet<String>,

    /// Optional severity label; not used by the core formulas
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

impl FaultRecord {
    pub fn new(fault_id: impl Into<String>, detecting_tests: &[&str]) -> Self {
        Self {
            fault_id: fault_id.into(),
            detecting_tests: detecting_tests.iter().map(|t| (*t).to_string()).collect(),
            severity: None,
        }
    }
}

/// A named logical inconsistency surfaced by `validate_run`
///
/// Inconsistent inputs are not errors: the engines degrade gracefully and
/// leave the decision to the caller (spec'd error philosophy). Each issue
/// carries a stable machine-readable code plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Stable issue code (e.g. "executed_but_not_selected")
    pub code: String,

    /// Human-readable description with offending values
    pub message: String,
}

impl ValidationIssue {
    pub(crate) fn new(code: &str, message: String) -> Self {
        Self {
            code: code.to_string(),
            message,
        }
    }
}

/// Check an ordered run for logical inconsistencies
///
/// Returns one issue per violated consistency rule:
/// - `executed_but_not_selected`: a test ran without being selected
/// - `fault_without_execution`: a record claims fault detection but never ran
/// - `predicted_impact_out_of_range`: predicted impact outside [0, 1]
/// - `duplicate_test_id`: the same test id appears twice in one run
///
/// An empty vector means the run is internally consistent.
pub fn validate_run(executions: &[TestExecutionRecord]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen: HashSet<&str> = HashSet::with_capacity(executions.len());

    for (position, record) in executions.iter().enumerate() {
        if record.executed && !record.selected {
            issues.push(ValidationIssue::new(
                "executed_but_not_selected",
                format!(
                    "test '{}' at position {} executed without being selected",
                    record.test_id, position
                ),
            ));
        }

        if record.fault_detected && !record.executed {
            issues.push(ValidationIssue::new(
                "fault_without_execution",
                format!(
                    "test '{}' at position {} reports a detected fault but did not execute",
                    record.test_id, position
                ),
            ));
        }

        if let Some(impact) = record.predicted_impact {
            if !(0.0..=1.0).contains(&impact) {
                issues.push(ValidationIssue::new(
                    "predicted_impact_out_of_range",
                    format!(
                        "test '{}' has predicted impact {} outside [0, 1]",
                        record.test_id, impact
                    ),
                ));
            }
        }

        if !seen.insert(record.test_id.as_str()) {
            issues.push(ValidationIssue::new(
                "duplicate_test_id",
                format!("test '{}' appears more than once in the run", record.test_id),
            ));
        }
    }

    issues
}
