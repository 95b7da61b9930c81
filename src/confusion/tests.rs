// Tests for confusion-matrix estimation in both data modes
//
// The heuristic fixture is the documented worked example: 10 tests, 6
// selected, 4 faults injected, 3 detected.

use super::*;
use crate::config::EvalConfig;
use crate::record::{FaultRecord, TestExecutionRecord, TestStatus};

fn selected(id: &str, fault: bool) -> TestExecutionRecord {
    TestExecutionRecord::executed(id, TestStatus::Passed, fault)
}

fn unselected(id: &str) -> TestExecutionRecord {
    TestExecutionRecord {
        selected: false,
        executed: false,
        ..TestExecutionRecord::executed(id, TestStatus::Skipped, false)
    }
}

/// Exact mode: 2 selected detectors, 1 selected non-detector, 1 missed
/// fault, 2 idle unselected tests
#[test]
fn test_exact_mode_counts() {
    let executions = vec![
        selected("t1", true),
        selected("t2", true),
        selected("t3", false),
        unselected("t4"),
        unselected("t5"),
        unselected("t6"),
    ];
    let faults = vec![
        FaultRecord::new("f1", &["t1"]),
        FaultRecord::new("f2", &["t2"]),
        FaultRecord::new("f3", &["t4"]), // only detectable by an unselected test
    ];

    let config = EvalConfig::default();
    let counts = ConfusionCounts::from_source(
        ConfusionSource::Exact {
            executions: &executions,
            faults: &faults,
        },
        &config,
    );

    assert_eq!(counts.mode, ConfusionMode::Exact);
    assert_eq!(counts.true_positives, 2); // t1, t2 selected and detecting
    assert_eq!(counts.false_positives, 1); // t3 selected, detects nothing
    assert_eq!(counts.false_negatives, 1); // f3 has no selected detector
    assert_eq!(counts.true_negatives, 2); // t5, t6 remain
    assert_eq!(counts.total(), executions.len());
    assert!(counts.validate(executions.len()).is_empty());
}

#[test]
fn test_exact_mode_counts_sum_to_total() {
    // t4 is in f3's detecting set but unselected: it must land in TN via
    // the remainder, keeping the sum invariant
    let executions = vec![
        selected("t1", true),
        unselected("t2"),
        unselected("t3"),
        unselected("t4"),
    ];
    let faults = vec![FaultRecord::new("f1", &["t1"]), FaultRecord::new("f2", &["t4"])];

    let counts = ConfusionCounts::from_source(
        ConfusionSource::Exact {
            executions: &executions,
            faults: &faults,
        },
        &EvalConfig::default(),
    );

    assert_eq!(counts.total(), 4);
    assert!(counts.validate(4).is_empty());
}

/// Worked heuristic example: totals (10, 6, 4, 3)
///
/// detectionRate = 3/4 = 0.75; estTP = round(6 * 0.75) = 5; estFP = 1;
/// missed = 1; estFN = min(1, round(4 * 0.1)) = 0; estTN = 4.
#[test]
fn test_heuristic_mode_worked_example() {
    let aggregate = AggregateCounts {
        total_tests: 10,
        selected_tests: 6,
        faults_injected: 4,
        faults_detected: 3,
    };

    let counts = ConfusionCounts::from_source(
        ConfusionSource::Heuristic(aggregate),
        &EvalConfig::default(),
    );

    assert_eq!(counts.mode, ConfusionMode::Heuristic);
    assert_eq!(counts.true_positives, 5);
    assert_eq!(counts.false_positives, 1);
    assert_eq!(counts.false_negatives, 0);
    assert_eq!(counts.true_negatives, 4);
    assert_eq!(counts.total(), 10);
}

#[test]
fn test_heuristic_mode_clamps_tp_to_selected() {
    // detected > injected pushes the detection rate above 1; the TP
    // estimate must clamp to the selected count instead of overflowing
    let aggregate = AggregateCounts {
        total_tests: 10,
        selected_tests: 4,
        faults_injected: 2,
        faults_detected: 5,
    };
    assert!(!aggregate.validate().is_empty());

    let counts = ConfusionCounts::from_source(
        ConfusionSource::Heuristic(aggregate),
        &EvalConfig::default(),
    );
    assert_eq!(counts.true_positives, 4);
    assert_eq!(counts.false_positives, 0);
}

#[test]
fn test_heuristic_leakage_rate_is_configurable() {
    let aggregate = AggregateCounts {
        total_tests: 20,
        selected_tests: 10,
        faults_injected: 10,
        faults_detected: 2,
    };

    // Default leakage 0.1: estFN = min(8, round(10 * 0.1)) = 1
    let default_counts = ConfusionCounts::from_source(
        ConfusionSource::Heuristic(aggregate),
        &EvalConfig::default(),
    );
    assert_eq!(default_counts.false_negatives, 1);

    // Raised leakage 0.5: estFN = min(8, round(10 * 0.5)) = 5
    let config = EvalConfig {
        fn_leakage_rate: 0.5,
        ..EvalConfig::default()
    };
    let leaky_counts =
        ConfusionCounts::from_source(ConfusionSource::Heuristic(aggregate), &config);
    assert_eq!(leaky_counts.false_negatives, 5);
    assert_eq!(leaky_counts.total(), 20);
}

#[test]
fn test_zero_faults_injected_guard() {
    let aggregate = AggregateCounts {
        total_tests: 10,
        selected_tests: 5,
        faults_injected: 0,
        faults_detected: 0,
    };

    let counts = ConfusionCounts::from_source(
        ConfusionSource::Heuristic(aggregate),
        &EvalConfig::default(),
    );
    // detectionRate = 0/max(1,0) = 0: everything selected is FP
    assert_eq!(counts.true_positives, 0);
    assert_eq!(counts.false_positives, 5);
    assert_eq!(counts.total(), 10);
}

#[test]
fn test_metrics_worked_example() {
    let counts = ConfusionCounts {
        true_positives: 5,
        false_positives: 1,
        true_negatives: 4,
        false_negatives: 0,
        mode: ConfusionMode::Heuristic,
    };
    let metrics = ConfusionMetrics::from_counts(counts);

    assert!((metrics.precision - 5.0 / 6.0).abs() < 1e-9);
    assert_eq!(metrics.recall, 1.0);
    let expected_f1 = 2.0 * metrics.precision * metrics.recall / (metrics.precision + metrics.recall);
    assert!((metrics.f1 - expected_f1).abs() < 1e-9);
    assert!((metrics.accuracy - 0.9).abs() < 1e-9);
    assert!((metrics.specificity - 0.8).abs() < 1e-9);
    assert!((metrics.balanced_accuracy - 0.9).abs() < 1e-9);
    assert!((metrics.informedness - 0.8).abs() < 1e-9);
    assert_eq!(metrics.npv, 1.0);
    assert!((metrics.markedness - 5.0 / 6.0).abs() < 1e-9);
    assert!((-1.0..=1.0).contains(&metrics.mcc));
}

#[test]
fn test_metrics_all_zero_counts() {
    let counts = ConfusionCounts {
        true_positives: 0,
        false_positives: 0,
        true_negatives: 0,
        false_negatives: 0,
        mode: ConfusionMode::Exact,
    };
    let metrics = ConfusionMetrics::from_counts(counts);

    // Every guarded denominator collapses to 0.0, never NaN
    assert_eq!(metrics.precision, 0.0);
    assert_eq!(metrics.recall, 0.0);
    assert_eq!(metrics.f1, 0.0);
    assert_eq!(metrics.accuracy, 0.0);
    assert_eq!(metrics.mcc, 0.0);
    assert!(metrics.mcc.is_finite());
}

#[test]
fn test_mcc_perfect_and_inverse_classification() {
    let perfect = ConfusionMetrics::from_counts(ConfusionCounts {
        true_positives: 5,
        false_positives: 0,
        true_negatives: 5,
        false_negatives: 0,
        mode: ConfusionMode::Exact,
    });
    assert!((perfect.mcc - 1.0).abs() < 1e-9);

    let inverse = ConfusionMetrics::from_counts(ConfusionCounts {
        true_positives: 0,
        false_positives: 5,
        true_negatives: 0,
        false_negatives: 5,
        mode: ConfusionMode::Exact,
    });
    assert!((inverse.mcc + 1.0).abs() < 1e-9);
}

#[test]
fn test_f1_zero_when_precision_and_recall_zero() {
    let metrics = ConfusionMetrics::from_counts(ConfusionCounts {
        true_positives: 0,
        false_positives: 3,
        true_negatives: 4,
        false_negatives: 3,
        mode: ConfusionMode::Exact,
    });
    assert_eq!(metrics.f1, 0.0);
}

#[test]
fn test_counts_validate_sum_mismatch() {
    let counts = ConfusionCounts {
        true_positives: 1,
        false_positives: 1,
        true_negatives: 1,
        false_negatives: 1,
        mode: ConfusionMode::Exact,
    };
    let issues = counts.validate(10);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].code, "counts_sum_mismatch");
}

#[test]
fn test_estimate_metrics_end_to_end() {
    let aggregate = AggregateCounts {
        total_tests: 10,
        selected_tests: 6,
        faults_injected: 4,
        faults_detected: 3,
    };
    let metrics = estimate_metrics(
        ConfusionSource::Heuristic(aggregate),
        &EvalConfig::default(),
    );
    assert_eq!(metrics.counts.true_positives, 5);

    let json = serde_json::to_string(&metrics).unwrap();
    let back: ConfusionMetrics = serde_json::from_str(&json).unwrap();
    assert_eq!(metrics, back);
}
