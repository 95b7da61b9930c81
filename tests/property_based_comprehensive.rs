//! Comprehensive property-based tests for the evaluation engines
//!
//! This suite covers the documented invariants of the crate using
//! property-based testing with proptest. Designed to run quickly as a
//! pre-commit quality gate.
//!
//! Core invariants tested:
//! 1. APFD is always within [0, 1]; zero faults score exactly 1.0
//! 2. Exact-mode confusion counts sum to the total test count
//! 3. MCC stays within [-1, 1]; F1 matches the harmonic-mean identity
//! 4. Cohen's d is antisymmetric
//! 5. Descriptive statistics and outlier detection never panic and keep
//!    their ordering invariants
//! 6. Fault-detection curves are monotone with AUC in [0, 1]

use proptest::prelude::*;
use tamiz::apfd::{compute_apfd, fault_detection_curve};
use tamiz::config::EvalConfig;
use tamiz::confusion::{
    estimate_metrics, AggregateCounts, ConfusionCounts, ConfusionMetrics, ConfusionMode,
    ConfusionSource,
};
use tamiz::record::{FaultRecord, TestExecutionRecord, TestStatus};
use tamiz::stats::{cohens_d, detect_outliers, DescriptiveStats};
use tamiz::trend::detect_plateau;

fn run_from_flags(flags: &[bool]) -> Vec<TestExecutionRecord> {
    flags
        .iter()
        .enumerate()
        .map(|(i, &fault)| TestExecutionRecord::executed(format!("t{i}"), TestStatus::Passed, fault))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_apfd_always_in_unit_interval(flags in prop::collection::vec(any::<bool>(), 0..200)) {
        let result = compute_apfd(&run_from_flags(&flags));

        prop_assert!((0.0..=1.0).contains(&result.apfd));
        prop_assert_eq!(result.total_tests, flags.len());
        prop_assert_eq!(result.total_faults, flags.iter().filter(|f| **f).count());
    }

    #[test]
    fn prop_apfd_zero_faults_scores_one(n in 1usize..100) {
        let result = compute_apfd(&run_from_flags(&vec![false; n]));
        prop_assert_eq!(result.apfd, 1.0);
        prop_assert_eq!(result.fault_detection_rate, 0.0);
    }

    #[test]
    fn prop_fault_curve_monotone_with_bounded_auc(
        flags in prop::collection::vec(any::<bool>(), 1..100),
    ) {
        let curve = fault_detection_curve(&run_from_flags(&flags));

        prop_assert!((0.0..=1.0).contains(&curve.area_under_curve));
        for pair in curve.points.windows(2) {
            prop_assert!(pair[1].faults_detected_pct >= pair[0].faults_detected_pct);
            prop_assert!(pair[1].tests_executed_pct >= pair[0].tests_executed_pct);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_exact_confusion_counts_sum_to_total(
        selected in prop::collection::vec(any::<bool>(), 1..60),
        fault_test in prop::collection::vec(0usize..60, 0..10),
    ) {
        let executions: Vec<TestExecutionRecord> = selected
            .iter()
            .enumerate()
            .map(|(i, &is_selected)| TestExecutionRecord {
                selected: is_selected,
                executed: is_selected,
                ..TestExecutionRecord::executed(format!("t{i}"), TestStatus::Passed, false)
            })
            .collect();

        let faults: Vec<FaultRecord> = fault_test
            .iter()
            .enumerate()
            .filter(|(_, &t)| t < selected.len())
            .map(|(i, &t)| FaultRecord::new(format!("f{i}"), &[&format!("t{t}")]))
            .collect();

        let counts = ConfusionCounts::from_source(
            ConfusionSource::Exact { executions: &executions, faults: &faults },
            &EvalConfig::default(),
        );

        prop_assert_eq!(counts.mode, ConfusionMode::Exact);
        // The sum invariant holds whenever the saturating remainder did
        // not clip; validate() reports the clipped case
        if counts.validate(executions.len()).is_empty() {
            prop_assert_eq!(counts.total(), executions.len());
        }
    }

    #[test]
    fn prop_heuristic_counts_sum_to_total(
        total in 1usize..1000,
        selected_frac in 0.0f64..1.0,
        injected in 0usize..50,
        detected_frac in 0.0f64..1.0,
    ) {
        let selected = ((total as f64) * selected_frac) as usize;
        let detected = ((injected as f64) * detected_frac) as usize;

        let counts = ConfusionCounts::from_source(
            ConfusionSource::Heuristic(AggregateCounts {
                total_tests: total,
                selected_tests: selected,
                faults_injected: injected,
                faults_detected: detected,
            }),
            &EvalConfig::default(),
        );

        prop_assert_eq!(counts.total(), total);
        prop_assert!(counts.true_positives <= selected);
    }

    #[test]
    fn prop_mcc_bounded_and_f1_harmonic(
        tp in 0usize..100,
        fp in 0usize..100,
        tn in 0usize..100,
        fn_ in 0usize..100,
    ) {
        let metrics = ConfusionMetrics::from_counts(ConfusionCounts {
            true_positives: tp,
            false_positives: fp,
            true_negatives: tn,
            false_negatives: fn_,
            mode: ConfusionMode::Exact,
        });

        prop_assert!((-1.0..=1.0).contains(&metrics.mcc));
        prop_assert!((0.0..=1.0).contains(&metrics.precision));
        prop_assert!((0.0..=1.0).contains(&metrics.recall));

        if metrics.precision + metrics.recall == 0.0 {
            prop_assert_eq!(metrics.f1, 0.0);
        } else {
            let harmonic = 2.0 * metrics.precision * metrics.recall
                / (metrics.precision + metrics.recall);
            prop_assert!((metrics.f1 - harmonic).abs() < 1e-9);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_effect_size_antisymmetric(
        a in prop::collection::vec(-100.0f64..100.0, 2..30),
        b in prop::collection::vec(-100.0f64..100.0, 2..30),
    ) {
        let ab = cohens_d(&a, &b);
        let ba = cohens_d(&b, &a);
        prop_assert!((ab.cohens_d + ba.cohens_d).abs() < 1e-9);
    }

    #[test]
    fn prop_descriptive_stats_ordering_invariants(
        sample in prop::collection::vec(-1e6f64..1e6, 1..200),
    ) {
        let stats = DescriptiveStats::from_sample(&sample);

        prop_assert_eq!(stats.n, sample.len());
        prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
        prop_assert!(stats.q1 <= stats.q3);
        prop_assert!(stats.variance >= 0.0);
        prop_assert!(stats.std_dev >= 0.0);
        // Loose bound: summation rounding can nudge the mean by ulps
        prop_assert!(stats.min - 1e-6 <= stats.mean && stats.mean <= stats.max + 1e-6);
    }

    #[test]
    fn prop_outliers_lie_outside_fences(
        sample in prop::collection::vec(-1e3f64..1e3, 4..100),
    ) {
        let outliers = detect_outliers(&sample);
        for outlier in &outliers {
            prop_assert_eq!(sample[outlier.index], outlier.value);
        }
        prop_assert!(outliers.len() <= sample.len());
    }

    #[test]
    fn prop_plateau_never_panics_and_flat_plateaus(
        values in prop::collection::vec(0.0f64..1.0, 0..80),
        window in 1usize..12,
    ) {
        let _ = detect_plateau(&values, window);

        // A genuinely flat sequence long enough for two windows always
        // plateaus at the earliest boundary
        let flat = vec![0.5; window * 2];
        let result = detect_plateau(&flat, window);
        prop_assert!(result.has_plateaued);
        prop_assert_eq!(result.index, Some(window));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_estimate_metrics_never_produces_nan(
        total in 0usize..500,
        selected in 0usize..500,
        injected in 0usize..50,
        detected in 0usize..50,
    ) {
        let metrics = estimate_metrics(
            ConfusionSource::Heuristic(AggregateCounts {
                total_tests: total,
                selected_tests: selected.min(total),
                faults_injected: injected,
                faults_detected: detected,
            }),
            &EvalConfig::default(),
        );

        prop_assert!(metrics.precision.is_finite());
        prop_assert!(metrics.recall.is_finite());
        prop_assert!(metrics.f1.is_finite());
        prop_assert!(metrics.accuracy.is_finite());
        prop_assert!(metrics.mcc.is_finite());
        prop_assert!(metrics.balanced_accuracy.is_finite());
        prop_assert!(metrics.markedness.is_finite());
    }
}
