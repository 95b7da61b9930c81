// Derived classification metrics over the four confusion counts
//
// Every denominator is guarded: a zero denominator yields 0.0 for that
// metric, never a NaN or a panic. MCC keeps its [-1, 1] range because the
// guarded denominator only vanishes when a full row or column is empty.

use super::ConfusionCounts;
use serde::{Deserialize, Serialize};

/// The four counts plus the derived metric family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfusionMetrics {
    pub counts: ConfusionCounts,

    /// TP / (TP + FP)
    pub precision: f64,
    /// TP / (TP + FN)
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1: f64,
    /// (TP + TN) / total
    pub accuracy: f64,
    /// TN / (TN + FP)
    pub specificity: f64,
    /// Matthews correlation coefficient, in [-1, 1]
    pub mcc: f64,
    /// (recall + specificity) / 2
    pub balanced_accuracy: f64,
    /// recall + specificity - 1 (Youden's J)
    pub informedness: f64,
    /// TN / (TN + FN)
    pub npv: f64,
    /// precision + NPV - 1
    pub markedness: f64,
}

/// Guarded ratio: 0.0 whenever the denominator is 0
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

impl ConfusionMetrics {
    /// Derive the full metric family from a set of counts
    pub fn from_counts(counts: ConfusionCounts) -> Self {
        let tp = counts.true_positives as f64;
        let fp = counts.false_positives as f64;
        let tn = counts.true_negatives as f64;
        let fn_ = counts.false_negatives as f64;
        let total = tp + fp + tn + fn_;

        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        let accuracy = ratio(tp + tn, total);
        let specificity = ratio(tn, tn + fp);

        let mcc_denominator = ((tp + fp) * (tp + fn_) * (tn + fp) * (tn + fn_)).sqrt();
        let mcc = ratio(tp * tn - fp * fn_, mcc_denominator).clamp(-1.0, 1.0);

        let npv = ratio(tn, tn + fn_);

        Self {
            counts,
            precision,
            recall,
            f1,
            accuracy,
            specificity,
            mcc,
            balanced_accuracy: (recall + specificity) / 2.0,
            informedness: recall + specificity - 1.0,
            npv,
            markedness: precision + npv - 1.0,
        }
    }
}
