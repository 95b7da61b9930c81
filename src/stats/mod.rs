// Statistical comparison of selection techniques
//
// The decision procedure, the distributions, and the effect sizes here are
// the deliberately simplified approximations the evaluation methodology
// documents: an erf-based normal CDF (Abramowitz & Stegun 7.1.26), a
// normal approximation for t p-values, a coarse t-critical lookup for
// 90/95/99% intervals, and a Shapiro-Francia-style W substitute for
// normality. Swapping in exact distributions would silently change every
// published number, so the approximations are kept and named at each site.
//
// Scientific Foundation:
// [5] Welch, B. L. (1947). The generalization of "Student's" problem when
//     several different population variances are involved. Biometrika.
// [6] Mann, H. B., & Whitney, D. R. (1947). On a test of whether one of
//     two random variables is stochastically larger than the other. AMS.
// [8] Cohen, J. (1988). Statistical Power Analysis for the Behavioral
//     Sciences. 2nd ed.

mod comparison;
mod descriptive;
mod distributions;
mod effect;
mod history;
mod hypothesis;
mod outlier;
mod power;

pub use comparison::{
    compare_techniques, confidence_interval_for_difference, multiple_comparisons,
    recommend, ComparisonResult, MultipleComparisonResult, Recommendation,
};
pub use descriptive::DescriptiveStats;
pub use effect::{cohens_d, EffectMagnitude, EffectSize};
pub use history::{MetricHistoryStore, MetricKind, MetricSample};
pub use hypothesis::{
    mann_whitney_u, select_and_run_test, welch_t_test, StatisticalTest, TestMethod,
};
pub use outlier::{detect_outliers, Outlier};
pub use power::{power_analysis, PowerAnalysis};

pub(crate) use descriptive::percentile_of_sorted;
pub(crate) use distributions::t_p_value;

use serde::{Deserialize, Serialize};

/// Two-sided confidence interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    /// Confidence level the bounds were computed at (e.g. 0.95)
    pub level: f64,
}
