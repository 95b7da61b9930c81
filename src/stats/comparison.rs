// Cross-technique comparison: descriptive stats, selected hypothesis
// test, effect size, interval for the difference, and multiple-comparison
// correction over all technique pairs.

use super::descriptive::DescriptiveStats;
use super::distributions::t_critical;
use super::effect::{cohens_d, EffectMagnitude, EffectSize};
use super::history::MetricKind;
use super::hypothesis::{select_and_run_test, StatisticalTest};
use super::ConfidenceInterval;
use crate::config::{CorrectionMethod, EvalConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Full result of comparing two techniques on one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub technique_a: String,
    pub technique_b: String,
    pub metric: MetricKind,

    pub stats_a: DescriptiveStats,
    pub stats_b: DescriptiveStats,

    /// The test the decision procedure selected and ran
    pub test: StatisticalTest,

    pub effect_size: EffectSize,

    /// Interval around mean_a - mean_b
    pub confidence_interval: ConfidenceInterval,

    /// Mirrors `test.is_significant` at the alpha the comparison ran with
    pub is_significant: bool,

    /// Deterministic textual verdict
    pub verdict: String,
}

impl ComparisonResult {
    /// Generate a human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!(
            "{} vs {} on {}\n",
            self.technique_a, self.technique_b, self.metric
        ));
        report.push_str(&format!(
            "  means: {:.4} vs {:.4} (n={} vs n={})\n",
            self.stats_a.mean, self.stats_b.mean, self.stats_a.n, self.stats_b.n
        ));
        report.push_str(&format!(
            "  {}: statistic={:.4}, p={:.4}\n",
            self.test.method, self.test.statistic, self.test.p_value
        ));
        report.push_str(&format!(
            "  effect size: d={:.3} ({})\n",
            self.effect_size.cohens_d, self.effect_size.magnitude
        ));
        report.push_str(&format!(
            "  {}% CI for difference: [{:.4}, {:.4}]\n",
            self.confidence_interval.level * 100.0,
            self.confidence_interval.lower,
            self.confidence_interval.upper
        ));
        report.push_str(&format!("  verdict: {}\n", self.verdict));

        report
    }
}

fn build_verdict(
    label_a: &str,
    label_b: &str,
    metric: MetricKind,
    stats_a: &DescriptiveStats,
    stats_b: &DescriptiveStats,
    test: &StatisticalTest,
    effect: &EffectSize,
) -> String {
    if !test.is_significant {
        return format!("no significant difference between '{label_a}' and '{label_b}' on {metric}");
    }

    let a_wins = if metric.higher_is_better() {
        stats_a.mean > stats_b.mean
    } else {
        stats_a.mean < stats_b.mean
    };
    let (winner, loser) = if a_wins {
        (label_a, label_b)
    } else {
        (label_b, label_a)
    };

    format!(
        "'{winner}' outperforms '{loser}' on {metric} (p={:.4}, {} effect)",
        test.p_value, effect.magnitude
    )
}

/// Compare two techniques' per-iteration samples of one metric
///
/// Runs the automatic test-selection procedure at
/// `config.significance_level`, computes Cohen's d, and brackets the mean
/// difference with the coarse t-critical interval at
/// `config.confidence_level`.
pub fn compare_techniques(
    label_a: &str,
    a: &[f64],
    label_b: &str,
    b: &[f64],
    metric: MetricKind,
    config: &EvalConfig,
) -> ComparisonResult {
    compare_with_alpha(label_a, a, label_b, b, metric, config, config.significance_level)
}

fn compare_with_alpha(
    label_a: &str,
    a: &[f64],
    label_b: &str,
    b: &[f64],
    metric: MetricKind,
    config: &EvalConfig,
    alpha: f64,
) -> ComparisonResult {
    let stats_a = DescriptiveStats::from_sample(a);
    let stats_b = DescriptiveStats::from_sample(b);

    let test = select_and_run_test(a, b, alpha);
    let effect_size = cohens_d(a, b);
    let confidence_interval =
        confidence_interval_for_difference(a, b, config.confidence_level);

    let verdict = build_verdict(
        label_a,
        label_b,
        metric,
        &stats_a,
        &stats_b,
        &test,
        &effect_size,
    );

    ComparisonResult {
        technique_a: label_a.to_string(),
        technique_b: label_b.to_string(),
        metric,
        is_significant: test.is_significant,
        stats_a,
        stats_b,
        test,
        effect_size,
        confidence_interval,
        verdict,
    }
}

/// Confidence interval for the difference of two sample means
///
/// Pooled standard error times the coarse t-critical value (90/95/99%
/// levels only), centered on mean_a - mean_b. Degenerate samples collapse
/// to a zero-width interval at the point difference.
pub fn confidence_interval_for_difference(
    a: &[f64],
    b: &[f64],
    level: f64,
) -> ConfidenceInterval {
    let stats_a = DescriptiveStats::from_sample(a);
    let stats_b = DescriptiveStats::from_sample(b);
    let difference = stats_a.mean - stats_b.mean;

    if stats_a.n < 2 || stats_b.n < 2 {
        return ConfidenceInterval {
            lower: difference,
            upper: difference,
            level,
        };
    }

    let standard_error =
        (stats_a.variance / stats_a.n as f64 + stats_b.variance / stats_b.n as f64).sqrt();
    let df = (stats_a.n + stats_b.n - 2) as f64;
    let margin = t_critical(level, df) * standard_error;

    ConfidenceInterval {
        lower: difference - margin,
        upper: difference + margin,
        level,
    }
}

/// Result of all pairwise comparisons with multiple-comparison correction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleComparisonResult {
    pub metric: MetricKind,

    /// Alpha each pairwise test actually ran at after correction
    pub corrected_alpha: f64,

    /// One result per unordered pair, ordered by (label_a, label_b)
    pub comparisons: Vec<ComparisonResult>,

    /// Count of pairs significant at the corrected alpha
    pub significant_after_correction: usize,

    /// Deterministic overall conclusion
    pub conclusion: String,
}

/// Run every pairwise comparison with the configured correction
///
/// Bonferroni divides alpha by the number of comparisons; labels are
/// processed in sorted order so results and conclusion are deterministic.
pub fn multiple_comparisons(
    samples_by_label: &HashMap<String, Vec<f64>>,
    metric: MetricKind,
    config: &EvalConfig,
) -> MultipleComparisonResult {
    let mut labels: Vec<&String> = samples_by_label.keys().collect();
    labels.sort();

    let num_comparisons = labels.len() * labels.len().saturating_sub(1) / 2;
    let corrected_alpha = match config.correction {
        CorrectionMethod::Bonferroni if num_comparisons > 0 => {
            config.significance_level / num_comparisons as f64
        }
        _ => config.significance_level,
    };

    let mut comparisons = Vec::with_capacity(num_comparisons);
    for (i, label_a) in labels.iter().enumerate() {
        for label_b in labels.iter().skip(i + 1) {
            comparisons.push(compare_with_alpha(
                label_a,
                &samples_by_label[*label_a],
                label_b,
                &samples_by_label[*label_b],
                metric,
                config,
                corrected_alpha,
            ));
        }
    }

    let significant_after_correction =
        comparisons.iter().filter(|c| c.is_significant).count();

    let conclusion = if num_comparisons == 0 {
        "fewer than two techniques, nothing to compare".to_string()
    } else if significant_after_correction == 0 {
        format!(
            "{num_comparisons} comparisons at corrected alpha={corrected_alpha:.4}: \
             no pair differs significantly on {metric}"
        )
    } else {
        format!(
            "{num_comparisons} comparisons at corrected alpha={corrected_alpha:.4}: \
             {significant_after_correction} pair(s) differ significantly on {metric}"
        )
    };

    MultipleComparisonResult {
        metric,
        corrected_alpha,
        comparisons,
        significant_after_correction,
        conclusion,
    }
}

/// Enumerated recommendation derived from one comparison
///
/// A pure function of the metrics; natural-language rendering beyond
/// `Display` is a presentation-layer concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Significant and technique A wins on the metric's polarity
    AdoptCandidate,
    /// Significant and technique B wins
    RetainBaseline,
    /// Not significant but the effect is non-negligible: underpowered
    CollectMoreData,
    /// Not significant and the effect is negligible
    NoPracticalDifference,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Recommendation::AdoptCandidate => {
                "adopt the candidate technique; the observed advantage is significant"
            }
            Recommendation::RetainBaseline => {
                "retain the baseline technique; the candidate is significantly worse"
            }
            Recommendation::CollectMoreData => {
                "collect more iterations; the observed effect is not yet significant"
            }
            Recommendation::NoPracticalDifference => {
                "no practical difference; choose on secondary criteria"
            }
        };
        write!(f, "{text}")
    }
}

/// Derive the recommendation tag for a comparison where technique A is
/// the candidate and technique B the baseline
pub fn recommend(result: &ComparisonResult) -> Recommendation {
    if result.is_significant {
        let a_wins = if result.metric.higher_is_better() {
            result.stats_a.mean > result.stats_b.mean
        } else {
            result.stats_a.mean < result.stats_b.mean
        };
        if a_wins {
            Recommendation::AdoptCandidate
        } else {
            Recommendation::RetainBaseline
        }
    } else if result.effect_size.magnitude == EffectMagnitude::Negligible {
        Recommendation::NoPracticalDifference
    } else {
        Recommendation::CollectMoreData
    }
}
