// Two-sample hypothesis testing with automatic test selection
//
// Decision procedure:
// 1. Normality: moment heuristic (|skewness| < 2 and |kurtosis - 3| < 2)
//    outside 3 <= n <= 50; inside that range a simplified
//    Shapiro-Francia-style W statistic (squared correlation between the
//    order statistics and approximate normal scores, threshold 0.90).
// 2. Equal variances: variance ratio < 2.
// 3. Both normal and equal-variance -> Welch's t-test; anything else ->
//    Mann-Whitney U with a normal-approximation p-value.
//
// All p-values flow through the approximate distributions in
// `distributions.rs`; that is a documented methodology decision.

use super::descriptive::DescriptiveStats;
use super::distributions::{inverse_normal_cdf, normal_cdf, t_p_value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which two-sample test the decision procedure ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestMethod {
    WelchT,
    MannWhitneyU,
}

impl fmt::Display for TestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestMethod::WelchT => write!(f, "Welch's t-test"),
            TestMethod::MannWhitneyU => write!(f, "Mann-Whitney U test"),
        }
    }
}

/// Uniform result of either two-sample test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticalTest {
    pub method: TestMethod,

    /// t statistic (Welch) or U statistic (Mann-Whitney)
    pub statistic: f64,

    /// Two-tailed p-value via the approximate distributions
    pub p_value: f64,

    /// p_value < alpha
    pub is_significant: bool,

    /// Deterministic one-line reading of the result
    pub interpretation: String,
}

fn interpret(p_value: f64, alpha: f64) -> String {
    if p_value < alpha {
        format!("significant difference (p={p_value:.4} < alpha={alpha})")
    } else {
        format!("no significant difference (p={p_value:.4} >= alpha={alpha})")
    }
}

/// Moment-based normality screen: |skewness| < 2 and |kurtosis - 3| < 2
fn moments_look_normal(stats: &DescriptiveStats) -> bool {
    stats.skewness.abs() < 2.0 && (stats.kurtosis - 3.0).abs() < 2.0
}

/// Simplified Shapiro-Francia W: squared correlation between the sorted
/// sample and approximate normal scores (Blom plotting positions)
///
/// A crude substitute for the full Shapiro-Wilk coefficients; only used
/// for 3 <= n <= 50 where the moment screen is unreliable.
fn shapiro_francia_w(sample: &[f64]) -> f64 {
    let n = sample.len();
    let mut sorted = sample.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let scores: Vec<f64> = (0..n)
        .map(|i| inverse_normal_cdf((i as f64 + 1.0 - 0.375) / (n as f64 + 0.25)))
        .collect();

    let mean_x = sorted.iter().sum::<f64>() / n as f64;
    let mean_s = scores.iter().sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_s = 0.0;
    for i in 0..n {
        let dx = sorted[i] - mean_x;
        let ds = scores[i] - mean_s;
        covariance += dx * ds;
        var_x += dx * dx;
        var_s += ds * ds;
    }

    if var_x == 0.0 || var_s == 0.0 {
        // Constant sample: perfectly "normal" in the degenerate sense
        return 1.0;
    }

    (covariance * covariance) / (var_x * var_s)
}

/// Normality decision used by the test-selection procedure
pub(crate) fn is_normal(sample: &[f64], stats: &DescriptiveStats) -> bool {
    let n = sample.len();
    if (3..=50).contains(&n) {
        shapiro_francia_w(sample) >= 0.90
    } else {
        moments_look_normal(stats)
    }
}

/// Equal-variance screen: ratio of the larger to the smaller variance < 2
pub(crate) fn variances_equal(a: &DescriptiveStats, b: &DescriptiveStats) -> bool {
    let (lo, hi) = if a.variance <= b.variance {
        (a.variance, b.variance)
    } else {
        (b.variance, a.variance)
    };
    if hi == 0.0 {
        return true; // both constant
    }
    if lo == 0.0 {
        return false; // one constant, one not
    }
    hi / lo < 2.0
}

/// Welch's two-sample t-test (unequal variances allowed)
///
/// Degrees of freedom via Welch-Satterthwaite; p-value via the normal
/// approximation to t. Degenerate samples (both constant, or fewer than
/// two observations on either side) yield statistic 0 and p = 1.
pub fn welch_t_test(a: &[f64], b: &[f64], alpha: f64) -> StatisticalTest {
    let stats_a = DescriptiveStats::from_sample(a);
    let stats_b = DescriptiveStats::from_sample(b);

    let (statistic, p_value) = if stats_a.n < 2 || stats_b.n < 2 {
        (0.0, 1.0)
    } else {
        let va_n = stats_a.variance / stats_a.n as f64;
        let vb_n = stats_b.variance / stats_b.n as f64;
        let se = (va_n + vb_n).sqrt();
        if se == 0.0 {
            (0.0, 1.0)
        } else {
            let t = (stats_a.mean - stats_b.mean) / se;
            // Welch-Satterthwaite degrees of freedom
            let df = (va_n + vb_n).powi(2)
                / (va_n.powi(2) / (stats_a.n as f64 - 1.0)
                    + vb_n.powi(2) / (stats_b.n as f64 - 1.0));
            (t, t_p_value(t, df))
        }
    };

    StatisticalTest {
        method: TestMethod::WelchT,
        statistic,
        p_value,
        is_significant: p_value < alpha,
        interpretation: interpret(p_value, alpha),
    }
}

/// Mann-Whitney U test with tie-averaged ranks
///
/// The p-value uses the large-sample normal approximation
/// z = (U - n1 n2 / 2) / sqrt(n1 n2 (n1 + n2 + 1) / 12); the reported
/// statistic is the smaller of the two U values.
pub fn mann_whitney_u(a: &[f64], b: &[f64], alpha: f64) -> StatisticalTest {
    let n1 = a.len();
    let n2 = b.len();

    if n1 == 0 || n2 == 0 {
        return StatisticalTest {
            method: TestMethod::MannWhitneyU,
            statistic: 0.0,
            p_value: 1.0,
            is_significant: false,
            interpretation: interpret(1.0, alpha),
        };
    }

    // Joint ranking with average ranks for ties
    let mut pooled: Vec<(f64, usize)> = a
        .iter()
        .map(|&v| (v, 0usize))
        .chain(b.iter().map(|&v| (v, 1usize)))
        .collect();
    pooled.sort_by(|x, y| x.0.partial_cmp(&y.0).unwrap_or(std::cmp::Ordering::Equal));

    let mut ranks = vec![0.0; pooled.len()];
    let mut i = 0;
    while i < pooled.len() {
        let mut j = i;
        while j + 1 < pooled.len() && pooled[j + 1].0 == pooled[i].0 {
            j += 1;
        }
        // Average rank for the tie group spanning positions i..=j
        let average = (i + j) as f64 / 2.0 + 1.0;
        for rank in ranks.iter_mut().take(j + 1).skip(i) {
            *rank = average;
        }
        i = j + 1;
    }

    let rank_sum_a: f64 = pooled
        .iter()
        .zip(ranks.iter())
        .filter(|((_, group), _)| *group == 0)
        .map(|(_, rank)| rank)
        .sum();

    let n1_f = n1 as f64;
    let n2_f = n2 as f64;
    let u1 = rank_sum_a - n1_f * (n1_f + 1.0) / 2.0;
    let u = u1.min(n1_f * n2_f - u1);

    let mean_u = n1_f * n2_f / 2.0;
    let sd_u = (n1_f * n2_f * (n1_f + n2_f + 1.0) / 12.0).sqrt();

    let p_value = if sd_u == 0.0 {
        1.0
    } else {
        let z = (u - mean_u) / sd_u;
        (2.0 * (1.0 - normal_cdf(z.abs()))).clamp(0.0, 1.0)
    };

    StatisticalTest {
        method: TestMethod::MannWhitneyU,
        statistic: u,
        p_value,
        is_significant: p_value < alpha,
        interpretation: interpret(p_value, alpha),
    }
}

/// Run the decision procedure and the selected test
pub fn select_and_run_test(a: &[f64], b: &[f64], alpha: f64) -> StatisticalTest {
    let stats_a = DescriptiveStats::from_sample(a);
    let stats_b = DescriptiveStats::from_sample(b);

    let parametric = is_normal(a, &stats_a)
        && is_normal(b, &stats_b)
        && variances_equal(&stats_a, &stats_b);

    tracing::debug!(
        parametric,
        n_a = stats_a.n,
        n_b = stats_b.n,
        "test selection decided"
    );

    if parametric {
        welch_t_test(a, b, alpha)
    } else {
        mann_whitney_u(a, b, alpha)
    }
}
