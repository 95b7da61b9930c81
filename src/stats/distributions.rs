// Approximate distribution functions
//
// These are the methodology's documented simplifications, not library-grade
// special functions:
// - erf via Abramowitz & Stegun 7.1.26 (max absolute error 1.5e-7)
// - inverse normal CDF via Abramowitz & Stegun 26.2.23 (error < 4.5e-4)
// - t critical values via a coarse lookup covering only the 90/95/99%
//   levels over broad degrees-of-freedom bands

/// Error function, A&S 7.1.26 rational approximation
pub(crate) fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    sign * y
}

/// Standard normal CDF through the erf approximation
pub(crate) fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Inverse standard normal CDF, A&S 26.2.23 rational approximation
///
/// Clamped to p in (0, 1); the tails beyond ~1e-12 saturate.
pub(crate) fn inverse_normal_cdf(p: f64) -> f64 {
    const C0: f64 = 2.515517;
    const C1: f64 = 0.802853;
    const C2: f64 = 0.010328;
    const D1: f64 = 1.432788;
    const D2: f64 = 0.189269;
    const D3: f64 = 0.001308;

    let p = p.clamp(1e-12, 1.0 - 1e-12);
    let (tail_p, sign) = if p < 0.5 { (p, -1.0) } else { (1.0 - p, 1.0) };

    let t = (-2.0 * tail_p.ln()).sqrt();
    let numerator = C0 + C1 * t + C2 * t * t;
    let denominator = 1.0 + D1 * t + D2 * t * t + D3 * t * t * t;

    sign * (t - numerator / denominator)
}

/// Two-tailed p-value for a t statistic via the normal approximation
///
/// z = t * (1 - 1/(4 df)) / sqrt(1 + t^2 / (2 df)), then p = 2 (1 - Phi(|z|)).
/// Good to a few percent for df >= 3; exact as df -> infinity.
pub(crate) fn t_p_value(t: f64, df: f64) -> f64 {
    if df <= 0.0 {
        return 1.0;
    }
    let z = t * (1.0 - 1.0 / (4.0 * df)) / (1.0 + t * t / (2.0 * df)).sqrt();
    (2.0 * (1.0 - normal_cdf(z.abs()))).clamp(0.0, 1.0)
}

/// Coarse two-tailed t critical value lookup
///
/// Only the 90/95/99% levels are tabulated; other requested levels snap to
/// the nearest of the three. Degrees of freedom are bucketed into broad
/// bands, normal values from df >= 30.
pub(crate) fn t_critical(confidence: f64, df: f64) -> f64 {
    // Snap to the nearest supported level
    let levels = [0.90, 0.95, 0.99];
    let level = levels
        .iter()
        .copied()
        .min_by(|a, b| {
            (a - confidence)
                .abs()
                .partial_cmp(&(b - confidence).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(0.95);

    let column = if level == 0.90 {
        0
    } else if level == 0.95 {
        1
    } else {
        2
    };

    // df bands: [1,5), [5,10), [10,15), [15,30), [30,inf)
    let row: [f64; 3] = if df < 5.0 {
        [2.132, 2.776, 4.604]
    } else if df < 10.0 {
        [1.833, 2.262, 3.250]
    } else if df < 15.0 {
        [1.761, 2.145, 2.977]
    } else if df < 30.0 {
        [1.699, 2.045, 2.756]
    } else {
        [1.645, 1.960, 2.576]
    };

    row[column]
}
