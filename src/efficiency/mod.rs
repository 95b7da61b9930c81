// Efficiency and throughput profiling of selection techniques
//
// Answers the cost side of the evaluation: what did running the technique
// cost, what execution time did its selection save, and how does that
// cost scale with project size. Complexity classification here is coarse
// threshold bucketing of observed measurements, not asymptotic analysis.

mod compare;
mod registry;
mod scalability;

pub use compare::{compare_efficiency, EfficiencyComparison, SignificanceBucket};
pub use registry::{EfficiencyProfile, ProfileRegistry};
pub use scalability::{analyze_scalability, ScalabilityAnalysis, ScalabilityTrend};

use serde::{Deserialize, Serialize};

/// Wall-clock breakdown of one technique run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingBreakdown {
    /// Total technique time: analysis plus selection
    pub total_time_ms: u64,

    /// Portion spent analyzing changes/history
    pub analysis_time_ms: u64,

    /// Test execution time avoided thanks to the selection
    pub execution_time_saved_ms: u64,
}

/// Peak resource usage of one technique run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub peak_memory_mb: f64,
}

/// Suite-size context of one technique run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCounts {
    /// Tests the technique analyzed (usually the full suite)
    pub tests_analyzed: usize,

    /// Tests it selected for execution
    pub tests_selected: usize,
}

/// Coarse complexity bucket from observed measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityClass {
    Constant,
    Linear,
    Linearithmic,
    Quadratic,
}

/// Derived efficiency metrics of one technique run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyMetrics {
    /// Tests analyzed per second of technique time
    pub throughput: f64,

    /// Technique time as a fraction of the execution time it saved;
    /// below 1.0 the technique pays for itself
    pub analysis_overhead: f64,

    /// Saved time per unit of technique time (inverse view of overhead)
    pub cost_benefit_ratio: f64,

    /// Threshold-bucketed time-per-test class
    pub time_complexity: ComplexityClass,

    /// Threshold-bucketed peak-memory class
    pub memory_complexity: ComplexityClass,
}

/// Bucket observed time-per-test (milliseconds) into a complexity class
fn classify_time(total_time_ms: u64, tests_analyzed: usize) -> ComplexityClass {
    let per_test = total_time_ms as f64 / tests_analyzed.max(1) as f64;
    if per_test < 0.1 {
        ComplexityClass::Constant
    } else if per_test < 1.0 {
        ComplexityClass::Linear
    } else if per_test < 10.0 {
        ComplexityClass::Linearithmic
    } else {
        ComplexityClass::Quadratic
    }
}

/// Bucket observed peak memory (MB) into a complexity class
fn classify_memory(peak_memory_mb: f64) -> ComplexityClass {
    if peak_memory_mb < 64.0 {
        ComplexityClass::Constant
    } else if peak_memory_mb < 256.0 {
        ComplexityClass::Linear
    } else if peak_memory_mb < 1024.0 {
        ComplexityClass::Linearithmic
    } else {
        ComplexityClass::Quadratic
    }
}

/// Compute efficiency metrics from one run's timing, resources, and counts
///
/// All divisions are guarded with `max(1, denominator)`; a zero-duration
/// or zero-saving run yields finite, documented values instead of
/// failing.
pub fn compute_efficiency(
    timing: &TimingBreakdown,
    resources: &ResourceUsage,
    counts: &TestCounts,
) -> EfficiencyMetrics {
    let total_seconds = timing.total_time_ms.max(1) as f64 / 1000.0;
    let throughput = counts.tests_analyzed as f64 / total_seconds;

    let analysis_overhead =
        timing.total_time_ms as f64 / timing.execution_time_saved_ms.max(1) as f64;
    let cost_benefit_ratio =
        timing.execution_time_saved_ms as f64 / timing.total_time_ms.max(1) as f64;

    EfficiencyMetrics {
        throughput,
        analysis_overhead,
        cost_benefit_ratio,
        time_complexity: classify_time(timing.total_time_ms, counts.tests_analyzed),
        memory_complexity: classify_memory(resources.peak_memory_mb),
    }
}
