// Bounded, technique-keyed metric history
//
// The only long-lived mutable state in the crate. Appends are serialized
// through a mutex (single writer at a time); reads copy out a snapshot so
// they never hold the lock across downstream computation. The store is an
// explicit object owned by the experiment driver and passed by reference,
// never a hidden module-level singleton.

use crate::trend::LearningCurvePoint;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Mutex;

/// Exhaustive set of metrics the comparator and trend analyzer consume
///
/// String-keyed field lookup is deliberately absent: adding a metric means
/// adding a variant here, and the compiler walks every accessor match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Apfd,
    Accuracy,
    ReductionRatio,
    ExecutionTime,
    AdaptationCount,
}

impl MetricKind {
    /// Read this metric out of one learning-curve point
    pub fn extract(self, point: &LearningCurvePoint) -> f64 {
        match self {
            MetricKind::Apfd => point.apfd,
            MetricKind::Accuracy => point.accuracy,
            MetricKind::ReductionRatio => point.reduction_ratio,
            MetricKind::ExecutionTime => point.execution_time_ms as f64,
            MetricKind::AdaptationCount => point.adaptation_count as f64,
        }
    }

    /// Whether larger values of this metric are better
    ///
    /// Drives the direction of comparison verdicts: execution time
    /// improves downward, everything else upward.
    pub fn higher_is_better(self) -> bool {
        match self {
            MetricKind::Apfd
            | MetricKind::Accuracy
            | MetricKind::ReductionRatio => true,
            MetricKind::ExecutionTime | MetricKind::AdaptationCount => false,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MetricKind::Apfd => "apfd",
            MetricKind::Accuracy => "accuracy",
            MetricKind::ReductionRatio => "reduction_ratio",
            MetricKind::ExecutionTime => "execution_time",
            MetricKind::AdaptationCount => "adaptation_count",
        };
        write!(f, "{label}")
    }
}

/// One observed metric value for one technique at one iteration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub technique: String,
    pub metric: MetricKind,
    pub iteration: usize,
    pub value: f64,
}

/// Append-only, iteration-ordered metric history with bounded retention
///
/// Each (technique, metric) series keeps at most `retention` samples;
/// the oldest are evicted first.
#[derive(Debug)]
pub struct MetricHistoryStore {
    retention: usize,
    series: Mutex<HashMap<(String, MetricKind), VecDeque<MetricSample>>>,
}

impl MetricHistoryStore {
    /// Create a store keeping at most `retention` samples per series
    pub fn new(retention: usize) -> Self {
        Self {
            retention: retention.max(1),
            series: Mutex::new(HashMap::new()),
        }
    }

    /// Append one sample, evicting the oldest when the series is full
    pub fn record(&self, sample: MetricSample) {
        let mut series = self.series.lock().expect("metric history lock poisoned");
        let key = (sample.technique.clone(), sample.metric);
        let buffer = series.entry(key).or_default();
        if buffer.len() == self.retention {
            let evicted = buffer.pop_front();
            tracing::debug!(
                technique = sample.technique,
                metric = %sample.metric,
                evicted_iteration = evicted.map(|s| s.iteration),
                "metric history at retention bound, evicting oldest"
            );
        }
        buffer.push_back(sample);
    }

    /// Record every metric of one learning-curve point at once
    pub fn record_point(&self, technique: &str, point: &LearningCurvePoint) {
        for metric in [
            MetricKind::Apfd,
            MetricKind::Accuracy,
            MetricKind::ReductionRatio,
            MetricKind::ExecutionTime,
            MetricKind::AdaptationCount,
        ] {
            self.record(MetricSample {
                technique: technique.to_string(),
                metric,
                iteration: point.iteration,
                value: metric.extract(point),
            });
        }
    }

    /// Copy out the values of one series in iteration order
    pub fn values(&self, technique: &str, metric: MetricKind) -> Vec<f64> {
        let series = self.series.lock().expect("metric history lock poisoned");
        series
            .get(&(technique.to_string(), metric))
            .map(|buffer| buffer.iter().map(|s| s.value).collect())
            .unwrap_or_default()
    }

    /// Copy out the full samples of one series in iteration order
    pub fn samples(&self, technique: &str, metric: MetricKind) -> Vec<MetricSample> {
        let series = self.series.lock().expect("metric history lock poisoned");
        series
            .get(&(technique.to_string(), metric))
            .map(|buffer| buffer.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All technique labels present, sorted for deterministic iteration
    pub fn techniques(&self) -> Vec<String> {
        let series = self.series.lock().expect("metric history lock poisoned");
        let mut labels: Vec<String> = series.keys().map(|(label, _)| label.clone()).collect();
        labels.sort();
        labels.dedup();
        labels
    }

    /// Values of one metric for every technique, sorted by label
    pub fn values_by_technique(&self, metric: MetricKind) -> HashMap<String, Vec<f64>> {
        let mut result = HashMap::new();
        for technique in self.techniques() {
            let values = self.values(&technique, metric);
            if !values.is_empty() {
                result.insert(technique, values);
            }
        }
        result
    }
}
