// Approach-keyed registry of recorded efficiency profiles
//
// An explicit object owned by the experiment driver and passed by
// reference, never a module-level static. Appends are mutex-serialized;
// reads copy out snapshots.

use super::EfficiencyMetrics;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// One recorded profile of an approach at a given project size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyProfile {
    /// Approach label ("baseline", technique name, ...)
    pub approach: String,

    /// Project size in arbitrary but consistent units (LOC, files)
    pub project_size: u64,

    /// Test suite size at recording time
    pub test_suite_size: usize,

    /// Raw technique time of the run
    pub total_time_ms: u64,

    /// Raw peak memory of the run
    pub peak_memory_mb: f64,

    pub metrics: EfficiencyMetrics,
}

/// Bounded, approach-keyed profile store
#[derive(Debug)]
pub struct ProfileRegistry {
    retention: usize,
    profiles: Mutex<HashMap<String, VecDeque<EfficiencyProfile>>>,
}

impl ProfileRegistry {
    /// Create a registry keeping at most `retention` profiles per approach
    pub fn new(retention: usize) -> Self {
        Self {
            retention: retention.max(1),
            profiles: Mutex::new(HashMap::new()),
        }
    }

    /// Append one profile, evicting the oldest at the retention bound
    pub fn record(&self, profile: EfficiencyProfile) {
        let mut profiles = self.profiles.lock().expect("profile registry lock poisoned");
        let buffer = profiles.entry(profile.approach.clone()).or_default();
        if buffer.len() == self.retention {
            buffer.pop_front();
            tracing::debug!(
                approach = profile.approach,
                retention = self.retention,
                "profile registry at retention bound, evicting oldest"
            );
        }
        buffer.push_back(profile);
    }

    /// Copy out every profile of one approach, in recording order
    pub fn snapshot(&self, approach: &str) -> Vec<EfficiencyProfile> {
        let profiles = self.profiles.lock().expect("profile registry lock poisoned");
        profiles
            .get(approach)
            .map(|buffer| buffer.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// All approach labels present, sorted
    pub fn approaches(&self) -> Vec<String> {
        let profiles = self.profiles.lock().expect("profile registry lock poisoned");
        let mut labels: Vec<String> = profiles.keys().cloned().collect();
        labels.sort();
        labels
    }
}
