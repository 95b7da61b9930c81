// Cumulative fault-detection curve with trapezoidal area-under-curve
//
// The curve is what APFD integrates: x = % of the suite executed,
// y = % of detected faults found so far. The AUC is computed on the
// fraction scale with an implicit (0, 0) origin, so it lands in [0, 1].

use crate::record::TestExecutionRecord;
use serde::{Deserialize, Serialize};

/// One point of the cumulative fault-detection curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// 1-indexed test position in the ordering
    pub position: usize,

    /// Percentage of the suite executed after this position, in [0, 100]
    pub tests_executed_pct: f64,

    /// Percentage of detected faults found so far, in [0, 100]
    pub faults_detected_pct: f64,
}

/// The full curve plus its normalized area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaultDetectionCurve {
    /// One point per test position, in execution order
    pub points: Vec<CurvePoint>,

    /// Trapezoidal area under the curve on the fraction scale, in [0, 1]
    pub area_under_curve: f64,
}

/// Build the cumulative fault-detection curve for one ordered run
///
/// An empty run yields an empty curve with zero area. A run with no
/// detected faults yields a flat zero curve (the fault axis has nothing to
/// accumulate), also with zero area.
pub fn fault_detection_curve(executions: &[TestExecutionRecord]) -> FaultDetectionCurve {
    let n = executions.len();
    if n == 0 {
        return FaultDetectionCurve {
            points: Vec::new(),
            area_under_curve: 0.0,
        };
    }

    let m = executions.iter().filter(|r| r.fault_detected).count();

    let mut points = Vec::with_capacity(n);
    let mut detected = 0usize;
    for (idx, record) in executions.iter().enumerate() {
        if record.fault_detected {
            detected += 1;
        }
        let faults_fraction = if m == 0 {
            0.0
        } else {
            detected as f64 / m as f64
        };
        points.push(CurvePoint {
            position: idx + 1,
            tests_executed_pct: (idx + 1) as f64 / n as f64 * 100.0,
            faults_detected_pct: faults_fraction * 100.0,
        });
    }

    // Trapezoidal integration over consecutive points, fraction scale,
    // starting from the implicit origin (0, 0).
    let mut area = 0.0;
    let mut prev_x = 0.0;
    let mut prev_y = 0.0;
    for point in &points {
        let x = point.tests_executed_pct / 100.0;
        let y = point.faults_detected_pct / 100.0;
        area += (x - prev_x) * (y + prev_y) / 2.0;
        prev_x = x;
        prev_y = y;
    }

    FaultDetectionCurve {
        points,
        area_under_curve: area.clamp(0.0, 1.0),
    }
}
