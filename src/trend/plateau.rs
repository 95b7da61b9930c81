// Plateau detection over adjacent sliding windows
//
// A technique has plateaued when the mean of one window of iterations no
// longer moves relative to the previous window: relative change below 1%.

use serde::{Deserialize, Serialize};

/// Relative window-mean change below which the sequence counts as flat
const PLATEAU_THRESHOLD: f64 = 0.01;

/// Result of a plateau scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateauDetection {
    pub has_plateaued: bool,

    /// Start index of the confirming (second) window, the earliest point
    /// at which the plateau is observable. `None` when no plateau was
    /// found or the sequence is shorter than two windows.
    pub index: Option<usize>,
}

/// Scan for the first plateau with two adjacent windows of `window_size`
///
/// Slides both windows one step at a time and reports the first position
/// where the relative change between consecutive window means drops below
/// 1%. Sequences shorter than `2 * window_size` cannot be assessed.
pub fn detect_plateau(values: &[f64], window_size: usize) -> PlateauDetection {
    let window_size = window_size.max(1);
    if values.len() < 2 * window_size {
        return PlateauDetection {
            has_plateaued: false,
            index: None,
        };
    }

    for start in 0..=(values.len() - 2 * window_size) {
        let first = &values[start..start + window_size];
        let second = &values[start + window_size..start + 2 * window_size];

        let first_mean = first.iter().sum::<f64>() / window_size as f64;
        let second_mean = second.iter().sum::<f64>() / window_size as f64;

        let relative_change = (second_mean - first_mean).abs() / first_mean.abs().max(1e-10);
        if relative_change < PLATEAU_THRESHOLD {
            return PlateauDetection {
                has_plateaued: true,
                index: Some(start + window_size),
            };
        }
    }

    PlateauDetection {
        has_plateaued: false,
        index: None,
    }
}
