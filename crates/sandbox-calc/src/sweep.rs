//! Evenly spaced sample grids.

use serde::Serialize;

/// One point of a sampled curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Independent variable (s or Hz).
    pub x: f64,
    /// Value at `x`.
    pub y: f64,
}

/// `num_points` values from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, num_points: usize) -> Vec<f64> {
    match num_points {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (stop - start) / (n as f64 - 1.0);
            // Pin the last point so rounding never overshoots `stop`.
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// `num_points` values from `10^start_exp` to `10^stop_exp`, evenly spaced in log10.
pub fn logspace(start_exp: f64, stop_exp: f64, num_points: usize) -> Vec<f64> {
    linspace(start_exp, stop_exp, num_points)
        .into_iter()
        .map(|e| 10.0_f64.powf(e))
        .collect()
}
