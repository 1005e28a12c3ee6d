//! Sampling resolution shared by the calculators.

use serde::{Deserialize, Serialize};

/// Resolution settings for sampled curves.
///
/// Every field has a default, so a partial JSON document is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Samples in an RC/RL transient curve.
    pub transient_points: usize,
    /// Samples in a filter Bode sweep.
    pub bode_points: usize,
    /// Samples in an AC voltage/current waveform.
    pub waveform_points: usize,
    /// Source periods covered by an AC waveform.
    pub waveform_periods: u32,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            transient_points: 500,
            bode_points: 500,
            waveform_points: 500,
            waveform_periods: 3,
        }
    }
}
