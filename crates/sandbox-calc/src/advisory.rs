//! Non-fatal notices attached to otherwise valid results.

use std::fmt;

use serde::Serialize;

/// An informational warning that accompanies a valid result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Advisory {
    /// V_CE dropped below the configuration's headroom threshold.
    Saturation {
        /// Computed collector-emitter voltage (V).
        vce: f64,
        /// Threshold the configuration needs (V).
        threshold: f64,
    },
    /// The gain magnitude is below one: the stage attenuates.
    Attenuation {
        /// Computed voltage gain.
        gain: f64,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saturation { vce, threshold } => write!(
                f,
                "transistor may be in saturation (Vce = {vce:.2} V < {threshold} V); AC analysis may be invalid"
            ),
            Self::Attenuation { gain } => write!(
                f,
                "gain magnitude {:.2} is less than 1; this stage is an attenuator",
                gain.abs()
            ),
        }
    }
}
