//! Ideal op-amp gain stages.
//!
//! The op-amp is ideal: infinite open-loop gain, infinite input impedance,
//! zero output impedance. The inverting input sits at virtual ground.

use serde::Serialize;

use crate::advisory::Advisory;
use crate::error::{Result, nonzero};

/// Feedback configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpAmpMode {
    Inverting,
    NonInverting,
}

/// Closed-loop figures of an ideal op-amp stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpAmpAnalysis {
    pub mode: OpAmpMode,
    /// Closed-loop voltage gain.
    pub voltage_gain: f64,
    /// Input impedance (Ω); unbounded for the non-inverting stage.
    #[serde(serialize_with = "crate::unbounded::number")]
    pub input_impedance: f64,
    /// Output impedance (Ω).
    pub output_impedance: f64,
    pub advisories: Vec<Advisory>,
}

/// Inverting amplifier: A_v = −R_f / R_in, Z_in = R_in.
pub fn inverting(r_in: f64, r_f: f64) -> Result<OpAmpAnalysis> {
    let gain = -r_f / nonzero(r_in, "input resistor")?;

    let mut advisories = Vec::new();
    if gain.abs() < 1.0 {
        advisories.push(Advisory::Attenuation { gain });
    }

    tracing::debug!(r_in, r_f, gain, "inverting op-amp");
    Ok(OpAmpAnalysis {
        mode: OpAmpMode::Inverting,
        voltage_gain: gain,
        input_impedance: r_in,
        output_impedance: 0.0,
        advisories,
    })
}

/// Non-inverting amplifier: A_v = 1 + R_f / R_in.
pub fn non_inverting(r_in: f64, r_f: f64) -> Result<OpAmpAnalysis> {
    let gain = 1.0 + r_f / nonzero(r_in, "input resistor")?;

    tracing::debug!(r_in, r_f, gain, "non-inverting op-amp");
    Ok(OpAmpAnalysis {
        mode: OpAmpMode::NonInverting,
        voltage_gain: gain,
        input_impedance: f64::INFINITY,
        output_impedance: 0.0,
        advisories: Vec::new(),
    })
}

/// Dispatch on [`OpAmpMode`].
pub fn analyze(mode: OpAmpMode, r_in: f64, r_f: f64) -> Result<OpAmpAnalysis> {
    match mode {
        OpAmpMode::Inverting => inverting(r_in, r_f),
        OpAmpMode::NonInverting => non_inverting(r_in, r_f),
    }
}
