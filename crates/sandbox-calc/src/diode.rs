//! Constant-drop silicon diode model.

use serde::Serialize;

use crate::error::{Result, non_negative};

/// Forward drop of a conducting silicon junction (V).
pub const SILICON_FORWARD_VOLTAGE: f64 = 0.7;

/// Forward operating point under the constant-drop model.
///
/// The drop does not depend on current here; a real junction's V_f rises
/// slowly (logarithmically) with I.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiodeEstimate {
    /// Forward current (A).
    pub forward_current: f64,
    /// Forward voltage V_f (V).
    pub forward_voltage: f64,
    /// Dissipation V_f·I (W).
    pub power: f64,
}

/// Estimate the forward drop of a silicon diode carrying `current`.
pub fn forward_estimate(current: f64) -> Result<DiodeEstimate> {
    let current = non_negative(current, "forward current")?;
    Ok(DiodeEstimate {
        forward_current: current,
        forward_voltage: SILICON_FORWARD_VOLTAGE,
        power: SILICON_FORWARD_VOLTAGE * current,
    })
}
