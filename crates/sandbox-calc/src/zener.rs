//! Zener shunt regulator design.
//!
//! Sizes the series resistor so the load can draw its full current while
//! 10% extra keeps the Zener in regulation, then reports the Zener power
//! rating needed when the load is disconnected.

use serde::Serialize;

use crate::error::{Error, Result, positive};

/// Fraction of the maximum load current reserved for the Zener at full load.
pub const ZENER_TEST_FRACTION: f64 = 0.1;

/// Regulator requirements.
#[derive(Debug, Clone, PartialEq)]
pub struct ZenerRegulator {
    /// Unregulated input voltage (V).
    pub input_voltage: f64,
    /// Zener voltage (V).
    pub zener_voltage: f64,
    /// Load resistance (Ω).
    pub load_resistance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZenerDesign {
    /// Maximum load current (A).
    pub max_load_current: f64,
    /// Zener current at full load (A).
    pub zener_test_current: f64,
    /// Current through the series resistor (A).
    pub series_current: f64,
    /// Series resistor (Ω).
    pub series_resistance: f64,
    /// Power dissipated in the series resistor (W).
    pub series_power: f64,
    /// Zener current with no load (A).
    pub no_load_zener_current: f64,
    /// Minimum Zener power rating (W).
    pub zener_power_rating: f64,
}

impl ZenerRegulator {
    pub fn design(&self) -> Result<ZenerDesign> {
        let vz = positive(self.zener_voltage, "Zener voltage")?;
        let rl = positive(self.load_resistance, "load resistance")?;
        if self.input_voltage <= vz {
            return Err(Error::InvalidDomain(format!(
                "input voltage {} V must exceed the Zener voltage {vz} V",
                self.input_voltage
            )));
        }

        let headroom = self.input_voltage - vz;
        let il_max = vz / rl;
        let iz_test = ZENER_TEST_FRACTION * il_max;
        let is = il_max + iz_test;
        let rs = headroom / is;
        let iz_noload = headroom / rs;

        tracing::debug!(rs, is, "zener regulator designed");
        Ok(ZenerDesign {
            max_load_current: il_max,
            zener_test_current: iz_test,
            series_current: is,
            series_resistance: rs,
            series_power: is * is * rs,
            no_load_zener_current: iz_noload,
            zener_power_rating: vz * iz_noload,
        })
    }
}
