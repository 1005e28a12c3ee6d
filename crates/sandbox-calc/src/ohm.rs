//! Ohm's law: solve V = I·R for whichever quantity was left blank.

use std::fmt;

use sandbox_core::FieldValue;
use serde::Serialize;

use crate::error::{Error, Result, nonzero};

/// The quantity an Ohm's-law solve produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OhmQuantity {
    Voltage,
    Current,
    Resistance,
}

impl OhmQuantity {
    /// Unit symbol.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Voltage => "V",
            Self::Current => "A",
            Self::Resistance => "Ω",
        }
    }
}

impl fmt::Display for OhmQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Voltage => "Voltage",
            Self::Current => "Current",
            Self::Resistance => "Resistance",
        };
        f.write_str(name)
    }
}

/// All three quantities after a solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OhmsLawSolution {
    /// Which quantity was computed.
    pub solved_for: OhmQuantity,
    /// Voltage (V).
    pub voltage: f64,
    /// Current (A).
    pub current: f64,
    /// Resistance (Ω).
    pub resistance: f64,
}

impl OhmsLawSolution {
    /// Value of the computed quantity.
    pub fn value(&self) -> f64 {
        match self.solved_for {
            OhmQuantity::Voltage => self.voltage,
            OhmQuantity::Current => self.current,
            OhmQuantity::Resistance => self.resistance,
        }
    }
}

/// Solve Ohm's law given exactly two of voltage, current and resistance.
pub fn solve_ohms_law(
    voltage: Option<f64>,
    current: Option<f64>,
    resistance: Option<f64>,
) -> Result<OhmsLawSolution> {
    let solution = match (voltage, current, resistance) {
        (None, Some(i), Some(r)) => OhmsLawSolution {
            solved_for: OhmQuantity::Voltage,
            voltage: i * r,
            current: i,
            resistance: r,
        },
        (Some(v), None, Some(r)) => OhmsLawSolution {
            solved_for: OhmQuantity::Current,
            voltage: v,
            current: v / nonzero(r, "resistance")?,
            resistance: r,
        },
        (Some(v), Some(i), None) => OhmsLawSolution {
            solved_for: OhmQuantity::Resistance,
            voltage: v,
            current: i,
            resistance: v / nonzero(i, "current")?,
        },
        _ => {
            let found = [voltage, current, resistance]
                .iter()
                .filter(|v| v.is_some())
                .count();
            return Err(Error::WrongKnownCount { found });
        }
    };

    tracing::debug!(
        solved_for = %solution.solved_for,
        value = solution.value(),
        "ohm's law solved"
    );
    Ok(solution)
}

/// Solve from raw field states: blank fields are unknowns, malformed ones abort.
pub fn solve_ohms_law_fields(
    voltage: FieldValue,
    current: FieldValue,
    resistance: FieldValue,
) -> Result<OhmsLawSolution> {
    solve_ohms_law(
        voltage.into_option()?,
        current.into_option()?,
        resistance.into_option()?,
    )
}
