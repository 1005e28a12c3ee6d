//! First-order RC and RL step responses.
//!
//! Both circuits settle exponentially with a single time constant, so the
//! response is evaluated in closed form at every sample instant rather than
//! integrated step by step.

use serde::Serialize;

use crate::error::{Error, Result, nonzero, non_negative, positive};
use crate::sweep::{Sample, linspace};

/// Number of time constants after which a first-order response is treated as settled.
pub const SETTLING_TIME_CONSTANTS: f64 = 5.0;

/// RC circuit operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RcMode {
    /// Capacitor charges from 0 V toward the supply voltage.
    Charging,
    /// Capacitor discharges from an initial voltage toward 0 V.
    Discharging,
}

/// What a transient curve measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseQuantity {
    /// Capacitor voltage (V).
    CapacitorVoltage,
    /// Inductor current (A).
    InductorCurrent,
}

/// RC circuit parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RcCircuit {
    /// Resistance (Ω).
    pub resistance: f64,
    /// Capacitance (F).
    pub capacitance: f64,
    /// Supply voltage when charging, initial capacitor voltage when discharging (V).
    pub voltage: f64,
    /// Simulated time span (s).
    pub duration: f64,
    pub mode: RcMode,
}

/// RL circuit parameters (energizing from a DC supply).
#[derive(Debug, Clone, PartialEq)]
pub struct RlCircuit {
    /// Resistance (Ω).
    pub resistance: f64,
    /// Inductance (H).
    pub inductance: f64,
    /// Supply voltage (V).
    pub voltage: f64,
    /// Simulated time span (s).
    pub duration: f64,
}

/// Sampled transient response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransientResponse {
    /// Time constant τ (s).
    pub time_constant: f64,
    pub quantity: ResponseQuantity,
    /// `(time, value)` samples from 0 to the requested duration.
    pub samples: Vec<Sample>,
    /// Value at the final sample.
    pub final_value: f64,
}

impl TransientResponse {
    fn sample(
        time_constant: f64,
        duration: f64,
        points: usize,
        quantity: ResponseQuantity,
        f: impl Fn(f64) -> f64,
    ) -> Result<Self> {
        if points < 2 {
            return Err(Error::InvalidDomain(format!(
                "at least 2 samples are required, got {points}"
            )));
        }
        let samples: Vec<Sample> = linspace(0.0, duration, points)
            .into_iter()
            .map(|t| Sample { x: t, y: f(t) })
            .collect();
        let final_value = samples.last().map_or(f(duration), |s| s.y);

        Ok(Self {
            time_constant,
            quantity,
            samples,
            final_value,
        })
    }
}

/// Suggested simulation span for a given time constant.
pub fn suggested_duration(time_constant: f64) -> f64 {
    SETTLING_TIME_CONSTANTS * time_constant
}

impl RcCircuit {
    /// τ = R·C.
    pub fn time_constant(&self) -> Result<f64> {
        positive(self.resistance, "resistance")?;
        positive(self.capacitance, "capacitance")?;
        positive(self.resistance * self.capacitance, "time constant")
    }

    /// Capacitor voltage at time `t`.
    pub fn voltage_at(&self, t: f64) -> Result<f64> {
        let tau = self.time_constant()?;
        Ok(rc_voltage(self.mode, self.voltage, tau, t))
    }

    /// Sample the capacitor voltage at `points` instants over the duration.
    pub fn response(&self, points: usize) -> Result<TransientResponse> {
        let tau = self.time_constant()?;
        let duration = non_negative(self.duration, "duration")?;
        let (mode, v) = (self.mode, self.voltage);

        tracing::debug!(tau, ?mode, points, "sampling RC response");
        TransientResponse::sample(
            tau,
            duration,
            points,
            ResponseQuantity::CapacitorVoltage,
            |t| rc_voltage(mode, v, tau, t),
        )
    }
}

impl RlCircuit {
    /// τ = L/R.
    pub fn time_constant(&self) -> Result<f64> {
        let r = nonzero(self.resistance, "resistance")?;
        positive(r, "resistance")?;
        positive(self.inductance, "inductance")?;
        positive(self.inductance / r, "time constant")
    }

    /// Steady-state current V/R (A).
    pub fn final_current(&self) -> Result<f64> {
        Ok(self.voltage / nonzero(self.resistance, "resistance")?)
    }

    /// Inductor current at time `t`.
    pub fn current_at(&self, t: f64) -> Result<f64> {
        let tau = self.time_constant()?;
        Ok(rl_current(self.final_current()?, tau, t))
    }

    /// Sample the inductor current at `points` instants over the duration.
    pub fn response(&self, points: usize) -> Result<TransientResponse> {
        let tau = self.time_constant()?;
        let i_final = self.final_current()?;
        let duration = non_negative(self.duration, "duration")?;

        tracing::debug!(tau, i_final, points, "sampling RL response");
        TransientResponse::sample(
            tau,
            duration,
            points,
            ResponseQuantity::InductorCurrent,
            |t| rl_current(i_final, tau, t),
        )
    }
}

fn rc_voltage(mode: RcMode, v: f64, tau: f64, t: f64) -> f64 {
    match mode {
        RcMode::Charging => v * (1.0 - (-t / tau).exp()),
        RcMode::Discharging => v * (-t / tau).exp(),
    }
}

fn rl_current(i_final: f64, tau: f64, t: f64) -> f64 {
    i_final * (1.0 - (-t / tau).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn rc(mode: RcMode) -> RcCircuit {
        RcCircuit {
            resistance: 1e3,
            capacitance: 1e-6,
            voltage: 5.0,
            duration: 5e-3,
            mode,
        }
    }

    #[test]
    fn test_rc_time_constant() {
        assert!((rc(RcMode::Charging).time_constant().unwrap() - 1e-3).abs() < 1e-15);
        assert!((suggested_duration(1e-3) - 5e-3).abs() < 1e-15);
    }

    #[test]
    fn test_rc_charging_curve() {
        let resp = rc(RcMode::Charging).response(500).unwrap();
        assert_eq!(resp.samples.len(), 500);
        assert_eq!(resp.samples[0].x, 0.0);
        assert_eq!(resp.samples[0].y, 0.0);
        assert_eq!(resp.samples[499].x, 5e-3);
        // 5τ reaches 1 - e^-5 of the supply.
        let expected = 5.0 * (1.0 - (-5.0_f64).exp());
        assert!((resp.final_value - expected).abs() < 1e-9);
        assert!((resp.final_value / 5.0 - 0.99326).abs() < 1e-4);
        assert!(resp.samples.windows(2).all(|w| w[1].y >= w[0].y));
    }

    #[test]
    fn test_rc_discharging_curve() {
        let circuit = rc(RcMode::Discharging);
        let resp = circuit.response(100).unwrap();
        assert_eq!(resp.samples[0].y, 5.0);
        let at_tau = circuit.voltage_at(1e-3).unwrap();
        assert!((at_tau - 5.0 * (-1.0_f64).exp()).abs() < 1e-12);
        assert!(resp.samples.windows(2).all(|w| w[1].y <= w[0].y));
    }

    #[test]
    fn test_rc_rejects_zero_time_constant() {
        let mut circuit = rc(RcMode::Charging);
        circuit.capacitance = 0.0;
        assert!(matches!(circuit.response(10), Err(Error::InvalidDomain(_))));
    }

    #[test]
    fn test_fewer_than_two_samples_rejected() {
        let circuit = rc(RcMode::Charging);
        for points in [0, 1] {
            assert!(matches!(circuit.response(points), Err(Error::InvalidDomain(_))));
        }
        assert_eq!(circuit.response(2).unwrap().samples.len(), 2);

        let rl = RlCircuit {
            resistance: 10.0,
            inductance: 0.1,
            voltage: 12.0,
            duration: 0.05,
        };
        assert!(matches!(rl.response(1), Err(Error::InvalidDomain(_))));
    }

    #[test]
    fn test_rl_energizing() {
        let circuit = RlCircuit {
            resistance: 10.0,
            inductance: 0.1,
            voltage: 12.0,
            duration: 0.05,
        };
        assert!((circuit.time_constant().unwrap() - 0.01).abs() < 1e-15);
        let resp = circuit.response(500).unwrap();
        assert_eq!(resp.quantity, ResponseQuantity::InductorCurrent);
        assert_eq!(resp.samples[0].y, 0.0);
        let expected = 1.2 * (1.0 - (-5.0_f64).exp());
        assert!((resp.final_value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_rl_zero_resistance() {
        let circuit = RlCircuit {
            resistance: 0.0,
            inductance: 0.1,
            voltage: 12.0,
            duration: 0.05,
        };
        assert_eq!(
            circuit.response(10),
            Err(Error::DivisionByZero("resistance"))
        );
    }

    #[test]
    fn test_negative_duration_rejected() {
        let mut circuit = rc(RcMode::Charging);
        circuit.duration = -1.0;
        assert!(circuit.response(10).is_err());
    }
}
