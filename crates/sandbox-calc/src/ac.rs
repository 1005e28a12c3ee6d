//! Series RLC circuit driven by a sinusoidal source.
//!
//! Covers impedance and phase, current, power, and (when both reactive
//! elements are present) resonance.

use std::f64::consts::{PI, SQRT_2};

use num_complex::Complex;
use serde::Serialize;

use crate::error::{Error, Result, non_negative, positive};
use crate::sweep::linspace;

/// Series RLC parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRlc {
    /// Resistance (Ω).
    pub resistance: f64,
    /// Inductance (H). Zero means no inductor.
    pub inductance: f64,
    /// Capacitance (F). Zero means no capacitor; its reactance is then unbounded.
    pub capacitance: f64,
    /// Source peak voltage (V).
    pub peak_voltage: f64,
    /// Source frequency (Hz).
    pub frequency: f64,
}

/// Whether current lags or leads the source voltage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerFactorKind {
    /// Inductive: current lags voltage.
    Lagging,
    /// Capacitive (or balanced): current leads voltage.
    Leading,
}

/// Resonance figures, present only when L and C are both non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Resonance {
    /// Resonant frequency f0 (Hz).
    pub frequency: f64,
    /// Quality factor Q.
    pub quality_factor: f64,
    /// Bandwidth f0/Q (Hz).
    pub bandwidth: f64,
    /// Source frequency minus f0 (Hz).
    pub detuning: f64,
}

/// Result of a series RLC analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RlcAnalysis {
    /// Angular frequency ω (rad/s).
    pub angular_frequency: f64,
    /// Inductive reactance X_L (Ω).
    pub inductive_reactance: f64,
    /// Capacitive reactance X_C (Ω).
    #[serde(serialize_with = "crate::unbounded::number")]
    pub capacitive_reactance: f64,
    /// Net reactance X_L − X_C (Ω).
    #[serde(serialize_with = "crate::unbounded::number")]
    pub net_reactance: f64,
    /// Complex impedance R + jX (Ω).
    #[serde(serialize_with = "crate::unbounded::complex")]
    pub impedance: Complex<f64>,
    /// |Z| (Ω).
    #[serde(serialize_with = "crate::unbounded::number")]
    pub impedance_magnitude: f64,
    /// Phase angle of Z (rad).
    pub phase_rad: f64,
    /// Phase angle of Z (degrees).
    pub phase_deg: f64,
    /// RMS source voltage (V).
    pub rms_voltage: f64,
    /// Peak current (A).
    pub peak_current: f64,
    /// RMS current (A).
    pub rms_current: f64,
    /// Real power P (W).
    pub real_power: f64,
    /// Reactive power Q (VAR).
    pub reactive_power: f64,
    /// Apparent power S (VA).
    pub apparent_power: f64,
    /// cos(φ).
    pub power_factor: f64,
    pub power_factor_kind: PowerFactorKind,
    pub resonance: Option<Resonance>,
    #[serde(skip)]
    peak_voltage: f64,
    #[serde(skip)]
    frequency: f64,
}

/// One instant of the source voltage and circuit current.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveformSample {
    /// Time (s).
    pub time: f64,
    /// Source voltage (V).
    pub voltage: f64,
    /// Circuit current (A).
    pub current: f64,
}

impl SeriesRlc {
    /// Analyze the circuit at the source frequency.
    pub fn analyze(&self) -> Result<RlcAnalysis> {
        let r = positive(self.resistance, "resistance")?;
        let f = positive(self.frequency, "frequency")?;
        let l = non_negative(self.inductance, "inductance")?;
        let c = non_negative(self.capacitance, "capacitance")?;
        if !self.peak_voltage.is_finite() {
            return Err(Error::InvalidDomain(format!(
                "peak voltage must be finite, got {}",
                self.peak_voltage
            )));
        }

        let omega = 2.0 * PI * f;
        let xl = omega * l;
        let xc = if c > 0.0 { 1.0 / (omega * c) } else { f64::INFINITY };
        let x = xl - xc;

        let z_mag = r.hypot(x);
        let phase_rad = x.atan2(r);

        let v_rms = self.peak_voltage / SQRT_2;
        let i_peak = self.peak_voltage / z_mag;
        let i_rms = v_rms / z_mag;

        // An open capacitor blocks all current; avoid 0·∞ in the reactive term.
        let (p, q) = if i_rms == 0.0 {
            (0.0, 0.0)
        } else {
            (i_rms * i_rms * r, i_rms * i_rms * x)
        };
        let s = v_rms * i_rms;

        let resonance = (l > 0.0 && c > 0.0).then(|| {
            let f0 = 1.0 / (2.0 * PI * (l * c).sqrt());
            let q_factor = (l / c).sqrt() / r;
            Resonance {
                frequency: f0,
                quality_factor: q_factor,
                bandwidth: f0 / q_factor,
                detuning: f - f0,
            }
        });

        let kind = if xl > xc {
            PowerFactorKind::Lagging
        } else {
            PowerFactorKind::Leading
        };

        tracing::debug!(omega, xl, xc, z_mag, phase_rad, "series RLC analyzed");

        Ok(RlcAnalysis {
            angular_frequency: omega,
            inductive_reactance: xl,
            capacitive_reactance: xc,
            net_reactance: x,
            impedance: Complex::new(r, x),
            impedance_magnitude: z_mag,
            phase_rad,
            phase_deg: phase_rad.to_degrees(),
            rms_voltage: v_rms,
            peak_current: i_peak,
            rms_current: i_rms,
            real_power: p,
            reactive_power: q,
            apparent_power: s,
            power_factor: phase_rad.cos(),
            power_factor_kind: kind,
            resonance,
            peak_voltage: self.peak_voltage,
            frequency: f,
        })
    }
}

impl RlcAnalysis {
    /// Sample v(t) = Vp·sin(ωt) and i(t) = Ip·sin(ωt − φ) over `periods` cycles.
    pub fn waveforms(&self, periods: u32, points: usize) -> Vec<WaveformSample> {
        let span = f64::from(periods.max(1)) / self.frequency;
        linspace(0.0, span, points)
            .into_iter()
            .map(|t| {
                let wt = self.angular_frequency * t;
                WaveformSample {
                    time: t,
                    voltage: self.peak_voltage * wt.sin(),
                    current: self.peak_current * (wt - self.phase_rad).sin(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn circuit(frequency: f64) -> SeriesRlc {
        SeriesRlc {
            resistance: 100.0,
            inductance: 0.1,
            capacitance: 10e-6,
            peak_voltage: 10.0,
            frequency,
        }
    }

    #[test]
    fn test_resonance_is_purely_resistive() {
        let f0 = 1.0 / (2.0 * PI * (0.1_f64 * 10e-6).sqrt());
        let a = circuit(f0).analyze().unwrap();
        assert!(a.net_reactance.abs() < 1e-9, "X = {}", a.net_reactance);
        assert!(a.phase_deg.abs() < 1e-9);
        assert!((a.impedance_magnitude - 100.0).abs() < 1e-9);
        assert!((a.power_factor - 1.0).abs() < 1e-12);

        let res = a.resonance.unwrap();
        assert!((res.frequency - f0).abs() < 1e-9);
        assert!((res.quality_factor - 1.0).abs() < 1e-12);
        assert!((res.bandwidth - f0).abs() < 1e-9);
        assert!(res.detuning.abs() < 1e-9);
    }

    #[test]
    fn test_inductive_above_resonance() {
        let a = circuit(1000.0).analyze().unwrap();
        assert!((a.inductive_reactance - 2.0 * PI * 100.0).abs() < 1e-9);
        assert!(a.net_reactance > 0.0);
        assert!(a.phase_deg > 0.0);
        assert_eq!(a.power_factor_kind, PowerFactorKind::Lagging);
    }

    #[test]
    fn test_capacitive_below_resonance() {
        let a = circuit(50.0).analyze().unwrap();
        assert!(a.net_reactance < 0.0);
        assert!(a.phase_deg < 0.0);
        assert_eq!(a.power_factor_kind, PowerFactorKind::Leading);
    }

    #[test]
    fn test_power_triangle() {
        let a = circuit(1000.0).analyze().unwrap();
        let s_from_pq = a.real_power.hypot(a.reactive_power);
        assert!((s_from_pq - a.apparent_power).abs() < 1e-9 * a.apparent_power);
        assert!((a.real_power / a.apparent_power - a.power_factor).abs() < 1e-9);
        assert!((a.rms_current * SQRT_2 - a.peak_current).abs() < 1e-12);
    }

    #[test]
    fn test_zero_capacitance_blocks_current() {
        let mut c = circuit(1000.0);
        c.capacitance = 0.0;
        let a = c.analyze().unwrap();
        assert!(a.capacitive_reactance.is_infinite());
        assert_eq!(a.rms_current, 0.0);
        assert_eq!(a.real_power, 0.0);
        assert_eq!(a.reactive_power, 0.0);
        assert!((a.phase_deg + 90.0).abs() < 1e-9);
        assert!(a.resonance.is_none());
    }

    #[test]
    fn test_open_capacitor_serializes_as_inf() {
        let mut c = circuit(1000.0);
        c.capacitance = 0.0;
        let json = serde_json::to_value(c.analyze().unwrap()).unwrap();
        assert_eq!(json["capacitive_reactance"], "inf");
        assert_eq!(json["net_reactance"], "-inf");
        assert_eq!(json["impedance_magnitude"], "inf");
        assert_eq!(json["impedance"][0], 100.0);
        assert_eq!(json["impedance"][1], "-inf");
        assert_eq!(json["rms_current"], 0.0);

        let json = serde_json::to_value(circuit(1000.0).analyze().unwrap()).unwrap();
        assert!(json["capacitive_reactance"].is_f64());
        assert!(json["impedance"][1].is_f64());
    }

    #[test]
    fn test_no_reactive_elements() {
        let mut c = circuit(1000.0);
        c.capacitance = 0.0;
        c.inductance = 0.0;
        // Neither element present: X_C is unbounded, so no current flows.
        let a = c.analyze().unwrap();
        assert!(a.resonance.is_none());
    }

    #[test]
    fn test_rejects_zero_frequency_and_resistance() {
        assert!(matches!(circuit(0.0).analyze(), Err(Error::InvalidDomain(_))));
        let mut c = circuit(50.0);
        c.resistance = 0.0;
        assert!(c.analyze().is_err());
    }

    #[test]
    fn test_waveforms_span_periods() {
        let a = circuit(50.0).analyze().unwrap();
        let w = a.waveforms(3, 301);
        assert_eq!(w.len(), 301);
        assert_eq!(w[0].voltage, 0.0);
        assert!((w[300].time - 3.0 / 50.0).abs() < 1e-15);
        let v_max = w.iter().map(|s| s.voltage).fold(f64::MIN, f64::max);
        assert!(v_max <= 10.0 && v_max > 9.9);
    }
}
