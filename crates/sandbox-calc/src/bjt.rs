//! Voltage-divider biased BJT amplifiers.
//!
//! The DC stage is shared by all three configurations: a resistive divider
//! sets the base voltage, a fixed 0.7 V junction drop gives the emitter
//! voltage, and the collector current is taken equal to the emitter current.
//! The small-signal stage uses the internal emitter resistance
//! r_e' = 26 mV / I_E and differs per configuration.

use std::fmt;

use serde::Serialize;

use crate::advisory::Advisory;
use crate::error::{Error, Result, non_negative, nonzero, positive};

/// Base-emitter junction drop of a silicon transistor (V).
pub const VBE_ON: f64 = 0.7;

/// Thermal voltage used for r_e' (V).
pub const THERMAL_VOLTAGE: f64 = 26e-3;

/// Default forward current gain for collector-current estimates.
pub const DEFAULT_BETA: f64 = 100.0;

/// Default forward current gain for divider-biased amplifier stages.
pub const AMPLIFIER_DEFAULT_BETA: f64 = 150.0;

/// Amplifier configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Topology {
    /// Common emitter: inverting, high gain.
    CommonEmitter,
    /// Common base: non-inverting, low input impedance.
    CommonBase,
    /// Common collector (emitter follower): near-unity gain buffer.
    CommonCollector,
}

impl Topology {
    /// V_CE below this value flags possible saturation (V).
    ///
    /// The emitter follower needs more headroom than the CE/CB stages.
    pub fn saturation_threshold(self) -> f64 {
        match self {
            Self::CommonEmitter | Self::CommonBase => 0.2,
            Self::CommonCollector => 1.0,
        }
    }

    /// Whether the configuration has a collector resistor.
    pub fn has_collector_resistor(self) -> bool {
        !matches!(self, Self::CommonCollector)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CommonEmitter => "common-emitter",
            Self::CommonBase => "common-base",
            Self::CommonCollector => "common-collector",
        };
        f.write_str(name)
    }
}

/// Voltage-divider bias network.
#[derive(Debug, Clone, PartialEq)]
pub struct DividerBias {
    /// Supply voltage (V).
    pub vcc: f64,
    /// Upper divider resistor (Ω).
    pub r1: f64,
    /// Lower divider resistor (Ω).
    pub r2: f64,
    /// Collector resistor (Ω). Ignored for the common-collector stage.
    pub rc: f64,
    /// Emitter resistor (Ω).
    pub re: f64,
    /// Forward current gain β.
    pub beta: f64,
}

/// DC operating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QPoint {
    /// Base voltage (V).
    pub vb: f64,
    /// Emitter voltage (V).
    pub ve: f64,
    /// Collector voltage (V).
    pub vc: f64,
    /// Emitter current (A).
    pub ie: f64,
    /// Collector current (A).
    pub ic: f64,
    /// Collector-emitter voltage (V).
    pub vce: f64,
}

/// DC and small-signal results for one configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmplifierAnalysis {
    pub topology: Topology,
    pub q_point: QPoint,
    /// Internal emitter resistance r_e' (Ω).
    pub emitter_resistance: f64,
    /// Voltage gain A_v.
    pub voltage_gain: f64,
    /// Input impedance (Ω).
    pub input_impedance: f64,
    /// Output impedance (Ω).
    pub output_impedance: f64,
    pub advisories: Vec<Advisory>,
}

/// Parallel combination of two resistances.
pub fn parallel(a: f64, b: f64) -> f64 {
    if a.is_infinite() {
        return b;
    }
    if b.is_infinite() {
        return a;
    }
    let sum = a + b;
    if sum == 0.0 { 0.0 } else { a * b / sum }
}

/// Solve the divider-biased DC operating point.
///
/// Pass `rc = 0` for a stage without a collector resistor.
pub fn dc_operating_point(vcc: f64, r1: f64, r2: f64, rc: f64, re: f64) -> Result<QPoint> {
    non_negative(r1, "R1")?;
    non_negative(r2, "R2")?;
    non_negative(rc, "Rc")?;
    positive(re, "Re")?;

    let vb = vcc * r2 / nonzero(r1 + r2, "R1 + R2")?;
    let ve = vb - VBE_ON;
    let ie = ve / nonzero(re, "Re")?;
    if ie <= 0.0 {
        return Err(Error::InvalidDomain(format!(
            "transistor is in cutoff: base voltage {vb:.3} V does not exceed {VBE_ON} V"
        )));
    }
    let ic = ie;
    let vc = vcc - ic * rc;

    Ok(QPoint {
        vb,
        ve,
        vc,
        ie,
        ic,
        vce: vc - ve,
    })
}

/// Collector current in the active region: I_C = β·I_B.
pub fn collector_current(base_current: f64, beta: Option<f64>) -> Result<f64> {
    let beta = positive(beta.unwrap_or(DEFAULT_BETA), "beta")?;
    Ok(base_current * beta)
}

impl DividerBias {
    /// Analyze the amplifier in the given configuration.
    pub fn analyze(&self, topology: Topology) -> Result<AmplifierAnalysis> {
        let rc = if topology.has_collector_resistor() {
            self.rc
        } else {
            0.0
        };
        let q = dc_operating_point(self.vcc, self.r1, self.r2, rc, self.re)?;
        let re_prime = THERMAL_VOLTAGE / q.ie;
        let bias = parallel(self.r1, self.r2);

        let (gain, zin, zout) = match topology {
            Topology::CommonEmitter => {
                let z_base = positive(self.beta, "beta")? * (re_prime + self.re);
                // Emitter resistor assumed bypassed for AC.
                (-rc / re_prime, parallel(z_base, bias), rc)
            }
            Topology::CommonBase => (rc / re_prime, parallel(self.re, re_prime), rc),
            Topology::CommonCollector => {
                let z_base = positive(self.beta, "beta")? * (re_prime + self.re);
                (
                    self.re / (re_prime + self.re),
                    parallel(bias, z_base),
                    parallel(self.re, re_prime),
                )
            }
        };

        let mut advisories = Vec::new();
        let threshold = topology.saturation_threshold();
        if q.vce < threshold {
            tracing::warn!(%topology, vce = q.vce, threshold, "transistor near saturation");
            advisories.push(Advisory::Saturation {
                vce: q.vce,
                threshold,
            });
        }

        tracing::debug!(%topology, ie = q.ie, re_prime, gain, "amplifier analyzed");
        Ok(AmplifierAnalysis {
            topology,
            q_point: q,
            emitter_resistance: re_prime,
            voltage_gain: gain,
            input_impedance: zin,
            output_impedance: zout,
            advisories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    // Textbook divider: Vcc = 12 V, R1 = 10k, R2 = 2.2k, Rc = 3.6k, Re = 1k.
    fn bias() -> DividerBias {
        DividerBias {
            vcc: 12.0,
            r1: 10e3,
            r2: 2.2e3,
            rc: 3.6e3,
            re: 1e3,
            beta: 150.0,
        }
    }

    #[test]
    fn test_dc_operating_point() {
        let q = dc_operating_point(12.0, 10e3, 2.2e3, 3.6e3, 1e3).unwrap();
        let vb = 12.0 * 2.2 / 12.2;
        assert!(close(q.vb, vb, 1e-12));
        assert!(close(q.ve, vb - 0.7, 1e-12));
        assert!(close(q.ie, (vb - 0.7) / 1e3, 1e-15));
        assert_eq!(q.ic, q.ie);
        assert!(close(q.vce, 12.0 - q.ic * 3.6e3 - q.ve, 1e-12));
    }

    #[test]
    fn test_common_emitter() {
        let a = bias().analyze(Topology::CommonEmitter).unwrap();
        let ie = (12.0 * 2.2 / 12.2 - 0.7) / 1e3;
        let re_prime = 0.026 / ie;
        assert!(close(a.emitter_resistance, re_prime, 1e-9));
        assert!(close(a.voltage_gain, -3.6e3 / re_prime, 1e-9));
        assert!(a.voltage_gain < -100.0);
        let z_base = 150.0 * (re_prime + 1e3);
        let expected = parallel(z_base, parallel(10e3, 2.2e3));
        assert!(close(a.input_impedance, expected, 1e-9));
        assert_eq!(a.output_impedance, 3.6e3);
        assert!(a.advisories.is_empty());
    }

    #[test]
    fn test_common_base() {
        let a = bias().analyze(Topology::CommonBase).unwrap();
        let re_prime = a.emitter_resistance;
        assert!(a.voltage_gain > 0.0);
        assert!(close(a.voltage_gain, 3.6e3 / re_prime, 1e-9));
        assert!(a.input_impedance < re_prime);
        assert_eq!(a.output_impedance, 3.6e3);
    }

    #[test]
    fn test_common_collector() {
        let a = bias().analyze(Topology::CommonCollector).unwrap();
        // No collector resistor: V_CE = Vcc − V_E.
        assert!(close(a.q_point.vce, 12.0 - a.q_point.ve, 1e-12));
        assert!(a.voltage_gain > 0.95 && a.voltage_gain < 1.0);
        assert!(a.output_impedance < a.emitter_resistance);
        assert!(a.input_impedance > 1e3);
    }

    #[test]
    fn test_saturation_thresholds() {
        // V_CE between the CE/CB and CC thresholds.
        let mut b = bias();
        b.rc = 0.0;
        b.vcc = 2.0;
        b.r1 = 1e3;
        b.r2 = 1e3;
        // V_B = 1.0, V_E = 0.3, V_CE = 1.7 with no Rc
        assert!(b.analyze(Topology::CommonCollector).unwrap().advisories.is_empty());

        b.vcc = 1.6;
        // V_B = 0.8, V_E = 0.1, V_CE = 1.5 → still fine for CC
        assert!(b.analyze(Topology::CommonCollector).unwrap().advisories.is_empty());

        b.vcc = 1.8;
        b.r2 = 0.2e3;
        b.r1 = 0.0;
        // V_B = 1.8, V_E = 1.1, V_CE = 0.7: below the CC threshold only
        let cc = b.analyze(Topology::CommonCollector).unwrap();
        assert_eq!(
            cc.advisories,
            vec![Advisory::Saturation {
                vce: cc.q_point.vce,
                threshold: 1.0
            }]
        );
        let ce = b.analyze(Topology::CommonEmitter).unwrap();
        assert!(ce.advisories.is_empty());
    }

    #[test]
    fn test_common_emitter_saturation_is_advisory() {
        let mut b = bias();
        b.rc = 10e3;
        let a = b.analyze(Topology::CommonEmitter).unwrap();
        assert!(a.q_point.vce < 0.2);
        assert!(matches!(
            a.advisories.as_slice(),
            [Advisory::Saturation { threshold, .. }] if *threshold == 0.2
        ));
    }

    #[test]
    fn test_cutoff_and_zero_divisors() {
        let mut b = bias();
        b.vcc = 1.0;
        assert!(matches!(
            b.analyze(Topology::CommonEmitter),
            Err(Error::InvalidDomain(_))
        ));

        let mut b = bias();
        b.r1 = 0.0;
        b.r2 = 0.0;
        assert_eq!(
            b.analyze(Topology::CommonBase),
            Err(Error::DivisionByZero("R1 + R2"))
        );

        let mut b = bias();
        b.re = 0.0;
        assert!(b.analyze(Topology::CommonBase).is_err());
    }

    #[test]
    fn test_collector_current() {
        assert!(close(collector_current(20e-6, None).unwrap(), 2e-3, 1e-15));
        assert!(close(collector_current(20e-6, Some(250.0)).unwrap(), 5e-3, 1e-15));
        assert!(collector_current(20e-6, Some(0.0)).is_err());
    }

    #[test]
    fn test_parallel() {
        assert_eq!(parallel(2.0, 2.0), 1.0);
        assert_eq!(parallel(f64::INFINITY, 5.0), 5.0);
        assert_eq!(parallel(0.0, 0.0), 0.0);
    }
}
