//! s-domain transfer function of a series RLC circuit.

use std::f64::consts::PI;
use std::fmt;

use num_complex::Complex;
use serde::Serialize;

use crate::error::{Result, non_negative, positive};

/// Element the output voltage is measured across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RlcOutput {
    /// Band-pass response.
    Resistor,
    /// High-pass response.
    Inductor,
    /// Low-pass response.
    Capacitor,
}

impl RlcOutput {
    pub fn response_name(self) -> &'static str {
        match self {
            Self::Resistor => "band-pass",
            Self::Inductor => "high-pass",
            Self::Capacitor => "low-pass",
        }
    }
}

/// H(s) = (n2·s² + n1·s + n0) / (s² + d1·s + d0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransferFunction {
    pub output: RlcOutput,
    /// Numerator coefficients, highest power first.
    pub numerator: [f64; 3],
    /// Denominator coefficients, highest power first.
    pub denominator: [f64; 3],
}

impl TransferFunction {
    /// Build H(s) for a series RLC circuit.
    pub fn series_rlc(
        resistance: f64,
        inductance: f64,
        capacitance: f64,
        output: RlcOutput,
    ) -> Result<Self> {
        let r = non_negative(resistance, "resistance")?;
        let l = positive(inductance, "inductance")?;
        let c = positive(capacitance, "capacitance")?;

        let d1 = r / l;
        let d0 = 1.0 / (l * c);
        let numerator = match output {
            RlcOutput::Resistor => [0.0, d1, 0.0],
            RlcOutput::Inductor => [1.0, 0.0, 0.0],
            RlcOutput::Capacitor => [0.0, 0.0, d0],
        };

        Ok(Self {
            output,
            numerator,
            denominator: [1.0, d1, d0],
        })
    }

    /// Evaluate H(s) at an arbitrary complex frequency.
    pub fn at(&self, s: Complex<f64>) -> Complex<f64> {
        poly(&self.numerator, s) / poly(&self.denominator, s)
    }

    /// Evaluate H(j·2πf).
    pub fn evaluate(&self, frequency: f64) -> Complex<f64> {
        self.at(Complex::new(0.0, 2.0 * PI * frequency))
    }
}

fn poly(coeffs: &[f64; 3], s: Complex<f64>) -> Complex<f64> {
    // Horner
    coeffs
        .iter()
        .fold(Complex::new(0.0, 0.0), |acc, &c| acc * s + c)
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [_, d1, d0] = self.denominator;
        let num = match self.output {
            RlcOutput::Resistor => format!("{:.2}s", self.numerator[1]),
            RlcOutput::Inductor => "s^2".to_string(),
            RlcOutput::Capacitor => format!("{:.2e}", self.numerator[2]),
        };
        write!(f, "H(s) = ({num}) / (s^2 + {d1:.2}s + {d0:.2e})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients() {
        let h = TransferFunction::series_rlc(100.0, 0.1, 10e-6, RlcOutput::Resistor).unwrap();
        assert_eq!(h.denominator[0], 1.0);
        assert!((h.denominator[1] - 1000.0).abs() < 1e-9);
        assert!((h.denominator[2] - 1e6).abs() < 1e-3);
        assert!((h.numerator[1] - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_bandpass_unity_at_resonance() {
        let h = TransferFunction::series_rlc(100.0, 0.1, 10e-6, RlcOutput::Resistor).unwrap();
        let f0 = 1.0 / (2.0 * PI * (0.1_f64 * 10e-6).sqrt());
        let at_f0 = h.evaluate(f0);
        assert!((at_f0.norm() - 1.0).abs() < 1e-9);
        assert!(at_f0.arg().abs() < 1e-9);
    }

    #[test]
    fn test_lowpass_and_highpass_limits() {
        let lp = TransferFunction::series_rlc(100.0, 0.1, 10e-6, RlcOutput::Capacitor).unwrap();
        assert!((lp.evaluate(0.0).norm() - 1.0).abs() < 1e-12);
        assert!(lp.evaluate(1e6).norm() < 1e-4);

        let hp = TransferFunction::series_rlc(100.0, 0.1, 10e-6, RlcOutput::Inductor).unwrap();
        assert_eq!(hp.evaluate(0.0).norm(), 0.0);
        assert!((hp.evaluate(1e6).norm() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_display() {
        let h = TransferFunction::series_rlc(100.0, 0.1, 10e-6, RlcOutput::Inductor).unwrap();
        assert_eq!(h.to_string(), "H(s) = (s^2) / (s^2 + 1000.00s + 1.00e6)");
    }

    #[test]
    fn test_display_resistor_and_capacitor_numerators() {
        let bp = TransferFunction::series_rlc(100.0, 0.1, 10e-6, RlcOutput::Resistor).unwrap();
        assert_eq!(bp.to_string(), "H(s) = (1000.00s) / (s^2 + 1000.00s + 1.00e6)");

        let lp = TransferFunction::series_rlc(100.0, 0.1, 10e-6, RlcOutput::Capacitor).unwrap();
        assert_eq!(lp.to_string(), "H(s) = (1.00e6) / (s^2 + 1000.00s + 1.00e6)");

        let lp = TransferFunction::series_rlc(50.0, 10e-3, 1e-6, RlcOutput::Capacitor).unwrap();
        assert_eq!(lp.to_string(), "H(s) = (1.00e8) / (s^2 + 5000.00s + 1.00e8)");
    }

    #[test]
    fn test_requires_reactive_elements() {
        assert!(TransferFunction::series_rlc(100.0, 0.0, 10e-6, RlcOutput::Capacitor).is_err());
        assert!(TransferFunction::series_rlc(100.0, 0.1, 0.0, RlcOutput::Capacitor).is_err());
    }
}
