//! First-order passive RC filters.

use std::f64::consts::PI;

use num_complex::Complex;
use serde::Serialize;

use crate::error::{Result, positive};
use crate::sweep::logspace;

/// Which node the output is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Output across the capacitor.
    Lowpass,
    /// Output across the resistor.
    Highpass,
}

/// RC filter parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RcFilter {
    /// Resistance (Ω).
    pub resistance: f64,
    /// Capacitance (F).
    pub capacitance: f64,
    pub kind: FilterKind,
}

/// A single point of a Bode plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodePoint {
    /// Frequency (Hz).
    pub frequency: f64,
    /// Gain (dB).
    pub magnitude_db: f64,
    /// Phase (degrees).
    pub phase_deg: f64,
}

/// Filter analysis: cutoff plus a sampled magnitude/phase response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterResponse {
    pub kind: FilterKind,
    /// −3 dB frequency (Hz).
    pub cutoff_frequency: f64,
    pub bode: Vec<BodePoint>,
}

impl RcFilter {
    /// f_c = 1 / (2πRC).
    pub fn cutoff_frequency(&self) -> Result<f64> {
        positive(self.resistance, "resistance")?;
        positive(self.capacitance, "capacitance")?;
        Ok(1.0 / (2.0 * PI * self.resistance * self.capacitance))
    }

    /// Complex transfer function H(jf).
    pub fn transfer(&self, frequency: f64) -> Result<Complex<f64>> {
        let fc = self.cutoff_frequency()?;
        Ok(response(self.kind, fc, frequency))
    }

    /// Gain in dB at `frequency`.
    pub fn magnitude_db(&self, frequency: f64) -> Result<f64> {
        Ok(db(self.transfer(frequency)?))
    }

    /// Phase in degrees at `frequency`.
    pub fn phase_deg(&self, frequency: f64) -> Result<f64> {
        Ok(self.transfer(frequency)?.arg().to_degrees())
    }

    /// Log-spaced frequency range that shows both pass and stop band.
    pub fn sweep_range(&self) -> Result<(f64, f64)> {
        let decade = self.cutoff_frequency()?.log10();
        let range = match self.kind {
            FilterKind::Lowpass => (1.0, (decade + 3.0).trunc()),
            FilterKind::Highpass => (decade - 3.0, (decade + 2.0).trunc()),
        };
        Ok(range)
    }

    /// Cutoff frequency and a `points`-long Bode sweep.
    pub fn analyze(&self, points: usize) -> Result<FilterResponse> {
        let fc = self.cutoff_frequency()?;
        let (start, stop) = self.sweep_range()?;

        let bode = logspace(start, stop, points)
            .into_iter()
            .map(|f| {
                let h = response(self.kind, fc, f);
                BodePoint {
                    frequency: f,
                    magnitude_db: db(h),
                    phase_deg: h.arg().to_degrees(),
                }
            })
            .collect();

        tracing::debug!(fc, kind = ?self.kind, points, "RC filter analyzed");
        Ok(FilterResponse {
            kind: self.kind,
            cutoff_frequency: fc,
            bode,
        })
    }
}

fn response(kind: FilterKind, fc: f64, f: f64) -> Complex<f64> {
    let jw = Complex::new(0.0, f / fc);
    let one = Complex::new(1.0, 0.0);
    match kind {
        FilterKind::Lowpass => one / (one + jw),
        FilterKind::Highpass => jw / (one + jw),
    }
}

fn db(h: Complex<f64>) -> f64 {
    20.0 * h.norm().log10()
}
