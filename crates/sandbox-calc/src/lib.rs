//! Closed-form circuit calculators.
//!
//! This crate provides:
//! - Ohm's law solving for one unknown
//! - RC and RL step responses
//! - Series RLC AC analysis with resonance
//! - RC low-pass / high-pass filters and series RLC transfer functions
//! - Divider-biased BJT amplifiers (CE, CB, CC), silicon diodes and Zener
//!   regulators
//! - Ideal op-amp gain stages
//! - Logic gate evaluation
//!
//! Every calculator is a pure function of its inputs.

pub mod ac;
pub mod advisory;
pub mod bjt;
pub mod config;
pub mod diode;
pub mod error;
pub mod filter;
pub mod laplace;
pub mod logic;
pub mod ohm;
pub mod opamp;
pub mod sweep;
pub mod transient;
mod unbounded;
pub mod zener;

pub use ac::{PowerFactorKind, Resonance, RlcAnalysis, SeriesRlc, WaveformSample};
pub use advisory::Advisory;
pub use bjt::{
    AmplifierAnalysis, DividerBias, QPoint, Topology, collector_current, dc_operating_point,
    parallel,
};
pub use config::CalcConfig;
pub use diode::{DiodeEstimate, forward_estimate};
pub use error::{Error, Result};
pub use filter::{BodePoint, FilterKind, FilterResponse, RcFilter};
pub use laplace::{RlcOutput, TransferFunction};
pub use logic::{Bit, Gate, TruthRow};
pub use ohm::{OhmQuantity, OhmsLawSolution, solve_ohms_law, solve_ohms_law_fields};
pub use opamp::{OpAmpAnalysis, OpAmpMode};
pub use sweep::{Sample, linspace, logspace};
pub use transient::{RcCircuit, RcMode, ResponseQuantity, RlCircuit, TransientResponse};
pub use zener::{ZenerDesign, ZenerRegulator};
