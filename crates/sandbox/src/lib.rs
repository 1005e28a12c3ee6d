//! # Circuit Sandbox
//!
//! Educational calculators for basic circuit analysis.
//!
//! The toolkit covers:
//! - Engineering-notation input (`4.7k`, `10u`, `2.2m`)
//! - Ohm's law, RC/RL step responses and series RLC AC analysis
//! - RC filters and series RLC transfer functions
//! - Divider-biased BJT amplifiers, ideal op-amps, silicon diodes and Zener
//!   regulators
//! - Logic gates and truth tables
//!
//! ## Quick Start
//!
//! ```rust
//! use sandbox::prelude::*;
//!
//! // Two of three quantities, typed the way a user would.
//! let current = parse_engineering("2m").unwrap();
//! let resistance = parse_engineering("4.7k").unwrap();
//!
//! let solution = solve_ohms_law(None, Some(current), Some(resistance)).unwrap();
//! assert_eq!(solution.solved_for, OhmQuantity::Voltage);
//! println!("V = {}V", format_value(solution.voltage));
//! ```
//!
//! ## AC Analysis
//!
//! ```rust
//! use sandbox::prelude::*;
//!
//! let analysis = SeriesRlc {
//!     resistance: 100.0,
//!     inductance: 0.1,
//!     capacitance: 10e-6,
//!     peak_voltage: 10.0,
//!     frequency: 60.0,
//! }
//! .analyze()
//! .unwrap();
//!
//! assert_eq!(analysis.power_factor_kind, PowerFactorKind::Leading);
//! let resonance = analysis.resonance.unwrap();
//! assert!((resonance.frequency - 159.155).abs() < 1e-3);
//! ```

// Re-export member crates
pub use sandbox_calc as calc;
pub use sandbox_core as core;

// ============================================================================
// Convenient re-exports from sandbox_core
// ============================================================================

pub use sandbox_core::{
    // Errors
    Error as InputError,
    Field,
    // Field values
    FieldValue,
    // Forms
    Form,
    format_value,
    // Parsing
    parse_engineering,
    si_factor,
};

// ============================================================================
// Convenient re-exports from sandbox_calc
// ============================================================================

pub use sandbox_calc::{
    Advisory,
    AmplifierAnalysis,
    Bit,
    BodePoint,
    // Configuration
    CalcConfig,
    // Diodes
    DiodeEstimate,
    DividerBias,
    // Errors
    Error as CalcError,
    FilterKind,
    FilterResponse,
    // Logic
    Gate,
    OhmQuantity,
    OhmsLawSolution,
    OpAmpAnalysis,
    OpAmpMode,
    PowerFactorKind,
    QPoint,
    RcCircuit,
    // Filters
    RcFilter,
    RcMode,
    Resonance,
    ResponseQuantity,
    RlCircuit,
    RlcAnalysis,
    RlcOutput,
    // AC analysis
    SeriesRlc,
    // Amplifiers
    Topology,
    TransferFunction,
    TransientResponse,
    TruthRow,
    ZenerDesign,
    ZenerRegulator,
    collector_current,
    dc_operating_point,
    forward_estimate,
    // Ohm's law
    solve_ohms_law,
    solve_ohms_law_fields,
};

/// Re-export of num_complex's Complex type.
pub use num_complex::Complex;

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Prelude module containing commonly used types.
///
/// ```rust
/// use sandbox::prelude::*;
/// ```
pub mod prelude {
    // Input
    pub use crate::{FieldValue, Form, format_value, parse_engineering};

    // Ohm's law
    pub use crate::{OhmQuantity, OhmsLawSolution, solve_ohms_law};

    // Transients
    pub use crate::{RcCircuit, RcMode, RlCircuit, TransientResponse};

    // AC
    pub use crate::{PowerFactorKind, RlcAnalysis, SeriesRlc};

    // Filters
    pub use crate::{FilterKind, RcFilter, RlcOutput, TransferFunction};

    // Amplifiers and regulators
    pub use crate::{DividerBias, OpAmpMode, Topology, ZenerRegulator, forward_estimate};

    // Logic
    pub use crate::{Bit, Gate};

    pub use crate::{Advisory, CalcConfig, Complex};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_solve() {
        let r = parse_engineering("1k").unwrap();
        let solution = solve_ohms_law(Some(5.0), None, Some(r)).unwrap();
        assert!((solution.current - 5e-3).abs() < 1e-15);
    }

    #[test]
    fn test_prelude_imports() {
        use crate::prelude::*;

        let mut form = Form::new("Op-Amp").with_field("rin", "Input resistor");
        form.set("rin", "1k").unwrap();
        assert_eq!(form.value("rin").unwrap(), FieldValue::Value(1000.0));

        assert_eq!(Gate::Xor.evaluate(Bit::One, Some(Bit::Zero)).unwrap(), Bit::One);
        let _ = Complex::new(0.0, 1.0);

        let diode = forward_estimate(parse_engineering("10m").unwrap()).unwrap();
        assert!((diode.power - 7e-3).abs() < 1e-15);
    }

    #[test]
    fn test_errors_convert() {
        let err: CalcError = InputError::Blank.into();
        assert!(matches!(err, CalcError::Input(InputError::Blank)));
    }
}
