//! Combinational logic gates.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// A single binary digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Bit {
    Zero,
    One,
}

impl Bit {
    pub fn as_bool(self) -> bool {
        matches!(self, Self::One)
    }
}

impl From<bool> for Bit {
    fn from(b: bool) -> Self {
        if b { Self::One } else { Self::Zero }
    }
}

impl From<Bit> for u8 {
    fn from(b: Bit) -> Self {
        match b {
            Bit::Zero => 0,
            Bit::One => 1,
        }
    }
}

impl TryFrom<u8> for Bit {
    type Error = Error;

    fn try_from(v: u8) -> Result<Self> {
        match v {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            _ => Err(Error::InvalidDomain(format!("logic input must be 0 or 1, got {v}"))),
        }
    }
}

impl FromStr for Bit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "0" => Ok(Self::Zero),
            "1" => Ok(Self::One),
            other => Err(Error::InvalidDomain(format!(
                "logic input must be 0 or 1, got {other:?}"
            ))),
        }
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// Supported gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gate {
    And,
    Or,
    Nand,
    Nor,
    Xor,
    Not,
    Buf,
}

/// One row of a truth table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TruthRow {
    pub inputs: Vec<Bit>,
    pub output: Bit,
}

impl Gate {
    pub const ALL: [Gate; 7] = [
        Gate::And,
        Gate::Or,
        Gate::Nand,
        Gate::Nor,
        Gate::Xor,
        Gate::Not,
        Gate::Buf,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Nand => "NAND",
            Self::Nor => "NOR",
            Self::Xor => "XOR",
            Self::Not => "NOT",
            Self::Buf => "BUF",
        }
    }

    /// Number of inputs the gate consumes.
    pub fn arity(self) -> usize {
        match self {
            Self::Not | Self::Buf => 1,
            _ => 2,
        }
    }

    /// Evaluate the gate. Unary gates take `b = None`, binary gates require it.
    pub fn evaluate(self, a: Bit, b: Option<Bit>) -> Result<Bit> {
        let inputs: Vec<Bit> = std::iter::once(a).chain(b).collect();
        self.evaluate_slice(&inputs)
    }

    /// Gate function over exactly `arity()` inputs.
    fn apply(self, inputs: &[Bit]) -> Bit {
        debug_assert_eq!(inputs.len(), self.arity());
        let bit = |i: usize| inputs[i].as_bool();
        Bit::from(match self {
            Self::Not => !bit(0),
            Self::Buf => bit(0),
            Self::And => bit(0) && bit(1),
            Self::Or => bit(0) || bit(1),
            Self::Nand => !(bit(0) && bit(1)),
            Self::Nor => !(bit(0) || bit(1)),
            Self::Xor => bit(0) ^ bit(1),
        })
    }

    /// Evaluate with inputs given as a slice.
    pub fn evaluate_slice(self, inputs: &[Bit]) -> Result<Bit> {
        if inputs.len() != self.arity() {
            return Err(Error::GateArity {
                gate: self.name(),
                expected: self.arity(),
                found: inputs.len(),
            });
        }
        Ok(self.apply(inputs))
    }

    /// Every input combination in binary counting order.
    pub fn truth_table(self) -> Vec<TruthRow> {
        let rows = 1u8 << self.arity();
        (0..rows)
            .map(|row| {
                let inputs: Vec<Bit> = (0..self.arity())
                    .rev()
                    .map(|bit| Bit::from((row >> bit) & 1 == 1))
                    .collect();
                let output = self.apply(&inputs);
                TruthRow { inputs, output }
            })
            .collect()
    }
}

impl FromStr for Gate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|g| g.name() == upper)
            .ok_or_else(|| Error::InvalidDomain(format!("unknown gate: {s:?}")))
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
