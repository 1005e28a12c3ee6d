//! Error types for sandbox-calc.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] sandbox_core::Error),

    #[error("exactly two known values are required, got {found}")]
    WrongKnownCount { found: usize },

    #[error("division by zero: {0} cannot be zero")]
    DivisionByZero(&'static str),

    #[error("invalid input: {0}")]
    InvalidDomain(String),

    #[error("{gate} takes {expected} input(s), got {found}")]
    GateArity {
        gate: &'static str,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject a zero denominator.
pub(crate) fn nonzero(value: f64, what: &'static str) -> Result<f64> {
    if value == 0.0 {
        Err(Error::DivisionByZero(what))
    } else {
        Ok(value)
    }
}

/// Require a strictly positive, finite value.
pub(crate) fn positive(value: f64, what: &str) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidDomain(format!(
            "{what} must be positive, got {value}"
        )))
    }
}

/// Require a non-negative, finite value.
pub(crate) fn non_negative(value: f64, what: &str) -> Result<f64> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidDomain(format!(
            "{what} must not be negative, got {value}"
        )))
    }
}
