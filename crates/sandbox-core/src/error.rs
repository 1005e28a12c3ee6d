//! Error types for sandbox-core.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("no value provided")]
    Blank,

    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("missing value for {field}")]
    MissingValue { field: String },

    #[error("unknown field: {0}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, Error>;
