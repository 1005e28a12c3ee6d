//! Core input handling for circuit-sandbox.
//!
//! This crate provides the pieces every calculator shares: parsing numbers
//! written in engineering notation (`4.7k`, `100n`), telling a blank field
//! apart from a malformed one, and grouping named fields into forms.

pub mod error;
pub mod form;
pub mod units;

pub use error::{Error, Result};
pub use form::{Field, Form};
pub use units::{FieldValue, format_value, parse_engineering, si_factor};
