//! Serialization for quantities that may be unbounded.
//!
//! JSON has no infinity, and `serde_json` writes non-finite floats as `null`,
//! which reads like a missing value. These helpers keep finite values numeric
//! and write the rest as `"inf"`, `"-inf"` or `"nan"`.

use num_complex::Complex;
use serde::ser::SerializeTuple;
use serde::{Serialize, Serializer};

/// `#[serde(serialize_with)]` helper for an `f64` field.
pub(crate) fn number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("nan")
    } else if value.is_sign_positive() {
        serializer.serialize_str("inf")
    } else {
        serializer.serialize_str("-inf")
    }
}

/// `#[serde(serialize_with)]` helper for a `Complex<f64>` field, written as
/// `[re, im]` like `num-complex` does.
pub(crate) fn complex<S: Serializer>(
    value: &Complex<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut tuple = serializer.serialize_tuple(2)?;
    tuple.serialize_element(&Part(value.re))?;
    tuple.serialize_element(&Part(value.im))?;
    tuple.end()
}

struct Part(f64);

impl Serialize for Part {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        number(&self.0, serializer)
    }
}
