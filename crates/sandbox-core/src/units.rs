//! Engineering notation and SI prefix handling.

use serde::Serialize;

use crate::error::{Error, Result};

/// Multiplier for a single-character SI suffix.
///
/// Supported suffixes (case-sensitive):
/// - G (giga, 1e9)
/// - M (mega, 1e6)
/// - k (kilo, 1e3)
/// - m (milli, 1e-3)
/// - u (micro, 1e-6)
/// - n (nano, 1e-9)
/// - p (pico, 1e-12)
pub fn si_factor(suffix: char) -> Option<f64> {
    let factor = match suffix {
        'G' => 1e9,
        'M' => 1e6,
        'k' => 1e3,
        'm' => 1e-3,
        'u' => 1e-6,
        'n' => 1e-9,
        'p' => 1e-12,
        _ => return None,
    };
    Some(factor)
}

/// Parse a value in engineering notation ("4.7k", "100n", "12").
///
/// Returns [`Error::Blank`] for an empty or whitespace-only string and
/// [`Error::InvalidNumber`] when the numeric part does not parse.
pub fn parse_engineering(s: &str) -> Result<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Error::Blank);
    }

    let invalid = || Error::InvalidNumber(s.to_string());

    // The last char is always a complete char boundary.
    let (num_str, factor) = match s.chars().next_back().and_then(si_factor) {
        Some(factor) => (&s[..s.len() - 1], factor),
        None => (s, 1.0),
    };

    // "4.7 k": whitespace may separate the number from its suffix.
    let value: f64 = num_str.trim_end().parse().map_err(|_| invalid())?;
    let value = value * factor;

    // "inf" and "NaN" parse as floats but are not engineering values.
    if !value.is_finite() {
        return Err(invalid());
    }

    Ok(value)
}

/// Outcome of reading one text field: left blank, malformed, or a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Nothing was entered.
    Blank,
    /// Text was entered but is not a number.
    Invalid(String),
    /// A parsed numeric value.
    Value(f64),
}

impl FieldValue {
    /// Classify raw field text.
    pub fn parse(s: &str) -> Self {
        match parse_engineering(s) {
            Ok(v) => Self::Value(v),
            Err(Error::Blank) => Self::Blank,
            Err(_) => Self::Invalid(s.trim().to_string()),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// The numeric value, if one was supplied and parsed.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// Blank becomes `None`; a malformed entry is an error.
    pub fn into_option(self) -> Result<Option<f64>> {
        match self {
            Self::Blank => Ok(None),
            Self::Invalid(raw) => Err(Error::InvalidNumber(raw)),
            Self::Value(v) => Ok(Some(v)),
        }
    }

    /// A value is required: blank and malformed are both errors.
    pub fn into_required(self) -> Result<f64> {
        match self {
            Self::Blank => Err(Error::Blank),
            Self::Invalid(raw) => Err(Error::InvalidNumber(raw)),
            Self::Value(v) => Ok(v),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

/// Format a value with appropriate SI prefix.
pub fn format_value(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if value.is_nan() {
        return "NaN".into();
    }

    let abs_value = value.abs();

    let (scaled, suffix) = if abs_value >= 1e9 {
        (value / 1e9, "G")
    } else if abs_value >= 1e6 {
        (value / 1e6, "M")
    } else if abs_value >= 1e3 {
        (value / 1e3, "k")
    } else if abs_value >= 1.0 {
        (value, "")
    } else if abs_value >= 1e-3 {
        (value * 1e3, "m")
    } else if abs_value >= 1e-6 {
        (value * 1e6, "u")
    } else if abs_value >= 1e-9 {
        (value * 1e9, "n")
    } else if abs_value >= 1e-12 {
        (value * 1e12, "p")
    } else if abs_value == 0.0 {
        (0.0, "")
    } else {
        (value, "")
    };

    format!("{:.4}{}", scaled, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < b.abs() * 1e-12 + 1e-30
    }

    #[test]
    fn test_parse_plain_number() {
        assert_eq!(parse_engineering("1.5"), Ok(1.5));
        assert_eq!(parse_engineering("-2.5"), Ok(-2.5));
        assert_eq!(parse_engineering("  12 "), Ok(12.0));
        assert_eq!(parse_engineering("1e-3"), Ok(1e-3));
    }

    #[test]
    fn test_parse_with_suffix() {
        let cases = [
            ("10p", 10e-12),
            ("100n", 100e-9),
            ("1u", 1e-6),
            ("2.2m", 2.2e-3),
            ("4.7k", 4.7e3),
            ("4M", 4e6),
            ("1.5G", 1.5e9),
        ];
        for (input, expected) in cases {
            let parsed = parse_engineering(input).unwrap();
            assert!(approx_eq(parsed, expected), "{input} -> {parsed}");
        }
    }

    #[test]
    fn test_suffix_matches_plain_product() {
        for prefix in ["1", "2.5", "-3", "0.47", "1e2"] {
            for suffix in ['p', 'n', 'u', 'm', 'k', 'M', 'G'] {
                let parsed = parse_engineering(&format!("{prefix}{suffix}")).unwrap();
                let expected = prefix.parse::<f64>().unwrap() * si_factor(suffix).unwrap();
                assert_eq!(parsed, expected, "{prefix}{suffix}");
            }
        }
    }

    #[test]
    fn test_space_before_suffix() {
        assert!(approx_eq(parse_engineering("4.7 k").unwrap(), 4.7e3));
        assert!(approx_eq(parse_engineering(" 10 u ").unwrap(), 10e-6));
        assert_eq!(FieldValue::parse("10 u"), FieldValue::Value(10.0 * 1e-6));
        assert_eq!(parse_engineering("k"), Err(Error::InvalidNumber("k".into())));
        assert_eq!(parse_engineering(" k"), Err(Error::InvalidNumber("k".into())));
        assert!(parse_engineering("4.7 x").is_err());
    }

    #[test]
    fn test_suffix_is_case_sensitive() {
        assert!(approx_eq(parse_engineering("10m").unwrap(), 10e-3));
        assert!(approx_eq(parse_engineering("10M").unwrap(), 10e6));
        assert_eq!(
            parse_engineering("10K"),
            Err(Error::InvalidNumber("10K".into()))
        );
    }

    #[test]
    fn test_parse_blank_and_invalid() {
        assert_eq!(parse_engineering(""), Err(Error::Blank));
        assert_eq!(parse_engineering("   "), Err(Error::Blank));
        assert_eq!(
            parse_engineering("abc"),
            Err(Error::InvalidNumber("abc".into()))
        );
        assert_eq!(parse_engineering("k"), Err(Error::InvalidNumber("k".into())));
        assert!(parse_engineering("inf").is_err());
        assert!(parse_engineering("NaN").is_err());
    }

    #[test]
    fn test_field_value_states() {
        assert_eq!(FieldValue::parse(""), FieldValue::Blank);
        assert_eq!(FieldValue::parse("1k"), FieldValue::Value(1000.0));
        assert_eq!(FieldValue::parse(" 1x "), FieldValue::Invalid("1x".into()));

        assert_eq!(FieldValue::Blank.into_option(), Ok(None));
        assert_eq!(FieldValue::Value(2.0).into_option(), Ok(Some(2.0)));
        assert!(FieldValue::Invalid("x".into()).into_option().is_err());
        assert_eq!(FieldValue::Blank.into_required(), Err(Error::Blank));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1000.0), "1.0000k");
        assert_eq!(format_value(0.001), "1.0000m");
        assert_eq!(format_value(1e-9), "1.0000n");
        assert_eq!(format_value(-4700.0), "-4.7000k");
        assert_eq!(format_value(0.0), "0.0000");
        assert_eq!(format_value(f64::INFINITY), "inf");
    }
}
