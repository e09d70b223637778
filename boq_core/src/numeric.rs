//! Lenient numeric coercion for input records.
//!
//! Form fields arrive as numbers, numeric strings, expression strings or
//! nothing at all. These helpers run once at deserialization so the
//! formulas downstream only ever see finite `f64` values.
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Row {
//!     #[serde(default, deserialize_with = "boq_core::numeric::lenient")]
//!     width: f64,
//! }
//!
//! let row: Row = serde_json::from_str(r#"{ "width": "0.23" }"#).unwrap();
//! assert_eq!(row.width, 0.23);
//!
//! let row: Row = serde_json::from_str(r#"{ "width": "" }"#).unwrap();
//! assert_eq!(row.width, 0.0);
//!
//! let row: Row = serde_json::from_str("{}").unwrap();
//! assert_eq!(row.width, 0.0);
//! ```

use serde::{Deserialize, Deserializer};

use crate::expression::Expression;

/// Any value → finite `f64`, with expression strings evaluated.
pub fn lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Expression::deserialize(deserializer)?.value())
}

/// Like [`lenient`], but negative results read as zero.
pub fn lenient_non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(lenient(deserializer)?.max(0.0))
}

/// `None` for empty/null input, otherwise the evaluated value.
///
/// Used where "left blank" must fall back to a default while an explicit
/// `0` stays zero.
pub fn lenient_opt<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let expr = Expression::deserialize(deserializer)?;
    if expr.is_empty() {
        Ok(None)
    } else {
        Ok(Some(expr.value()))
    }
}

/// Like [`lenient_opt`], but a negative value reads as zero.
pub fn lenient_opt_non_negative<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(lenient_opt(deserializer)?.map(|v| v.max(0.0)))
}

/// Clamp a coerced value at zero.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Replace non-positive values with a default.
pub fn positive_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Dims {
        #[serde(default, deserialize_with = "lenient")]
        any: f64,
        #[serde(default, deserialize_with = "lenient_non_negative")]
        positive: f64,
        #[serde(default, deserialize_with = "lenient_opt")]
        optional: Option<f64>,
        #[serde(default, deserialize_with = "lenient_opt_non_negative")]
        optional_positive: Option<f64>,
    }

    #[test]
    fn test_lenient_inputs() {
        let p: Dims = serde_json::from_str(r#"{ "any": "2+3", "positive": -4, "optional": "" }"#).unwrap();
        assert_eq!(p.any, 5.0);
        assert_eq!(p.positive, 0.0);
        assert_eq!(p.optional, None);

        let p: Dims = serde_json::from_str(r#"{ "any": null, "positive": "abc", "optional": 0 }"#).unwrap();
        assert_eq!(p.any, 0.0);
        assert_eq!(p.positive, 0.0);
        assert_eq!(p.optional, Some(0.0));
    }

    #[test]
    fn test_optional_non_negative() {
        let p: Dims = serde_json::from_str(r#"{ "optional": -2, "optional_positive": -2 }"#).unwrap();
        assert_eq!(p.optional, Some(-2.0));
        assert_eq!(p.optional_positive, Some(0.0));

        let p: Dims = serde_json::from_str(r#"{ "optional_positive": "1.5+1" }"#).unwrap();
        assert_eq!(p.optional_positive, Some(2.5));

        let p: Dims = serde_json::from_str(r#"{ "optional_positive": "" }"#).unwrap();
        assert_eq!(p.optional_positive, None);
    }

    #[test]
    fn test_missing_fields_default() {
        let p: Dims = serde_json::from_str("{}").unwrap();
        assert_eq!(p.any, 0.0);
        assert_eq!(p.positive, 0.0);
        assert_eq!(p.optional, None);
    }

    #[test]
    fn test_positive_or() {
        assert_eq!(positive_or(1.5, 1.0), 1.5);
        assert_eq!(positive_or(0.0, 1.0), 1.0);
        assert_eq!(positive_or(-2.0, 1.2), 1.2);
        assert_eq!(positive_or(f64::NAN, 0.23), 0.23);
        assert_eq!(non_negative(-0.5), 0.0);
    }
}
