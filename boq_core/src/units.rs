//! # Unit Types
//!
//! Type-safe wrappers for the metric quantities the estimator reports. These
//! are plain `f64` newtypes that serialize as bare numbers.
//!
//! ## Units
//!
//! All geometry is entered and reported in SI:
//! - Length: metres (m)
//! - Area: square metres (m²)
//! - Volume: cubic metres (m³)
//!
//! ## Rounding
//!
//! Reported figures follow the usual BOQ convention: volumes to 3 decimal
//! places, areas and lengths to 2.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::units::{round3, CubicMeters, Meters};
//!
//! assert_eq!(Meters(15.0).to_string(), "15.00 m");
//! assert_eq!(round3(10.3456), 10.346);
//! assert_eq!(CubicMeters(10.3456).to_string(), "10.346 m³");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Round to a fixed number of decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(places);
    let rounded = (value * factor).round() / factor;
    // avoid reporting "-0.00"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Round to 2 decimal places (areas, lengths).
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round to 3 decimal places (volumes).
pub fn round3(value: f64) -> f64 {
    round_to(value, 3)
}

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

// ============================================================================
// Area and Volume
// ============================================================================

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMeters(pub f64);

/// Volume in cubic metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMeters(pub f64);

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} m", self.0)
    }
}

impl fmt::Display for SqMeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} m²", self.0)
    }
}

impl fmt::Display for CubicMeters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3} m³", self.0)
    }
}
