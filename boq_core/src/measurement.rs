//! # Measurement Rows
//!
//! A BOQ work item is measured as an ordered list of rows in the classic
//! `Nos × L × B × D` layout. Section headers sit in the same list and carry
//! no quantity.
//!
//! ## Quantity rules
//!
//! | unit          | quantity            |
//! |---------------|---------------------|
//! | `m2`          | nos × l × b         |
//! | `m`           | nos × l             |
//! | `Hrs`, `Nos`  | nos                 |
//! | anything else | nos × l × b × d (d = 0 read as 1) |
//!
//! A manual override always wins.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::measurement::{MeasurementRow, Unit, calculate_total};
//!
//! let rows = vec![
//!     MeasurementRow::header("A. PCC BED"),
//!     MeasurementRow::new("PCC 1:4:8 for Foundation", 1.0, 40.0, 0.8, 0.1, Unit::CubicMeter),
//!     MeasurementRow::new("Clearing", 1.0, 0.0, 0.0, 0.0, Unit::Hours).with_override(8.0),
//! ];
//!
//! assert!((calculate_total(&rows) - 11.2).abs() < 1e-9);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::numeric;
use crate::units::round2;

/// Measurement unit of a row.
///
/// Unknown unit strings survive a round trip and are measured as volume.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    /// Cubic metres
    #[default]
    CubicMeter,
    /// Square metres
    SquareMeter,
    /// Running metres
    Meter,
    /// Machine / labour hours
    Hours,
    /// Count
    Numbers,
    /// Kilograms (measured as volume, like any other unit)
    Kilogram,
    /// No unit (section headers)
    None,
    /// Any other unit string
    Other(String),
}

impl Unit {
    /// Label as written in the BOQ.
    pub fn as_str(&self) -> &str {
        match self {
            Unit::CubicMeter => "m3",
            Unit::SquareMeter => "m2",
            Unit::Meter => "m",
            Unit::Hours => "Hrs",
            Unit::Numbers => "Nos",
            Unit::Kilogram => "Kg",
            Unit::None => "",
            Unit::Other(s) => s,
        }
    }
}

impl From<String> for Unit {
    fn from(s: String) -> Self {
        match s.as_str() {
            "m3" => Unit::CubicMeter,
            "m2" => Unit::SquareMeter,
            "m" => Unit::Meter,
            "Hrs" => Unit::Hours,
            "Nos" => Unit::Numbers,
            "Kg" => Unit::Kilogram,
            "" => Unit::None,
            _ => Unit::Other(s),
        }
    }
}

impl From<&str> for Unit {
    fn from(s: &str) -> Self {
        Unit::from(s.to_string())
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.as_str().to_string()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of a measurement sheet.
///
/// ## JSON Example
///
/// ```json
/// { "desc": "RCC Footing for C1", "nos": 4, "l": 1.0, "b": 1.0, "d": 0.45, "unit": "m3" }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeasurementRow {
    /// Description of the measured work
    #[serde(default)]
    pub desc: String,

    /// Number of identical items
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub nos: f64,

    /// Length (m)
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub l: f64,

    /// Breadth (m)
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub b: f64,

    /// Depth / height (m)
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub d: f64,

    /// Unit of the quantity
    #[serde(default)]
    pub unit: Unit,

    /// Manual quantity that replaces the computed one
    #[serde(default, deserialize_with = "numeric::lenient_opt", skip_serializing_if = "Option::is_none")]
    pub qty_override: Option<f64>,

    /// Section divider with no quantity
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_header: bool,
}

impl MeasurementRow {
    /// Create a measured row.
    pub fn new(desc: impl Into<String>, nos: f64, l: f64, b: f64, d: f64, unit: Unit) -> Self {
        MeasurementRow {
            desc: desc.into(),
            nos,
            l,
            b,
            d,
            unit,
            qty_override: None,
            is_header: false,
        }
    }

    /// Create a section header (`--- title ---`).
    pub fn header(title: &str) -> Self {
        MeasurementRow {
            desc: format!("--- {title} ---"),
            unit: Unit::None,
            is_header: true,
            ..Default::default()
        }
    }

    /// Set a manual quantity override
    pub fn with_override(mut self, quantity: f64) -> Self {
        self.qty_override = Some(quantity);
        self
    }

    /// Computed (or overridden) quantity.
    pub fn quantity(&self) -> f64 {
        calculate_quantity(self)
    }

    /// Quantity as printed in the BOQ (2 decimals).
    pub fn quantity_rounded(&self) -> f64 {
        round2(self.quantity())
    }
}

/// Quantity of one row.
///
/// ```rust
/// use boq_core::measurement::{calculate_quantity, MeasurementRow, Unit};
///
/// let area = MeasurementRow::new("Plaster", 2.0, 3.0, 4.0, 0.0, Unit::SquareMeter);
/// assert_eq!(calculate_quantity(&area), 24.0);
///
/// // zero depth counts as 1 for volume rows
/// let flat = MeasurementRow::new("Flat", 1.0, 2.0, 3.0, 0.0, Unit::CubicMeter);
/// assert_eq!(calculate_quantity(&flat), 6.0);
/// ```
pub fn calculate_quantity(row: &MeasurementRow) -> f64 {
    if row.is_header {
        return 0.0;
    }
    if let Some(quantity) = row.qty_override {
        if quantity.is_finite() {
            return quantity;
        }
    }

    let nos = finite(row.nos);
    let l = finite(row.l);
    let b = finite(row.b);
    let d = finite(row.d);

    match row.unit {
        Unit::SquareMeter => nos * l * b,
        Unit::Meter => nos * l,
        Unit::Hours | Unit::Numbers => nos,
        _ => nos * l * b * if d == 0.0 { 1.0 } else { d },
    }
}

/// Sum of all non-header rows.
pub fn calculate_total(rows: &[MeasurementRow]) -> f64 {
    rows.iter()
        .filter(|row| !row.is_header)
        .map(calculate_quantity)
        .sum()
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
