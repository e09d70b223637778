//! # Walls and Wall Adjustments
//!
//! A [`WallSegment`] is one physical wall run with a single thickness and
//! height. A [`WallAdjustment`] is a correction for whatever the rectangle
//! model misses: a raised gable adds, a lowered sill band deducts.
//!
//! ## Per-segment quantities
//!
//! | quantity  | formula          |
//! |-----------|------------------|
//! | volume    | l × b × h        |
//! | area      | l × h × 2 faces  |
//! | footprint | l × b            |
//! | lintel    | l × b × 0.15     |

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expression::Expression;
use crate::numeric;

use super::LINTEL_DEPTH;

/// Default storey height for a new wall (m)
pub const DEFAULT_WALL_HEIGHT: f64 = 3.0;

/// Where a wall segment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WallKind {
    Exterior,
    Interior,
    #[default]
    Custom,
}

/// One wall run on a floor.
///
/// ## JSON Example
///
/// ```json
/// { "name": "Exterior Walls", "kind": "Exterior", "length": "10+5", "width": 0.23, "height": 3.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallSegment {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub kind: WallKind,

    /// Running length, may be an expression
    #[serde(default)]
    pub length: Expression,

    /// Thickness (m)
    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub width: f64,

    /// Height (m)
    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub height: f64,

    /// Counted in gross volume and area, but not in the plinth footprint
    #[serde(default)]
    pub is_plinth_exempt: bool,
}

impl WallSegment {
    pub fn new(kind: WallKind, name: impl Into<String>, length: impl Into<Expression>, width: f64, height: f64) -> Self {
        WallSegment {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            length: length.into(),
            width: numeric::non_negative(width),
            height: numeric::non_negative(height),
            is_plinth_exempt: false,
        }
    }

    pub fn exempt(mut self) -> Self {
        self.is_plinth_exempt = true;
        self
    }

    /// Evaluated length (m)
    pub fn length_m(&self) -> f64 {
        self.length.value()
    }

    pub fn volume(&self) -> f64 {
        self.length_m() * self.width * self.height
    }

    /// Plaster area of both faces.
    pub fn face_area(&self) -> f64 {
        self.length_m() * self.height * 2.0
    }

    pub fn footprint(&self) -> f64 {
        self.length_m() * self.width
    }

    /// Lintel band volume along the full length.
    pub fn lintel_volume(&self) -> f64 {
        self.length_m() * self.width * LINTEL_DEPTH
    }
}

/// Whether an adjustment adds to or deducts from the walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentMode {
    #[default]
    Add,
    Deduct,
}

impl AdjustmentMode {
    pub fn sign(&self) -> f64 {
        match self {
            AdjustmentMode::Add => 1.0,
            AdjustmentMode::Deduct => -1.0,
        }
    }
}

impl fmt::Display for AdjustmentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdjustmentMode::Add => write!(f, "add"),
            AdjustmentMode::Deduct => write!(f, "deduct"),
        }
    }
}

/// Irregular wall correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallAdjustment {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub mode: AdjustmentMode,

    #[serde(default)]
    pub length: Expression,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub width: f64,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub height: f64,
}

impl WallAdjustment {
    /// Addition with defaults 0.23 wide, 1.0 high.
    pub fn addition(name: impl Into<String>, length: impl Into<Expression>) -> Self {
        Self::with_mode(AdjustmentMode::Add, name, length, 1.0)
    }

    /// Deduction with defaults 0.23 wide, 0.9 high.
    pub fn deduction(name: impl Into<String>, length: impl Into<Expression>) -> Self {
        Self::with_mode(AdjustmentMode::Deduct, name, length, 0.9)
    }

    fn with_mode(mode: AdjustmentMode, name: impl Into<String>, length: impl Into<Expression>, height: f64) -> Self {
        WallAdjustment {
            id: Uuid::new_v4(),
            name: name.into(),
            mode,
            length: length.into(),
            width: crate::setup::DEFAULT_WALL_WIDTH,
            height,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = numeric::non_negative(width);
        self.height = numeric::non_negative(height);
        self
    }

    pub fn is_addition(&self) -> bool {
        self.mode == AdjustmentMode::Add
    }

    pub fn length_m(&self) -> f64 {
        self.length.value()
    }

    /// Unsigned volume l × b × h.
    pub fn volume(&self) -> f64 {
        self.length_m() * self.width * self.height
    }

    /// Volume with the mode's sign applied.
    pub fn signed_volume(&self) -> f64 {
        self.mode.sign() * self.volume()
    }

    /// Area of both faces with the mode's sign applied.
    pub fn signed_area(&self) -> f64 {
        self.mode.sign() * self.length_m() * self.height * 2.0
    }

    /// Plan footprint, additions only.
    pub fn footprint(&self) -> f64 {
        if self.is_addition() {
            self.length_m() * self.width
        } else {
            0.0
        }
    }

    /// Lintel band volume, additions only.
    pub fn lintel_volume(&self) -> f64 {
        if self.is_addition() {
            self.length_m() * self.width * LINTEL_DEPTH
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_quantities() {
        let wall = WallSegment::new(WallKind::Exterior, "Exterior", "10+5", 0.23, 3.0);
        assert!((wall.volume() - 10.35).abs() < 1e-9);
        assert!((wall.face_area() - 90.0).abs() < 1e-9);
        assert!((wall.footprint() - 3.45).abs() < 1e-9);
        assert!((wall.lintel_volume() - 0.5175).abs() < 1e-9);
    }

    #[test]
    fn test_negative_dimensions_clamped() {
        let wall = WallSegment::new(WallKind::Custom, "Bad", "abc", -0.2, -3.0);
        assert_eq!(wall.width, 0.0);
        assert_eq!(wall.height, 0.0);
        assert_eq!(wall.volume(), 0.0);

        let json = r#"{ "name": "Bad", "length": "4", "width": "-1", "height": "x" }"#;
        let wall: WallSegment = serde_json::from_str(json).unwrap();
        assert_eq!(wall.width, 0.0);
        assert_eq!(wall.height, 0.0);
        assert_eq!(wall.kind, WallKind::Custom);
    }

    #[test]
    fn test_adjustment_defaults_and_signs() {
        let add = WallAdjustment::addition("Gable", "4");
        assert_eq!((add.width, add.height), (0.23, 1.0));
        assert!((add.signed_volume() - 0.92).abs() < 1e-9);
        assert!((add.signed_area() - 8.0).abs() < 1e-9);
        assert!((add.footprint() - 0.92).abs() < 1e-9);

        let cut = WallAdjustment::deduction("Sill band", "4");
        assert_eq!(cut.height, 0.9);
        assert!((cut.signed_volume() + 4.0 * 0.23 * 0.9).abs() < 1e-9);
        assert!((cut.signed_area() + 7.2).abs() < 1e-9);
        assert_eq!(cut.footprint(), 0.0);
        assert_eq!(cut.lintel_volume(), 0.0);
    }

    #[test]
    fn test_mode_json() {
        let adj: WallAdjustment = serde_json::from_str(r#"{ "mode": "deduct", "length": 2, "width": 0.23, "height": 1 }"#).unwrap();
        assert_eq!(adj.mode, AdjustmentMode::Deduct);
        assert_eq!(adj.mode.to_string(), "deduct");
    }
}
