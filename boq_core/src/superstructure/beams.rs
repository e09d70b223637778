//! # Beams and Lintels
//!
//! Concealed beams sit inside the wall thickness: they are cut out of the
//! masonry and show no plaster. Drop beams and open-area beams hang free,
//! so they cost nothing in masonry but add soffit and side plaster.
//!
//! The lintel band runs over every wall at 0.15 m depth. Stretches without
//! openings can be taken back out with [`LintelDeduction`] rows.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expression::Expression;
use crate::numeric;
use crate::setup::DEFAULT_WALL_WIDTH;

use super::walls::{WallAdjustment, WallSegment};
use super::LINTEL_DEPTH;

/// Default beam section (m)
pub const DEFAULT_BEAM_WIDTH: f64 = 0.23;
pub const DEFAULT_BEAM_DEPTH: f64 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BeamCategory {
    #[default]
    Concealed,
    Drop,
    OpenArea,
}

impl BeamCategory {
    /// Drop and open-area beams show on the finished surface.
    pub fn is_visible(&self) -> bool {
        !matches!(self, BeamCategory::Concealed)
    }
}

impl fmt::Display for BeamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BeamCategory::Concealed => "Concealed",
            BeamCategory::Drop => "Drop",
            BeamCategory::OpenArea => "Open Area",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beam {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub length: Expression,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub width: f64,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub depth: f64,

    #[serde(default)]
    pub category: BeamCategory,
}

impl Beam {
    /// New beam with the default 0.23 × 0.45 section.
    pub fn new(category: BeamCategory, name: impl Into<String>, length: impl Into<Expression>) -> Self {
        Beam {
            id: Uuid::new_v4(),
            name: name.into(),
            length: length.into(),
            width: DEFAULT_BEAM_WIDTH,
            depth: DEFAULT_BEAM_DEPTH,
            category,
        }
    }

    pub fn with_section(mut self, width: f64, depth: f64) -> Self {
        self.width = numeric::non_negative(width);
        self.depth = numeric::non_negative(depth);
        self
    }

    pub fn length_m(&self) -> f64 {
        self.length.value()
    }

    pub fn volume(&self) -> f64 {
        self.length_m() * self.width * self.depth
    }

    /// Soffit plus both sides: l × w + 2 × l × d.
    ///
    /// Concealed beams return 0.
    pub fn plaster_area(&self) -> f64 {
        if !self.category.is_visible() {
            return 0.0;
        }
        let l = self.length_m();
        l * self.width + 2.0 * l * self.depth
    }
}

/// A stretch of wall where no lintel is cast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintelDeduction {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub length: Expression,

    /// Blank reads as 0.23
    #[serde(default, deserialize_with = "numeric::lenient_opt_non_negative", skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl LintelDeduction {
    pub fn new(length: impl Into<Expression>) -> Self {
        LintelDeduction {
            id: Uuid::new_v4(),
            length: length.into(),
            width: None,
        }
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn width_m(&self) -> f64 {
        self.width.unwrap_or(DEFAULT_WALL_WIDTH)
    }

    pub fn volume(&self) -> f64 {
        self.length.value() * self.width_m() * LINTEL_DEPTH
    }
}

/// Gross, deducted and net lintel volume of a floor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LintelVolume {
    pub gross: f64,
    pub deducted: f64,
    /// `max(0, gross - deducted)`
    pub net: f64,
}

impl LintelVolume {
    /// Lintels over every wall and every added wall piece, less deductions.
    pub fn compute(walls: &[WallSegment], adjustments: &[WallAdjustment], deductions: &[LintelDeduction]) -> Self {
        let gross = walls.iter().map(WallSegment::lintel_volume).sum::<f64>()
            + adjustments.iter().map(WallAdjustment::lintel_volume).sum::<f64>();
        let deducted: f64 = deductions.iter().map(LintelDeduction::volume).sum();
        LintelVolume {
            gross,
            deducted,
            net: (gross - deducted).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::superstructure::walls::WallKind;

    #[test]
    fn test_visible_beam_area() {
        let drop = Beam::new(BeamCategory::Drop, "B1", "4");
        assert!((drop.plaster_area() - (4.0 * 0.23 + 2.0 * 4.0 * 0.45)).abs() < 1e-9);
        let concealed = Beam::new(BeamCategory::Concealed, "CB", "4");
        assert_eq!(concealed.plaster_area(), 0.0);
        assert!((concealed.volume() - 0.414).abs() < 1e-9);
    }

    #[test]
    fn test_category_json() {
        let beam: Beam = serde_json::from_str(r#"{ "length": "3+3", "width": 0.23, "depth": 0.3, "category": "openArea" }"#).unwrap();
        assert_eq!(beam.category, BeamCategory::OpenArea);
        assert_eq!(beam.length_m(), 6.0);
    }

    #[test]
    fn test_lintel_width_fallback() {
        let blank: LintelDeduction = serde_json::from_str(r#"{ "length": "2", "width": "" }"#).unwrap();
        assert_eq!(blank.width_m(), 0.23);
        let zero = LintelDeduction::new("2").with_width(0.0);
        assert_eq!(zero.volume(), 0.0);
        let negative: LintelDeduction = serde_json::from_str(r#"{ "length": "2", "width": -0.23 }"#).unwrap();
        assert_eq!(negative.volume(), 0.0);
    }

    #[test]
    fn test_lintel_net_floored() {
        let walls = vec![WallSegment::new(WallKind::Exterior, "Ext", "10", 0.23, 3.0)];
        let deductions = vec![LintelDeduction::new("100")];
        let lintel = LintelVolume::compute(&walls, &[], &deductions);
        assert!((lintel.gross - 0.345).abs() < 1e-9);
        assert!(lintel.deducted > lintel.gross);
        assert_eq!(lintel.net, 0.0);
    }

    #[test]
    fn test_lintel_includes_additions_only() {
        let walls = vec![WallSegment::new(WallKind::Exterior, "Ext", "10", 0.23, 3.0)];
        let adjustments = vec![WallAdjustment::addition("Gable", "2"), WallAdjustment::deduction("Cut", "5")];
        let lintel = LintelVolume::compute(&walls, &adjustments, &[]);
        assert!((lintel.gross - 12.0 * 0.23 * 0.15).abs() < 1e-9);
    }
}
