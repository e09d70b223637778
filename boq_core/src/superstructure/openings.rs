//! # Openings
//!
//! Doors, windows and the like cut through a wall of a given thickness.
//! Both faces lose plaster, so the area deduction is doubled by the floor
//! aggregator, not here.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::numeric;
use crate::setup::DEFAULT_WALL_WIDTH;

/// Opening type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum OpeningKind {
    #[default]
    Door,
    Window,
    Ventilator,
    Arch,
    Opening,
    Grill,
}

impl OpeningKind {
    pub const ALL: [OpeningKind; 6] = [
        OpeningKind::Door,
        OpeningKind::Window,
        OpeningKind::Ventilator,
        OpeningKind::Arch,
        OpeningKind::Opening,
        OpeningKind::Grill,
    ];

    /// Default (width, height) in metres.
    pub fn default_size(&self) -> (f64, f64) {
        match self {
            OpeningKind::Door => (1.0, 2.1),
            OpeningKind::Window | OpeningKind::Grill => (1.5, 1.5),
            OpeningKind::Ventilator => (0.6, 0.45),
            OpeningKind::Arch | OpeningKind::Opening => (1.5, 2.1),
        }
    }

    /// Windows and ventilators carry a sunshade.
    pub fn has_sunshade(&self) -> bool {
        matches!(self, OpeningKind::Window | OpeningKind::Ventilator)
    }
}

impl fmt::Display for OpeningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpeningKind::Door => "Door",
            OpeningKind::Window => "Window",
            OpeningKind::Ventilator => "Ventilator",
            OpeningKind::Arch => "Arch",
            OpeningKind::Opening => "Opening",
            OpeningKind::Grill => "Grill",
        };
        f.write_str(name)
    }
}

/// A group of identical openings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub kind: OpeningKind,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub width: f64,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub height: f64,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub nos: f64,

    /// Thickness of the wall the opening sits in (m)
    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub wall_size: f64,
}

impl Opening {
    /// One opening of the kind's default size in a 0.23 m wall.
    pub fn new(kind: OpeningKind) -> Self {
        let (width, height) = kind.default_size();
        Opening {
            id: Uuid::new_v4(),
            kind,
            width,
            height,
            nos: 1.0,
            wall_size: DEFAULT_WALL_WIDTH,
        }
    }

    pub fn with_count(mut self, nos: f64) -> Self {
        self.nos = numeric::non_negative(nos);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = numeric::non_negative(width);
        self.height = numeric::non_negative(height);
        self
    }

    pub fn in_wall(mut self, wall_size: f64) -> Self {
        self.wall_size = numeric::non_negative(wall_size);
        self
    }

    /// Change the kind; dimensions reset to the new kind's defaults.
    pub fn set_kind(&mut self, kind: OpeningKind) {
        let (width, height) = kind.default_size();
        self.kind = kind;
        self.width = width;
        self.height = height;
    }

    /// Single-face area: w × h × nos
    pub fn area(&self) -> f64 {
        self.width * self.height * self.nos
    }

    /// Masonry removed: w × h × wall_size × nos
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.wall_size * self.nos
    }
}

/// Totals across a floor's openings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpeningSummary {
    pub total_area: f64,
    pub total_volume: f64,
    pub grill_area: f64,
    pub counts: BTreeMap<OpeningKind, f64>,
}

impl OpeningSummary {
    pub fn from_openings(openings: &[Opening]) -> Self {
        let mut summary = OpeningSummary::default();
        for opening in openings {
            summary.total_area += opening.area();
            summary.total_volume += opening.volume();
            if opening.kind == OpeningKind::Grill {
                summary.grill_area += opening.area();
            }
            *summary.counts.entry(opening.kind).or_insert(0.0) += opening.nos;
        }
        summary
    }

    pub fn count(&self, kind: OpeningKind) -> f64 {
        self.counts.get(&kind).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sizes() {
        assert_eq!(Opening::new(OpeningKind::Door).width, 1.0);
        assert_eq!(Opening::new(OpeningKind::Door).height, 2.1);
        assert_eq!(OpeningKind::Ventilator.default_size(), (0.6, 0.45));
        assert_eq!(OpeningKind::Arch.default_size(), (1.5, 2.1));
        assert_eq!(OpeningKind::Grill.default_size(), (1.5, 1.5));
    }

    #[test]
    fn test_door_volume() {
        let door = Opening::new(OpeningKind::Door);
        assert!((door.volume() - 0.483).abs() < 1e-9);
        assert!((door.area() - 2.1).abs() < 1e-9);
    }

    #[test]
    fn test_kind_change_resets_size() {
        let mut opening = Opening::new(OpeningKind::Door).with_size(0.9, 2.0).with_count(3.0);
        opening.set_kind(OpeningKind::Window);
        assert_eq!((opening.width, opening.height), (1.5, 1.5));
        assert_eq!(opening.nos, 3.0);
    }

    #[test]
    fn test_summary() {
        let openings = vec![
            Opening::new(OpeningKind::Door).with_count(2.0),
            Opening::new(OpeningKind::Window).with_count(3.0),
            Opening::new(OpeningKind::Grill),
        ];
        let summary = OpeningSummary::from_openings(&openings);
        assert!((summary.total_area - (4.2 + 6.75 + 2.25)).abs() < 1e-9);
        assert!((summary.grill_area - 2.25).abs() < 1e-9);
        assert_eq!(summary.count(OpeningKind::Window), 3.0);
        assert_eq!(summary.count(OpeningKind::Arch), 0.0);
    }
}
