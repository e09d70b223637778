//! # Roof Slabs and Parapets
//!
//! One main roof slab per floor, sized from the plinth plus a projection
//! all round. Open areas under the roof line (courtyards, open porches)
//! are cut out of it. A cut-out that does get its own roof is promoted to
//! an auxiliary slab.
//!
//! ## Formulas
//!
//! ```text
//! main area  = max(0, plinth_area + plinth_perimeter × overhang - Σ deducted)
//! auxiliary  = (area + 4√area × overhang) × thickness
//! misc       = l × b × nos × thickness
//! parapet    = length × height × thickness
//! ```
//!
//! The auxiliary perimeter is a square-equivalent estimate; rooms carved
//! out of the plinth have no tracked outline.
//!
//! Parapets are masonry and are reported apart from the slab concrete.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::slab::{SlabDeduction, SlabParameters};
//!
//! let mut slab = SlabParameters::default();
//! slab.deductions.push(SlabDeduction::new("Courtyard", "10", true));
//!
//! let summary = slab.summarize(100.0, 40.0);
//! assert!((summary.main_area - 114.0).abs() < 1e-9);
//! assert!((summary.main_volume - 13.68).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expression::Expression;
use crate::numeric;
use crate::setup::OpenArea;
use crate::superstructure::openings::Opening;
use crate::units::{round2, round3};

/// Main roof slab thickness (m)
pub const DEFAULT_ROOF_THICKNESS: f64 = 0.12;
/// Main roof projection beyond the plinth (m)
pub const DEFAULT_OVERHANG: f64 = 0.60;
/// Promoted sub-roof thickness (m)
pub const PROMOTED_THICKNESS: f64 = 0.10;
/// Promoted sub-roof projection (m)
pub const PROMOTED_OVERHANG: f64 = 0.30;
/// Misc slab thickness (m)
pub const MISC_THICKNESS: f64 = 0.10;
/// Sunshade projection (m)
pub const SUNSHADE_WIDTH: f64 = 0.6;
/// Sunshade length beyond the opening width (m)
pub const SUNSHADE_EXTRA_LENGTH: f64 = 0.3;
/// Parapet defaults (m)
pub const PARAPET_HEIGHT: f64 = 0.9;
pub const PARAPET_THICKNESS: f64 = 0.10;

/// An area cut from the main slab, or listed and kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabDeduction {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub area: Expression,

    /// Cut out of the main slab
    #[serde(default)]
    pub deduct: bool,

    /// Open area this entry was seeded from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_area: Option<Uuid>,
}

impl SlabDeduction {
    pub fn new(name: impl Into<String>, area: impl Into<Expression>, deduct: bool) -> Self {
        SlabDeduction {
            id: Uuid::new_v4(),
            name: name.into(),
            area: area.into(),
            deduct,
            source_area: None,
        }
    }

    /// Seed from a project open area.
    ///
    /// Deducted by default when it has no roof or its name says open/courtyard.
    pub fn from_open_area(area: &OpenArea) -> Self {
        let name = area.label().to_string();
        let lower = name.to_lowercase();
        let deduct = !area.has_roof || lower.contains("open") || lower.contains("courtyard");
        SlabDeduction {
            id: Uuid::new_v4(),
            name,
            area: area.area.clone(),
            deduct,
            source_area: Some(area.id),
        }
    }

    pub fn area_m2(&self) -> f64 {
        self.area.value()
    }
}

/// An independent roof slab beside the main one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub area: f64,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub thickness: f64,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub overhang: f64,

    #[serde(default)]
    pub is_manual: bool,

    /// Deduction entry this slab was promoted from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_area: Option<Uuid>,
}

impl SlabRecord {
    /// Blank stair-room slab for the user to size.
    pub fn manual() -> Self {
        SlabRecord {
            id: Uuid::new_v4(),
            name: "Stair Room / Mumty".to_string(),
            area: 0.0,
            thickness: DEFAULT_ROOF_THICKNESS,
            overhang: DEFAULT_OVERHANG,
            is_manual: true,
            source_area: None,
        }
    }

    /// Square-equivalent perimeter: 4√area
    pub fn estimated_perimeter(&self) -> f64 {
        4.0 * self.area.sqrt()
    }

    pub fn gross_area(&self) -> f64 {
        self.area + self.estimated_perimeter() * self.overhang
    }

    pub fn volume(&self) -> f64 {
        self.gross_area() * self.thickness
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MiscSlabKind {
    #[default]
    Sunshade,
    Kitchen,
    Loft,
}

/// Sunshade, kitchen platform or loft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiscSlab {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub kind: MiscSlabKind,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub length: f64,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub width: f64,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub nos: f64,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub thickness: f64,
}

impl MiscSlab {
    /// 1.5 × 0.6 × 1 × 0.10
    pub fn new(kind: MiscSlabKind) -> Self {
        MiscSlab {
            id: Uuid::new_v4(),
            kind,
            length: 1.5,
            width: SUNSHADE_WIDTH,
            nos: 1.0,
            thickness: MISC_THICKNESS,
        }
    }

    /// Sunshade over a window or ventilator, 0.3 m longer than the opening.
    pub fn sunshade_for(opening: &Opening) -> Self {
        MiscSlab {
            length: round2(opening.width + SUNSHADE_EXTRA_LENGTH),
            nos: if opening.nos > 0.0 { opening.nos } else { 1.0 },
            ..MiscSlab::new(MiscSlabKind::Sunshade)
        }
    }

    pub fn volume(&self) -> f64 {
        self.length * self.width * self.nos * self.thickness
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parapet {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub length: Expression,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub height: f64,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub thickness: f64,
}

impl Parapet {
    pub fn new(name: impl Into<String>, length: impl Into<Expression>) -> Self {
        Parapet {
            id: Uuid::new_v4(),
            name: name.into(),
            length: length.into(),
            height: PARAPET_HEIGHT,
            thickness: PARAPET_THICKNESS,
        }
    }

    pub fn volume(&self) -> f64 {
        self.length.value() * self.height * self.thickness
    }
}

/// All slab inputs of one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlabParameters {
    #[serde(default = "default_roof_thickness", deserialize_with = "numeric::lenient_non_negative")]
    pub roof_thickness: f64,

    #[serde(default = "default_overhang", deserialize_with = "numeric::lenient_non_negative")]
    pub overhang: f64,

    #[serde(default)]
    pub deductions: Vec<SlabDeduction>,

    #[serde(default)]
    pub extra_slabs: Vec<SlabRecord>,

    #[serde(default)]
    pub misc_slabs: Vec<MiscSlab>,

    #[serde(default = "default_parapets")]
    pub parapets: Vec<Parapet>,
}

fn default_roof_thickness() -> f64 {
    DEFAULT_ROOF_THICKNESS
}

fn default_overhang() -> f64 {
    DEFAULT_OVERHANG
}

fn default_parapets() -> Vec<Parapet> {
    vec![Parapet::new("Main Roof Parapet", "")]
}

impl Default for SlabParameters {
    fn default() -> Self {
        SlabParameters {
            roof_thickness: DEFAULT_ROOF_THICKNESS,
            overhang: DEFAULT_OVERHANG,
            deductions: Vec::new(),
            extra_slabs: Vec::new(),
            misc_slabs: Vec::new(),
            parapets: default_parapets(),
        }
    }
}

impl SlabParameters {
    /// Fill the deduction list from the project's open areas.
    ///
    /// Only runs on an empty list so that user toggles survive.
    pub fn seed_deductions(&mut self, open_areas: &[OpenArea]) -> usize {
        if !self.deductions.is_empty() {
            return 0;
        }
        self.deductions = open_areas.iter().map(SlabDeduction::from_open_area).collect();
        self.deductions.len()
    }

    /// Give a listed area its own roof slab.
    ///
    /// The area stays deducted from the main slab. Returns `None` for an
    /// unknown id or an area already promoted.
    pub fn promote(&mut self, deduction_id: Uuid) -> Option<&SlabRecord> {
        let deduction = self.deductions.iter_mut().find(|d| d.id == deduction_id)?;
        if self.extra_slabs.iter().any(|s| s.source_area == Some(deduction_id)) {
            return None;
        }
        deduction.deduct = true;
        let record = SlabRecord {
            id: Uuid::new_v4(),
            name: format!("{} Roof", deduction.name),
            area: numeric::non_negative(deduction.area_m2()),
            thickness: PROMOTED_THICKNESS,
            overhang: PROMOTED_OVERHANG,
            is_manual: false,
            source_area: Some(deduction_id),
        };
        self.extra_slabs.push(record);
        self.extra_slabs.last()
    }

    /// Add a sunshade for every window and ventilator.
    pub fn add_sunshades(&mut self, openings: &[Opening]) -> usize {
        let before = self.misc_slabs.len();
        self.misc_slabs
            .extend(openings.iter().filter(|o| o.kind.has_sunshade()).map(MiscSlab::sunshade_for));
        self.misc_slabs.len() - before
    }

    /// Outline of the roof edge: plinth perimeter plus the four corners.
    pub fn roof_perimeter(&self, plinth_perimeter: f64) -> f64 {
        plinth_perimeter + 8.0 * self.overhang
    }

    pub fn deducted_area(&self) -> f64 {
        self.deductions.iter().filter(|d| d.deduct).map(SlabDeduction::area_m2).sum()
    }

    pub fn main_area(&self, plinth_area: f64, plinth_perimeter: f64) -> f64 {
        (plinth_area + plinth_perimeter * self.overhang - self.deducted_area()).max(0.0)
    }

    pub fn summarize(&self, plinth_area: f64, plinth_perimeter: f64) -> SlabSummary {
        let main_area = self.main_area(plinth_area, plinth_perimeter);
        let main_volume = main_area * self.roof_thickness;
        let auxiliary_volume: f64 = self.extra_slabs.iter().map(SlabRecord::volume).sum();
        let misc_volume: f64 = self.misc_slabs.iter().map(MiscSlab::volume).sum();
        let parapet_volume: f64 = self.parapets.iter().map(Parapet::volume).sum();

        let summary = SlabSummary {
            projection_area: plinth_perimeter * self.overhang,
            deducted_area: self.deducted_area(),
            main_area,
            main_volume,
            auxiliary_volume,
            misc_volume,
            total_concrete: main_volume + auxiliary_volume + misc_volume,
            parapet_volume,
            roof_perimeter: self.roof_perimeter(plinth_perimeter),
        };
        tracing::debug!(
            main_area = summary.main_area,
            total_concrete = summary.total_concrete,
            parapet_volume = summary.parapet_volume,
            "summarized slabs"
        );
        summary
    }
}

/// Slab and parapet results of one floor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SlabSummary {
    pub projection_area: f64,
    pub deducted_area: f64,
    pub main_area: f64,
    pub main_volume: f64,
    pub auxiliary_volume: f64,
    pub misc_volume: f64,
    /// main + auxiliary + misc
    pub total_concrete: f64,
    pub parapet_volume: f64,
    pub roof_perimeter: f64,
}

impl SlabSummary {
    /// Areas and lengths to 2 dp, volumes to 3 dp.
    pub fn rounded(&self) -> Self {
        SlabSummary {
            projection_area: round2(self.projection_area),
            deducted_area: round2(self.deducted_area),
            main_area: round2(self.main_area),
            main_volume: round3(self.main_volume),
            auxiliary_volume: round3(self.auxiliary_volume),
            misc_volume: round3(self.misc_volume),
            total_concrete: round3(self.total_concrete),
            parapet_volume: round3(self.parapet_volume),
            roof_perimeter: round2(self.roof_perimeter),
        }
    }
}
