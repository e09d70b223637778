//! # Floor Aggregation
//!
//! Three independent pipelines over one [`FloorParameters`]. Each quantity
//! uses its own deduction set; the plaster area is not the masonry volume
//! divided by a thickness.
//!
//! ## Net masonry volume (m³)
//!
//! ```text
//!   Σ walls l×b×h
//! ± Σ adjustments l×b×h
//! - Σ openings w×h×wall_size×nos
//! - net lintel
//! - concealed beams l×b×d
//! - concealed columns l×b×h×nos
//! - manual volume deduction
//! ```
//!
//! ## Net plaster area (m²)
//!
//! ```text
//!   Σ walls l×h×2
//! ± Σ adjustments l×h×2
//! - 2 × Σ openings w×h×nos
//! + drop / open-area beams l×w + 2×l×d
//! + open columns 2×(l+w)×h×nos
//! - manual area deduction
//! ```
//!
//! ## Carpet area (m²)
//!
//! `plinth area - footprint - manual carpet deduction`, where the
//! footprint skips plinth-exempt walls and includes added wall pieces.
//!
//! No pipeline clamps its result. Negative figures are reported as
//! [`Advisory`] entries.

use serde::{Deserialize, Serialize};

use crate::slab::SlabSummary;
use crate::units::{round2, round3};

use super::beams::{BeamCategory, LintelVolume};
use super::columns::{classify, ColumnDeductions};
use super::floor::FloorParameters;
use super::openings::OpeningSummary;

// ============================================================================
// Volume
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VolumeBreakdown {
    pub gross: f64,
    /// Additions minus deductions
    pub adjustments: f64,
    pub openings: f64,
    pub lintel: LintelVolume,
    pub concealed_beams: f64,
    pub concealed_columns: f64,
    pub manual: f64,
    pub net: f64,
}

/// Net brick masonry volume of a floor.
pub fn volume_breakdown(floor: &FloorParameters) -> VolumeBreakdown {
    let gross: f64 = floor.walls.iter().map(|w| w.volume()).sum();
    let adjustments: f64 = floor.adjustments.iter().map(|a| a.signed_volume()).sum();
    let openings: f64 = floor.openings.iter().map(|o| o.volume()).sum();
    let lintel = LintelVolume::compute(&floor.walls, &floor.adjustments, &floor.lintel_deductions);
    let concealed_beams: f64 = floor
        .beams
        .iter()
        .filter(|b| b.category == BeamCategory::Concealed)
        .map(|b| b.volume())
        .sum();
    let concealed_columns = classify(&floor.columns).concealed_volume;
    let manual = floor.deduction_volume;

    VolumeBreakdown {
        gross,
        adjustments,
        openings,
        lintel,
        concealed_beams,
        concealed_columns,
        manual,
        net: gross + adjustments - openings - lintel.net - concealed_beams - concealed_columns - manual,
    }
}

// ============================================================================
// Plaster area
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AreaBreakdown {
    /// Both faces of every wall
    pub gross: f64,
    pub adjustments: f64,
    /// Both faces of every opening
    pub openings: f64,
    pub visible_beams: f64,
    pub open_columns: f64,
    pub manual: f64,
    pub net: f64,
}

/// Net plaster area of a floor.
pub fn area_breakdown(floor: &FloorParameters) -> AreaBreakdown {
    let gross: f64 = floor.walls.iter().map(|w| w.face_area()).sum();
    let adjustments: f64 = floor.adjustments.iter().map(|a| a.signed_area()).sum();
    let openings = 2.0 * floor.openings.iter().map(|o| o.area()).sum::<f64>();
    let visible_beams: f64 = floor.beams.iter().map(|b| b.plaster_area()).sum();
    let open_columns = classify(&floor.columns).open_plaster_area;
    let manual = floor.deduction_area;

    AreaBreakdown {
        gross,
        adjustments,
        openings,
        visible_beams,
        open_columns,
        manual,
        net: gross + adjustments - openings + visible_beams + open_columns - manual,
    }
}

// ============================================================================
// Carpet area
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CarpetBreakdown {
    pub plinth_area: f64,
    pub footprint: f64,
    pub manual: f64,
    pub net: f64,
}

/// Plan footprint of the walls standing on the plinth.
pub fn wall_footprint(floor: &FloorParameters) -> f64 {
    let walls: f64 = floor
        .walls
        .iter()
        .filter(|w| !w.is_plinth_exempt)
        .map(|w| w.footprint())
        .sum();
    let additions: f64 = floor.adjustments.iter().map(|a| a.footprint()).sum();
    walls + additions
}

pub fn carpet_breakdown(floor: &FloorParameters) -> CarpetBreakdown {
    let plinth_area = floor.plinth_area_m2();
    let footprint = wall_footprint(floor);
    let manual = floor.deduction_carpet;
    CarpetBreakdown {
        plinth_area,
        footprint,
        manual,
        net: plinth_area - footprint - manual,
    }
}

// ============================================================================
// Summary
// ============================================================================

/// A figure that came out negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advisory {
    NegativeNetVolume,
    NegativePlasterArea,
    NegativeCarpetArea,
}

impl Advisory {
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::NegativeNetVolume => "Deductions exceed gross masonry volume",
            Advisory::NegativePlasterArea => "Deductions exceed gross plaster area",
            Advisory::NegativeCarpetArea => "Wall footprint exceeds plinth area",
        }
    }
}

/// Beam volume by category.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BeamVolumes {
    pub concealed: f64,
    pub drop: f64,
    pub open_area: f64,
}

impl BeamVolumes {
    pub fn total(&self) -> f64 {
        self.concealed + self.drop + self.open_area
    }
}

/// Every computed figure of one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSummary {
    pub floor_name: String,
    pub volume: VolumeBreakdown,
    pub area: AreaBreakdown,
    pub carpet: CarpetBreakdown,
    pub columns: ColumnDeductions,
    pub openings: OpeningSummary,
    pub beams: BeamVolumes,
    pub slab: SlabSummary,
    /// Evaluated length of every wall on the floor
    pub total_wall_length: f64,
    /// Beams + net lintel + concealed columns
    pub concrete_volume: f64,
    pub advisories: Vec<Advisory>,
}

impl FloorSummary {
    /// Run every pipeline. Pure: the same floor always gives the same summary.
    pub fn compute(floor: &FloorParameters) -> Self {
        let volume = volume_breakdown(floor);
        let area = area_breakdown(floor);
        let carpet = carpet_breakdown(floor);
        let columns = classify(&floor.columns);

        let mut beams = BeamVolumes::default();
        for beam in &floor.beams {
            match beam.category {
                BeamCategory::Concealed => beams.concealed += beam.volume(),
                BeamCategory::Drop => beams.drop += beam.volume(),
                BeamCategory::OpenArea => beams.open_area += beam.volume(),
            }
        }

        let mut advisories = Vec::new();
        if volume.net < 0.0 {
            advisories.push(Advisory::NegativeNetVolume);
        }
        if area.net < 0.0 {
            advisories.push(Advisory::NegativePlasterArea);
        }
        if carpet.net < 0.0 {
            advisories.push(Advisory::NegativeCarpetArea);
        }

        let summary = FloorSummary {
            floor_name: floor.name.clone(),
            concrete_volume: beams.total() + volume.lintel.net + columns.concealed_volume,
            total_wall_length: floor.walls.iter().map(|w| w.length_m()).sum(),
            slab: floor.slab.summarize(floor.plinth_area_m2(), floor.plinth_perimeter_m()),
            openings: OpeningSummary::from_openings(&floor.openings),
            volume,
            area,
            carpet,
            columns,
            beams,
            advisories,
        };

        tracing::debug!(
            floor = %summary.floor_name,
            net_volume = summary.volume.net,
            net_plaster_area = summary.area.net,
            carpet_area = summary.carpet.net,
            "aggregated floor"
        );
        for advisory in &summary.advisories {
            tracing::warn!(floor = %summary.floor_name, ?advisory, "{}", advisory.message());
        }

        summary
    }

    pub fn net_volume(&self) -> f64 {
        self.volume.net
    }

    pub fn net_plaster_area(&self) -> f64 {
        self.area.net
    }

    pub fn carpet_area(&self) -> f64 {
        self.carpet.net
    }

    /// Reporting view: volumes to 3 dp, areas and lengths to 2 dp.
    pub fn rounded(&self) -> Self {
        let v = &self.volume;
        let a = &self.area;
        let c = &self.carpet;
        FloorSummary {
            floor_name: self.floor_name.clone(),
            volume: VolumeBreakdown {
                gross: round3(v.gross),
                adjustments: round3(v.adjustments),
                openings: round3(v.openings),
                lintel: LintelVolume {
                    gross: round3(v.lintel.gross),
                    deducted: round3(v.lintel.deducted),
                    net: round3(v.lintel.net),
                },
                concealed_beams: round3(v.concealed_beams),
                concealed_columns: round3(v.concealed_columns),
                manual: round3(v.manual),
                net: round3(v.net),
            },
            area: AreaBreakdown {
                gross: round2(a.gross),
                adjustments: round2(a.adjustments),
                openings: round2(a.openings),
                visible_beams: round2(a.visible_beams),
                open_columns: round2(a.open_columns),
                manual: round2(a.manual),
                net: round2(a.net),
            },
            carpet: CarpetBreakdown {
                plinth_area: round2(c.plinth_area),
                footprint: round2(c.footprint),
                manual: round2(c.manual),
                net: round2(c.net),
            },
            columns: ColumnDeductions {
                concealed_volume: round3(self.columns.concealed_volume),
                open_area: round2(self.columns.open_area),
                open_plaster_area: round2(self.columns.open_plaster_area),
                ..self.columns.clone()
            },
            openings: OpeningSummary {
                total_area: round2(self.openings.total_area),
                total_volume: round3(self.openings.total_volume),
                grill_area: round2(self.openings.grill_area),
                counts: self.openings.counts.clone(),
            },
            beams: BeamVolumes {
                concealed: round3(self.beams.concealed),
                drop: round3(self.beams.drop),
                open_area: round3(self.beams.open_area),
            },
            slab: self.slab.rounded(),
            total_wall_length: round2(self.total_wall_length),
            concrete_volume: round3(self.concrete_volume),
            advisories: self.advisories.clone(),
        }
    }
}
