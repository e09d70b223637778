//! # Super-structure
//!
//! Per-floor measurement of everything above the plinth: walls, wall
//! adjustments, openings, beams, lintels and columns, aggregated into a
//! net masonry volume, a net plaster area and a carpet area.
//!
//! ## Modules
//!
//! - [`walls`] - Wall segments and irregular-wall adjustments
//! - [`openings`] - Doors, windows and other openings
//! - [`beams`] - Beams and the lintel band
//! - [`columns`] - Column records and the concealed/open classifier
//! - [`floor`] - The per-floor parameter set
//! - [`aggregate`] - Volume, area and carpet pipelines
//! - [`rules`] - Default super-structure BOQ rows from project setup
//!
//! ## Example
//!
//! ```rust
//! use boq_core::superstructure::{FloorParameters, FloorSummary, Opening, OpeningKind, WallKind, WallSegment};
//! use boq_core::superstructure::LintelDeduction;
//!
//! let mut floor = FloorParameters::new("Ground Floor");
//! floor.walls.push(WallSegment::new(WallKind::Exterior, "Exterior", "10+5", 0.23, 3.0));
//! floor.openings.push(Opening::new(OpeningKind::Door));
//! // no lintel band on this wall
//! floor.lintel_deductions.push(LintelDeduction::new("15"));
//!
//! let summary = FloorSummary::compute(&floor).rounded();
//! assert_eq!(summary.volume.net, 9.867);
//! ```

pub mod aggregate;
pub mod beams;
pub mod columns;
pub mod floor;
pub mod openings;
pub mod rules;
pub mod walls;

pub use aggregate::{area_breakdown, carpet_breakdown, volume_breakdown, Advisory, FloorSummary};
pub use beams::{Beam, BeamCategory, LintelDeduction, LintelVolume};
pub use columns::{classify, ColumnCategory, ColumnDeductions, ColumnRecord, ColumnSource};
pub use floor::FloorParameters;
pub use openings::{Opening, OpeningKind, OpeningSummary};
pub use walls::{AdjustmentMode, WallAdjustment, WallKind, WallSegment};

/// Depth of the lintel band over every wall (m)
pub const LINTEL_DEPTH: f64 = 0.15;
