//! # Sub-structure Rules
//!
//! Generates the below-plinth measurement rows from project setup alone:
//! site clearance, excavation, foundation and earth filling. Every linear
//! row is measured along one figure, the total foundation length
//! (see [`GlobalParams::total_foundation_length`]).
//!
//! The generators are pure. Each takes the setup and the total length and
//! returns a fresh row list; callers may override any row afterwards.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::expression::Expression;
//! use boq_core::setup::{ColumnGroup, ColumnGroupKind, FoundationType, GlobalParams};
//! use boq_core::substructure::{excavation_rows, total_linear_length};
//!
//! let params = GlobalParams {
//!     ext_len: Expression::new("40"),
//!     foundation_type: FoundationType::Rcc,
//!     column_groups: vec![ColumnGroup::new(ColumnGroupKind::Concealed, 4.0, 1)],
//!     ..Default::default()
//! };
//!
//! let rows = excavation_rows(&params, total_linear_length(&params));
//! assert_eq!(rows[0].l, 1.30);
//! assert_eq!(rows[1].desc, "Shallow Excavation for Plinth Beams (Topsoil + Bedding)");
//! ```

mod excavation;
mod filling;
mod foundation;

pub use excavation::excavation_rows;
pub use filling::{earth_filling_rows, site_clearance_rows};
pub use foundation::foundation_rows;

use serde::{Deserialize, Serialize};

use crate::measurement::{calculate_total, MeasurementRow};
use crate::setup::GlobalParams;
use crate::units::round2;

// ============================================================================
// Constants
// ============================================================================

/// PCC bed thickness under footings and trenches (m)
pub const PCC_THICKNESS: f64 = 0.10;
/// RCC footing pad thickness (m)
pub const FOOTING_THICKNESS: f64 = 0.45;
/// PCC bedding under plinth beams (m)
pub const BEDDING_THICKNESS: f64 = 0.10;
/// Topsoil strip above the bedding (m)
pub const TOPSOIL_CLEARANCE: f64 = 0.05;
/// Working space added to excavation plan dimensions (m)
pub const WORKING_SPACE: f64 = 0.30;
/// RR foundation base width (m)
pub const RR_BASE_WIDTH: f64 = 0.6;
/// RR foundation base depth (m)
pub const RR_BASE_DEPTH: f64 = 0.6;
/// RR basement width (m)
pub const RR_BASEMENT_WIDTH: f64 = 0.45;
/// RR basement depth (m)
pub const RR_BASEMENT_DEPTH: f64 = 0.45;
/// PCC plan offset beyond the footing / base (m)
pub const PCC_OFFSET: f64 = 0.20;
/// Lower bound on column stump height (m)
pub const MIN_STUMP_HEIGHT: f64 = 0.3;

/// Plinth beam trench depth: bedding plus topsoil.
pub const PLINTH_EXCAVATION_DEPTH: f64 = BEDDING_THICKNESS + TOPSOIL_CLEARANCE;

/// RR trench depth: PCC, base and basement.
pub const RR_TOTAL_DEPTH: f64 = PCC_THICKNESS + RR_BASE_DEPTH + RR_BASEMENT_DEPTH;

/// Plinth beam section (m)
pub const PLINTH_BEAM_WIDTH: f64 = 0.23;
pub const PLINTH_BEAM_DEPTH: f64 = 0.30;

/// Total linear length the sub-structure rules measure along.
pub fn total_linear_length(params: &GlobalParams) -> f64 {
    params.total_foundation_length()
}

/// Column stump height from ground to footing top.
///
/// `footing_depth - PCC - footing pad`, but never below 0.3 m.
pub fn stump_height(footing_depth: f64) -> f64 {
    round2(footing_depth - (PCC_THICKNESS + FOOTING_THICKNESS)).max(MIN_STUMP_HEIGHT)
}

/// All four sub-structure work categories for one setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstructureRows {
    pub total_length: f64,
    pub site_clearance: Vec<MeasurementRow>,
    pub excavation: Vec<MeasurementRow>,
    pub foundation: Vec<MeasurementRow>,
    pub earth_filling: Vec<MeasurementRow>,
}

impl SubstructureRows {
    /// Run every generator against the setup.
    pub fn generate(params: &GlobalParams) -> Self {
        let total = total_linear_length(params);
        let rows = SubstructureRows {
            total_length: total,
            site_clearance: site_clearance_rows(),
            excavation: excavation_rows(params, total),
            foundation: foundation_rows(params, total),
            earth_filling: earth_filling_rows(params, total),
        };
        tracing::debug!(
            foundation_type = %params.foundation_type,
            total_length = total,
            excavation_rows = rows.excavation.len(),
            foundation_rows = rows.foundation.len(),
            "generated sub-structure rows"
        );
        rows
    }

    /// Category totals in generation order.
    pub fn totals(&self) -> [(&'static str, f64); 4] {
        [
            ("Site Clearance", calculate_total(&self.site_clearance)),
            ("Excavation", calculate_total(&self.excavation)),
            ("Foundation", calculate_total(&self.foundation)),
            ("Earth Filling", calculate_total(&self.earth_filling)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Expression;
    use crate::setup::{CustomWall, OpenArea, OpenAreaKind};

    #[test]
    fn test_derived_depths() {
        assert!((PLINTH_EXCAVATION_DEPTH - 0.15).abs() < 1e-12);
        assert!((RR_TOTAL_DEPTH - 1.15).abs() < 1e-12);
    }

    #[test]
    fn test_stump_height() {
        assert!((stump_height(1.2) - 0.65).abs() < 1e-12);
        assert!((stump_height(1.8) - 1.25).abs() < 1e-12);
        assert_eq!(stump_height(0.5), 0.3);
        assert_eq!(stump_height(0.0), 0.3);
    }

    #[test]
    fn test_total_length_ignores_non_structural_areas() {
        let mut params = GlobalParams {
            ext_len: Expression::new("20"),
            int_len: Expression::new("10"),
            ..Default::default()
        };
        params.custom_walls.push(CustomWall::partition("Store", "2.5"));
        params.open_areas.push(OpenArea::new(OpenAreaKind::CarPorch, "3", "9"));
        assert_eq!(total_linear_length(&params), 32.5);

        let rows = SubstructureRows::generate(&params);
        let trench = rows.excavation.last().unwrap();
        assert_eq!(trench.l, 32.5);
        assert!(rows.earth_filling.iter().all(|r| r.l == 32.5 || r.l == 1.0));
    }

    #[test]
    fn test_generate_is_repeatable() {
        let params = GlobalParams {
            ext_len: Expression::new("10+5"),
            ..Default::default()
        };
        let a = SubstructureRows::generate(&params);
        let b = SubstructureRows::generate(&params);
        assert_eq!(a, b);
        assert_eq!(a.totals()[0].1, 8.0);
    }
}
