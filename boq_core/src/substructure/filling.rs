//! Site clearance and earth filling rows.

use crate::measurement::{MeasurementRow, Unit};
use crate::setup::GlobalParams;
use crate::units::round2;

use super::{RR_BASEMENT_DEPTH, RR_TOTAL_DEPTH};

/// Machine hours billed for site clearance
const CLEARANCE_HOURS: f64 = 8.0;

/// Backfill strip width on each side of a trench (m)
const BACKFILL_WIDTH: f64 = 0.15;
/// Backfill depth beside RCC plinth beams (m)
const RCC_BACKFILL_DEPTH: f64 = 0.5;
/// Infill depth inside an RCC plinth (m)
const RCC_FILL_HEIGHT: f64 = 0.45;

/// Single clearance row, billed in hours.
pub fn site_clearance_rows() -> Vec<MeasurementRow> {
    vec![MeasurementRow::new("Clearing site using JCB...", 1.0, 0.0, 0.0, 0.0, Unit::Hours).with_override(CLEARANCE_HOURS)]
}

/// Backfill along both trench sides, plus a placeholder infill row the
/// user overrides with actual room areas.
pub fn earth_filling_rows(params: &GlobalParams, total_length: f64) -> Vec<MeasurementRow> {
    let rcc = params.foundation_type.is_rcc();
    let backfill_depth = if rcc { RCC_BACKFILL_DEPTH } else { round2(RR_TOTAL_DEPTH) };
    let fill_height = if rcc { RCC_FILL_HEIGHT } else { RR_BASEMENT_DEPTH };

    vec![
        MeasurementRow::new(
            "Refilling sides of trenches with available earth",
            2.0,
            total_length,
            BACKFILL_WIDTH,
            backfill_depth,
            Unit::CubicMeter,
        ),
        MeasurementRow::new(
            "Earth filling inside plinth/basement (Enter Room Area L x B)",
            1.0,
            1.0,
            1.0,
            fill_height,
            Unit::CubicMeter,
        ),
    ]
}
