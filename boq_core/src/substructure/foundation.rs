//! Foundation rows: PCC bed, footings / RR base, stumps and plinth.

use crate::measurement::{MeasurementRow, Unit};
use crate::setup::GlobalParams;
use crate::units::round2;

use super::{
    stump_height, BEDDING_THICKNESS, FOOTING_THICKNESS, PCC_OFFSET, PCC_THICKNESS, PLINTH_BEAM_DEPTH,
    PLINTH_BEAM_WIDTH, RR_BASEMENT_DEPTH, RR_BASEMENT_WIDTH, RR_BASE_DEPTH, RR_BASE_WIDTH,
};

/// Width of the PCC bedding strip under plinth beams (m)
const BEDDING_WIDTH: f64 = 0.3;

/// Foundation rows under three headers (A, B, C).
pub fn foundation_rows(params: &GlobalParams, total_length: f64) -> Vec<MeasurementRow> {
    let rcc = params.foundation_type.is_rcc();
    let mut rows = Vec::new();

    // A. PCC
    rows.push(MeasurementRow::header(if rcc { "A. PCC & BEDDING" } else { "A. PCC BED" }));
    if rcc {
        for group in &params.column_groups {
            rows.push(MeasurementRow::new(
                format!("PCC 1:4:8 under {}", group.name),
                group.count,
                round2(group.footing_l() + PCC_OFFSET),
                round2(group.footing_b() + PCC_OFFSET),
                PCC_THICKNESS,
                Unit::CubicMeter,
            ));
        }
        rows.push(MeasurementRow::new(
            "PCC 1:4:8 Bedding under Plinth Beams",
            1.0,
            total_length,
            BEDDING_WIDTH,
            BEDDING_THICKNESS,
            Unit::CubicMeter,
        ));
    } else {
        rows.push(MeasurementRow::new(
            "PCC 1:4:8 for Foundation",
            1.0,
            total_length,
            round2(RR_BASE_WIDTH + PCC_OFFSET),
            PCC_THICKNESS,
            Unit::CubicMeter,
        ));
    }

    // B. Footings / base
    rows.push(MeasurementRow::header(if rcc { "B. RCC FOOTINGS" } else { "B. RR FOUNDATION" }));
    if rcc {
        for group in &params.column_groups {
            rows.push(MeasurementRow::new(
                format!("RCC Footing for {}", group.name),
                group.count,
                group.footing_l(),
                group.footing_b(),
                FOOTING_THICKNESS,
                Unit::CubicMeter,
            ));
        }
    } else {
        rows.push(MeasurementRow::new(
            "RR Masonry Foundation (Base)",
            1.0,
            total_length,
            RR_BASE_WIDTH,
            RR_BASE_DEPTH,
            Unit::CubicMeter,
        ));
    }

    // C. Stumps and plinth
    rows.push(MeasurementRow::header(if rcc { "C. COLUMN STUMP & PLINTH" } else { "C. BASEMENT" }));
    for group in &params.column_groups {
        rows.push(MeasurementRow::new(
            format!("RCC Column Stump (to GL 0.00) for {}", group.name),
            group.count,
            group.column_l(),
            group.column_b(),
            stump_height(group.footing_d()),
            Unit::CubicMeter,
        ));
    }
    if rcc {
        rows.push(MeasurementRow::new(
            "RCC Plinth Beams (Floor Level +30cm)",
            1.0,
            total_length,
            PLINTH_BEAM_WIDTH,
            PLINTH_BEAM_DEPTH,
            Unit::CubicMeter,
        ));
    } else {
        rows.push(MeasurementRow::new(
            "RR Masonry Basement",
            1.0,
            total_length,
            RR_BASEMENT_WIDTH,
            RR_BASEMENT_DEPTH,
            Unit::CubicMeter,
        ));
    }

    rows
}
