//! Default super-structure BOQ rows.
//!
//! Quick first-pass figures straight from project setup, before any floor
//! has been measured in detail. Each row carries its computed quantity as
//! an override so the printed figure matches the rule even when the user
//! edits the dimensions for display.

use crate::measurement::{MeasurementRow, Unit};
use crate::setup::GlobalParams;
use crate::units::round2;

use super::walls::DEFAULT_WALL_HEIGHT;

/// Roof slab thickness for first-pass estimates (m)
pub const ROUGH_SLAB_THICKNESS: f64 = 0.125;
/// Beam volume as a share of slab volume
pub const BEAM_SHARE_OF_SLAB: f64 = 0.18;

/// Wall volume rows at storey height.
pub fn masonry_rows(params: &GlobalParams) -> Vec<MeasurementRow> {
    let mut rows = vec![MeasurementRow::header("WALLS VOLUME")];
    rows.push(wall_row("Exterior Walls (Ground Floor)", params.ext_len.value(), params.ext_width));
    rows.push(wall_row("Interior Walls (Ground Floor)", params.int_len.value(), params.int_width));
    for wall in &params.custom_walls {
        rows.push(wall_row(&format!("{} (Ground Floor)", wall.name), wall.length.value(), wall.width));
    }
    rows
}

fn wall_row(desc: &str, length: f64, width: f64) -> MeasurementRow {
    let length = length.max(0.0);
    let volume = length * width * DEFAULT_WALL_HEIGHT;
    MeasurementRow::new(desc, 1.0, length, width, DEFAULT_WALL_HEIGHT, Unit::CubicMeter).with_override(round2(volume))
}

/// Roof slab from the plinth area and beams as a share of it.
pub fn slab_and_beam_rows(plinth_area: f64) -> Vec<MeasurementRow> {
    let plinth_area = plinth_area.max(0.0);
    let side = round2(plinth_area.sqrt());
    let slab_volume = plinth_area * ROUGH_SLAB_THICKNESS;
    let beam_volume = slab_volume * BEAM_SHARE_OF_SLAB;

    vec![
        MeasurementRow::header("RCC SLAB & BEAMS (M25)"),
        MeasurementRow::new("Roof Slab Volume (GF)", 1.0, side, side, ROUGH_SLAB_THICKNESS, Unit::CubicMeter)
            .with_override(round2(slab_volume)),
        MeasurementRow::new("Main/Secondary Beams (Approximate volume)", 1.0, 1.0, 1.0, 1.0, Unit::CubicMeter)
            .with_override(round2(beam_volume)),
    ]
}

/// Columns above plinth, one storey per group.
pub fn column_rows(params: &GlobalParams) -> Vec<MeasurementRow> {
    let mut rows = vec![MeasurementRow::header("RCC COLUMN ABOVE PLINTH")];
    for group in &params.column_groups {
        let volume = group.column_l() * group.column_b() * DEFAULT_WALL_HEIGHT * group.count;
        rows.push(
            MeasurementRow::new(
                format!("{} Volume (Ground Floor)", group.name),
                group.count,
                group.column_l(),
                group.column_b(),
                DEFAULT_WALL_HEIGHT,
                Unit::CubicMeter,
            )
            .with_override(round2(volume)),
        );
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Expression;
    use crate::measurement::calculate_total;
    use crate::setup::{ColumnGroup, ColumnGroupKind, CustomWall};

    #[test]
    fn test_masonry_rows() {
        let mut params = GlobalParams {
            ext_len: Expression::new("10+5"),
            int_len: Expression::new("abc"),
            ..Default::default()
        };
        params.custom_walls.push(CustomWall::partition("Store Wall", "4"));
        let rows = masonry_rows(&params);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[1].quantity(), 10.35);
        assert_eq!(rows[2].quantity(), 0.0);
        assert_eq!(rows[3].desc, "Store Wall (Ground Floor)");
        assert_eq!(rows[3].quantity(), 1.8);
    }

    #[test]
    fn test_slab_and_beams() {
        let rows = slab_and_beam_rows(100.0);
        assert_eq!(rows[1].l, 10.0);
        assert_eq!(rows[1].quantity(), 12.5);
        assert_eq!(rows[2].quantity(), 2.25);
        assert!((calculate_total(&rows) - 14.75).abs() < 1e-9);
    }

    #[test]
    fn test_column_rows() {
        let params = GlobalParams {
            column_groups: vec![ColumnGroup::new(ColumnGroupKind::Concealed, 10.0, 1).with_name("C1")],
            ..Default::default()
        };
        let rows = column_rows(&params);
        assert_eq!(rows[1].desc, "C1 Volume (Ground Floor)");
        assert_eq!(rows[1].quantity(), 1.59);
    }
}
