//! Excavation rows.

use crate::measurement::{MeasurementRow, Unit};
use crate::setup::GlobalParams;
use crate::units::round2;

use super::{PLINTH_EXCAVATION_DEPTH, RR_BASE_WIDTH, RR_TOTAL_DEPTH, WORKING_SPACE};

/// Cellar pit plan size and depth (m)
const CELLAR_LENGTH: f64 = 15.0;
const CELLAR_WIDTH: f64 = 10.0;
const CELLAR_DEPTH: f64 = 3.0;

/// Plinth beam trench width (m)
const PLINTH_TRENCH_WIDTH: f64 = 0.4;

/// Excavation rows in measurement order.
///
/// 1. Mass excavation when any floor is a cellar.
/// 2. One pit per column group, footing plan plus working space.
/// 3. RCC without cellar: shallow plinth-beam trench. RR: foundation trench.
pub fn excavation_rows(params: &GlobalParams, total_length: f64) -> Vec<MeasurementRow> {
    let mut rows = Vec::new();
    let has_cellar = params.has_cellar();

    if has_cellar {
        rows.push(MeasurementRow::new(
            "Mass Excavation (Cellar Area)",
            1.0,
            CELLAR_LENGTH,
            CELLAR_WIDTH,
            CELLAR_DEPTH,
            Unit::CubicMeter,
        ));
    }

    for group in &params.column_groups {
        rows.push(MeasurementRow::new(
            format!("Excavation for {} Footing", group.name),
            group.count,
            round2(group.footing_l() + WORKING_SPACE),
            round2(group.footing_b() + WORKING_SPACE),
            group.footing_d(),
            Unit::CubicMeter,
        ));
    }

    if params.foundation_type.is_rcc() {
        if !has_cellar {
            rows.push(MeasurementRow::new(
                "Shallow Excavation for Plinth Beams (Topsoil + Bedding)",
                1.0,
                total_length,
                PLINTH_TRENCH_WIDTH,
                round2(PLINTH_EXCAVATION_DEPTH),
                Unit::CubicMeter,
            ));
        }
    } else {
        rows.push(MeasurementRow::new(
            "Excavation for Foundation Trenches",
            1.0,
            total_length,
            round2(RR_BASE_WIDTH + WORKING_SPACE),
            round2(RR_TOTAL_DEPTH),
            Unit::CubicMeter,
        ));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::{ColumnGroup, ColumnGroupKind, FoundationType};
    use pretty_assertions::assert_eq;

    fn rcc_params() -> GlobalParams {
        GlobalParams {
            foundation_type: FoundationType::Rcc,
            column_groups: vec![ColumnGroup::new(ColumnGroupKind::Concealed, 4.0, 1)
                .with_name("C1")
                .with_footing(1.0, 1.0, 1.2)],
            ..Default::default()
        }
    }

    #[test]
    fn test_rcc_footing_pit() {
        let rows = excavation_rows(&rcc_params(), 40.0);
        assert_eq!(rows.len(), 2);
        let pit = &rows[0];
        assert_eq!(pit.desc, "Excavation for C1 Footing");
        assert_eq!(pit.nos, 4.0);
        assert_eq!(pit.l, 1.30);
        assert_eq!(pit.b, 1.30);
        assert_eq!(pit.d, 1.2);

        let trench = &rows[1];
        assert_eq!(trench.l, 40.0);
        assert_eq!(trench.b, 0.4);
        assert_eq!(trench.d, 0.15);
    }

    #[test]
    fn test_cellar_replaces_plinth_trench() {
        let mut params = rcc_params();
        params.floor_names = vec!["Cellar".to_string(), "Ground Floor".to_string()];
        let rows = excavation_rows(&params, 40.0);
        let descs: Vec<&str> = rows.iter().map(|r| r.desc.as_str()).collect();
        assert_eq!(descs, vec!["Mass Excavation (Cellar Area)", "Excavation for C1 Footing"]);
        assert!((rows[0].quantity() - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_rr_trench() {
        let params = GlobalParams::default();
        let rows = excavation_rows(&params, 52.0);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].desc, "Excavation for Foundation Trenches");
        assert_eq!(rows[0].b, 0.9);
        assert_eq!(rows[0].d, 1.15);
        assert!((rows[0].quantity() - 52.0 * 0.9 * 1.15).abs() < 1e-9);
    }

    #[test]
    fn test_blank_footing_uses_defaults() {
        let mut params = rcc_params();
        params.column_groups[0] = params.column_groups[0].clone().with_footing(0.0, 0.0, 0.0);
        let rows = excavation_rows(&params, 10.0);
        assert_eq!((rows[0].l, rows[0].b, rows[0].d), (1.30, 1.30, 1.2));
    }
}
