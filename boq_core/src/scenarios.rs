//! End-to-end estimates across modules.

use pretty_assertions::assert_eq;

use crate::boq::WorkItemKind;
use crate::expression::Expression;
use crate::project::Project;
use crate::setup::{ColumnGroup, ColumnGroupKind, CustomWall, FoundationType, GlobalParams, OpenArea, OpenAreaKind};
use crate::slab::SlabDeduction;
use crate::substructure::{self, SubstructureRows};
use crate::superstructure::{
    classify, Advisory, ColumnCategory, ColumnRecord, FloorParameters, FloorSummary, LintelDeduction, Opening, OpeningKind,
    WallKind, WallSegment,
};
use crate::units::round3;

const EPS: f64 = 1e-9;

fn single_wall_floor() -> FloorParameters {
    let mut floor = FloorParameters::new("Ground Floor");
    floor.walls.push(WallSegment::new(WallKind::Exterior, "Exterior", "10+5", 0.23, 3.0));
    // lintel band fully deducted
    floor.lintel_deductions.push(LintelDeduction::new("15"));
    floor
}

#[test]
fn plain_wall_volume() {
    let summary = FloorSummary::compute(&single_wall_floor());
    assert!((summary.volume.gross - 10.35).abs() < EPS);
    assert!((summary.net_volume() - 10.35).abs() < EPS);
    // no plinth area entered, so only the carpet goes negative
    assert_eq!(summary.advisories, vec![Advisory::NegativeCarpetArea]);
}

#[test]
fn default_lintel_band_over_walls() {
    let mut floor = FloorParameters::new("Ground Floor");
    floor.walls.push(WallSegment::new(WallKind::Exterior, "Exterior", "10+5", 0.23, 3.0));

    // every wall carries a 0.15 deep lintel unless a deduction says otherwise
    let summary = FloorSummary::compute(&floor);
    assert!((summary.volume.lintel.gross - 15.0 * 0.23 * 0.15).abs() < EPS);
    assert!((summary.volume.lintel.net - 0.5175).abs() < EPS);
    assert!((summary.net_volume() - 9.8325).abs() < EPS);

    // a wall with no lintels is one whose whole run is deducted
    floor.lintel_deductions.push(LintelDeduction::new("15"));
    let summary = FloorSummary::compute(&floor);
    assert!(summary.volume.lintel.net.abs() < EPS);
    assert!((summary.net_volume() - 10.35).abs() < EPS);
}

#[test]
fn wall_with_door() {
    let mut floor = single_wall_floor();
    floor.openings.push(Opening::new(OpeningKind::Door).with_size(1.0, 2.1).in_wall(0.23));
    let summary = FloorSummary::compute(&floor);
    assert!((summary.volume.openings - 0.483).abs() < EPS);
    assert_eq!(round3(summary.net_volume()), 9.867);
}

#[test]
fn rcc_footing_excavation() {
    let setup = GlobalParams {
        foundation_type: FoundationType::Rcc,
        column_groups: vec![ColumnGroup::new(ColumnGroupKind::Concealed, 4.0, 1)
            .with_name("C1")
            .with_footing(1.0, 1.0, 1.2)],
        ..Default::default()
    };
    let rows = SubstructureRows::generate(&setup);
    let pit = rows
        .excavation
        .iter()
        .find(|r| r.desc.contains("C1"))
        .expect("footing pit row");
    assert_eq!((pit.nos, pit.l, pit.b, pit.d), (4.0, 1.30, 1.30, 1.2));
}

#[test]
fn main_slab_less_open_area() {
    let mut floor = FloorParameters::new("Ground Floor");
    floor.plinth_area = Expression::new("100");
    floor.plinth_perimeter = Expression::new("40");
    floor.slab.overhang = 0.6;
    floor.slab.roof_thickness = 0.12;
    floor.slab.deductions.push(SlabDeduction::new("Courtyard", "10", true));

    let slab = FloorSummary::compute(&floor).slab;
    assert!((slab.main_area - 114.0).abs() < EPS);
    assert!((slab.main_volume - 13.68).abs() < EPS);
}

#[test]
fn exempt_wall_kept_out_of_foundation_and_footprint() {
    let mut setup = GlobalParams {
        ext_len: Expression::new("40"),
        ..Default::default()
    };
    let base_length = substructure::total_linear_length(&setup);
    let base_floor = FloorParameters::from_setup(&setup, 0);
    let base = FloorSummary::compute(&base_floor);

    setup.custom_walls.push(CustomWall::partition("Loft Wall", "5").exempt());
    let floor = FloorParameters::from_setup(&setup, 0);
    let summary = FloorSummary::compute(&floor);

    assert_eq!(substructure::total_linear_length(&setup), base_length);
    assert!((summary.carpet.footprint - base.carpet.footprint).abs() < EPS);
    assert!(summary.volume.gross > base.volume.gross);
}

#[test]
fn non_structural_open_area_adds_no_foundation() {
    let mut setup = GlobalParams {
        ext_len: Expression::new("30"),
        ..Default::default()
    };
    let before = substructure::total_linear_length(&setup);
    setup.open_areas.push(OpenArea::new(OpenAreaKind::CarPorch, "4", "6"));
    assert_eq!(substructure::total_linear_length(&setup), before);

    setup.open_areas.push(OpenArea::new(OpenAreaKind::SitOut, "3", "5"));
    assert_eq!(substructure::total_linear_length(&setup), before + 5.0);
}

#[test]
fn lintel_never_adds_volume() {
    let mut floor = single_wall_floor();
    floor.lintel_deductions.push(LintelDeduction::new("100"));
    let summary = FloorSummary::compute(&floor);
    assert_eq!(summary.volume.lintel.net, 0.0);
    assert!((summary.net_volume() - 10.35).abs() < EPS);
}

#[test]
fn classifier_splits_by_category() {
    let columns = vec![
        ColumnRecord::manual(ColumnCategory::Concealed).with_count(2.0),
        ColumnRecord::manual(ColumnCategory::Open).with_section(0.3, 0.3),
    ];
    let split = classify(&columns);
    assert_eq!((split.concealed_count, split.open_count), (1, 1));
    assert!((split.concealed_volume - 2.0 * 0.23 * 0.23 * 3.0).abs() < EPS);
    assert!((split.open_area - 1.2).abs() < EPS);
}

#[test]
fn repeated_estimates_agree() {
    let mut setup = GlobalParams {
        ext_len: Expression::new("12+12+10+10"),
        int_len: Expression::new("16"),
        ..Default::default()
    };
    setup.column_groups.push(ColumnGroup::new(ColumnGroupKind::Concealed, 6.0, 1).with_name("C1"));
    let mut project = Project::from_setup("E", "J", "C", setup);
    project.floors[0].plinth_area = Expression::new("120");
    project.floors[0].plinth_perimeter = Expression::new("44");
    project.auto_fill().unwrap();

    let first = project.estimate();
    let second = project.estimate();
    assert_eq!(first.floors, second.floors);
    assert_eq!(first.totals, second.totals);

    // auto-fill replaces rows rather than appending
    let excavation = |p: &Project| {
        p.work_items
            .iter()
            .find(|i| i.kind == WorkItemKind::Excavation)
            .map(|i| i.rows.len())
    };
    let rows_before = excavation(&project);
    project.auto_fill().unwrap();
    assert_eq!(excavation(&project), rows_before);
}

#[test]
fn rcc_without_columns_refuses_auto_fill() {
    let setup = GlobalParams {
        foundation_type: FoundationType::Rcc,
        ext_len: Expression::new("40"),
        ..Default::default()
    };
    let mut project = Project::from_setup("E", "J", "C", setup);
    let err = project.auto_fill().unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
}
