//! # Floor Parameters
//!
//! Everything measured on one floor. A floor owns its records outright:
//! values copied from the project setup are copies, and nothing here is
//! ever written by another floor's computation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expression::Expression;
use crate::numeric;
use crate::setup::{GlobalParams, OpenAreaKind};
use crate::slab::SlabParameters;

use super::beams::{Beam, BeamCategory, LintelDeduction};
use super::columns::{ColumnCategory, ColumnRecord};
use super::openings::Opening;
use super::walls::{WallAdjustment, WallKind, WallSegment, DEFAULT_WALL_HEIGHT};

/// Per-floor measurement inputs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FloorParameters {
    pub name: String,

    #[serde(default)]
    pub walls: Vec<WallSegment>,

    #[serde(default)]
    pub adjustments: Vec<WallAdjustment>,

    #[serde(default)]
    pub openings: Vec<Opening>,

    #[serde(default)]
    pub beams: Vec<Beam>,

    #[serde(default)]
    pub lintel_deductions: Vec<LintelDeduction>,

    #[serde(default)]
    pub columns: Vec<ColumnRecord>,

    /// Set once the project column groups have been copied in
    #[serde(default)]
    pub columns_seeded: bool,

    #[serde(default)]
    pub plinth_area: Expression,

    #[serde(default)]
    pub plinth_perimeter: Expression,

    /// Manual masonry volume deduction (m³)
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub deduction_volume: f64,

    /// Manual plaster area deduction (m²)
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub deduction_area: f64,

    /// Manual carpet area deduction (m²)
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub deduction_carpet: f64,

    #[serde(default)]
    pub slab: SlabParameters,
}

impl FloorParameters {
    /// Empty floor.
    pub fn new(name: impl Into<String>) -> Self {
        FloorParameters {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Floor `index` of the project, pre-filled from setup.
    ///
    /// Every floor gets the exterior and interior walls at storey height.
    /// The ground floor (see [`GlobalParams::ground_floor_index`]) also gets
    /// the custom walls and one open-area beam per open area.
    pub fn from_setup(setup: &GlobalParams, index: usize) -> Self {
        let name = setup
            .floor_names
            .get(index)
            .cloned()
            .unwrap_or_else(|| crate::setup::default_floor_name(index));
        let mut floor = FloorParameters::new(name);

        floor.walls.push(WallSegment::new(
            WallKind::Exterior,
            "Exterior Walls",
            setup.ext_len.clone(),
            setup.ext_width,
            DEFAULT_WALL_HEIGHT,
        ));
        floor.walls.push(WallSegment::new(
            WallKind::Interior,
            "Interior Walls",
            setup.int_len.clone(),
            setup.int_width,
            DEFAULT_WALL_HEIGHT,
        ));

        if index == setup.ground_floor_index() {
            for custom in &setup.custom_walls {
                let mut wall = WallSegment::new(
                    WallKind::Custom,
                    custom.name.clone(),
                    custom.length.clone(),
                    custom.width,
                    DEFAULT_WALL_HEIGHT,
                );
                wall.is_plinth_exempt = custom.is_plinth_exempt;
                floor.walls.push(wall);
            }

            for area in &setup.open_areas {
                let length = if area.kind == OpenAreaKind::Courtyard {
                    Expression::number(area.touching_len.value() + area.free_len.value())
                } else {
                    area.free_len.clone()
                };
                floor
                    .beams
                    .push(Beam::new(BeamCategory::OpenArea, format!("{} Beam", area.label()), length));
            }
        }

        floor
    }

    /// Copy the project's concealed column groups into this floor, once.
    ///
    /// Returns the number of records added. A floor that is already seeded
    /// is left alone, so per-floor edits survive later setup changes.
    pub fn seed_columns(&mut self, setup: &GlobalParams) -> usize {
        if self.columns_seeded {
            tracing::warn!(floor = %self.name, "columns already seeded, skipping");
            return 0;
        }
        let before = self.columns.len();
        for group in setup.column_groups.iter().filter(|g| g.is_concealed()) {
            if !self.has_group(group.id) {
                self.columns.push(ColumnRecord::from_group(group, ColumnCategory::Concealed));
            }
        }
        self.columns_seeded = true;
        self.columns.len() - before
    }

    pub fn has_group(&self, group_id: Uuid) -> bool {
        self.columns.iter().any(|c| c.group_id == Some(group_id))
    }

    /// Add a project column group under `category`. No-op if already present
    /// or the group id is unknown.
    pub fn include_group(&mut self, setup: &GlobalParams, group_id: Uuid, category: ColumnCategory) -> bool {
        if self.has_group(group_id) {
            return false;
        }
        match setup.column_groups.iter().find(|g| g.id == group_id) {
            Some(group) => {
                self.columns.push(ColumnRecord::from_group(group, category));
                true
            }
            None => false,
        }
    }

    /// Remove every record copied from a group.
    pub fn exclude_group(&mut self, group_id: Uuid) -> usize {
        let before = self.columns.len();
        self.columns.retain(|c| c.group_id != Some(group_id));
        before - self.columns.len()
    }

    pub fn add_manual_column(&mut self, category: ColumnCategory) -> &mut ColumnRecord {
        self.columns.push(ColumnRecord::manual(category));
        let last = self.columns.len() - 1;
        &mut self.columns[last]
    }

    /// Distinct wall thicknesses, thickest first.
    pub fn wall_width_options(&self) -> Vec<f64> {
        let mut widths: Vec<f64> = self.walls.iter().map(|w| w.width).filter(|w| *w > 0.0).collect();
        widths.sort_by(|a, b| b.total_cmp(a));
        widths.dedup();
        widths
    }

    pub fn plinth_area_m2(&self) -> f64 {
        self.plinth_area.value()
    }

    pub fn plinth_perimeter_m(&self) -> f64 {
        self.plinth_perimeter.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::{ColumnGroup, ColumnGroupKind, CustomWall, OpenArea};

    fn setup() -> GlobalParams {
        let mut setup = GlobalParams {
            ext_len: Expression::new("12+12+10+10"),
            int_len: Expression::new("14"),
            int_width: 0.15,
            floor_names: vec!["Ground Floor".to_string(), "First Floor".to_string()],
            ..Default::default()
        };
        setup.custom_walls.push(CustomWall::partition("Compound return", "3").exempt());
        setup.open_areas.push(OpenArea::new(OpenAreaKind::Courtyard, "4", "2"));
        setup.open_areas.push(OpenArea::new(OpenAreaKind::SitOut, "3", "5"));
        setup.column_groups.push(ColumnGroup::new(ColumnGroupKind::Concealed, 8.0, 2).with_name("C1"));
        setup.column_groups.push(ColumnGroup::new(ColumnGroupKind::Open, 2.0, 2).with_name("Porch"));
        setup
    }

    #[test]
    fn test_ground_floor_from_setup() {
        let floor = FloorParameters::from_setup(&setup(), 0);
        assert_eq!(floor.name, "Ground Floor");
        assert_eq!(floor.walls.len(), 3);
        assert_eq!(floor.walls[0].length_m(), 44.0);
        assert_eq!(floor.walls[1].width, 0.15);
        assert!(floor.walls[2].is_plinth_exempt);
        assert!(floor.walls.iter().all(|w| w.height == 3.0));

        assert_eq!(floor.beams.len(), 2);
        assert_eq!(floor.beams[0].length_m(), 6.0);
        assert_eq!(floor.beams[1].length_m(), 5.0);
        assert!(floor.beams.iter().all(|b| b.category == BeamCategory::OpenArea));
    }

    #[test]
    fn test_upper_floor_from_setup() {
        let floor = FloorParameters::from_setup(&setup(), 1);
        assert_eq!(floor.name, "First Floor");
        assert_eq!(floor.walls.len(), 2);
        assert!(floor.beams.is_empty());
    }

    #[test]
    fn test_seed_columns_once() {
        let mut setup = setup();
        let mut floor = FloorParameters::from_setup(&setup, 0);
        assert_eq!(floor.seed_columns(&setup), 1);
        assert!(floor.columns_seeded);
        assert_eq!(floor.columns[0].name, "C1");

        floor.columns[0].nos = 6.0;
        setup.column_groups[0].count = 12.0;
        assert_eq!(floor.seed_columns(&setup), 0);
        assert_eq!(floor.columns.len(), 1);
        assert_eq!(floor.columns[0].nos, 6.0);
    }

    #[test]
    fn test_include_exclude_group() {
        let setup = setup();
        let porch = setup.column_groups[1].id;
        let mut floor = FloorParameters::new("Ground Floor");

        assert!(floor.include_group(&setup, porch, ColumnCategory::Open));
        assert!(!floor.include_group(&setup, porch, ColumnCategory::Open));
        assert!(!floor.include_group(&setup, Uuid::new_v4(), ColumnCategory::Open));
        assert_eq!(floor.columns[0].category, ColumnCategory::Open);

        floor.add_manual_column(ColumnCategory::Concealed).nos = 2.0;
        assert_eq!(floor.exclude_group(porch), 1);
        assert_eq!(floor.columns.len(), 1);
        assert_eq!(floor.columns[0].nos, 2.0);
    }

    #[test]
    fn test_wall_width_options() {
        let mut floor = FloorParameters::from_setup(&setup(), 0);
        floor.walls.push(WallSegment::new(WallKind::Custom, "Thin", "2", 0.23, 3.0));
        assert_eq!(floor.wall_width_options(), vec![0.23, 0.15]);
    }
}
