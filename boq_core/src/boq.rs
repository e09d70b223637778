//! # Bill of Quantities
//!
//! Work items are the BOQ line items. Each has a typed kind that fixes its
//! phase and whether it is measured once per floor. Sub-structure items
//! can be auto-filled from project setup; the rest are measured by hand or
//! seeded from the first-pass super-structure rules.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::boq::{auto_fill, standard_scope, BillOfQuantities};
//! use boq_core::expression::Expression;
//! use boq_core::setup::GlobalParams;
//!
//! let setup = GlobalParams { ext_len: Expression::new("40"), ..Default::default() };
//! let mut items = standard_scope();
//! auto_fill(&mut items, &setup).unwrap();
//!
//! let bill = BillOfQuantities::from_items(&items);
//! assert_eq!(bill.sections[0].total, 8.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};
use crate::measurement::{calculate_total, MeasurementRow, Unit};
use crate::setup::GlobalParams;
use crate::substructure::{self, earth_filling_rows, excavation_rows, foundation_rows, site_clearance_rows};
use crate::superstructure::rules;
use crate::units::round2;

/// Construction phase of a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "Sub Structure")]
    SubStructure,
    #[serde(rename = "Super Structure")]
    SuperStructure,
    Finishing,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::SubStructure, Phase::SuperStructure, Phase::Finishing];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::SubStructure => "Sub Structure",
            Phase::SuperStructure => "Super Structure",
            Phase::Finishing => "Finishing",
        };
        f.write_str(name)
    }
}

/// What a work item measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkItemKind {
    SiteClearance,
    Excavation,
    Foundation,
    EarthFilling,
    Masonry,
    RoofSlab,
    Plastering,
    Other,
}

impl WorkItemKind {
    /// Phase for the kind (`Other` defaults to super-structure).
    pub fn phase(&self) -> Phase {
        match self {
            WorkItemKind::SiteClearance
            | WorkItemKind::Excavation
            | WorkItemKind::Foundation
            | WorkItemKind::EarthFilling => Phase::SubStructure,
            WorkItemKind::Masonry | WorkItemKind::RoofSlab | WorkItemKind::Other => Phase::SuperStructure,
            WorkItemKind::Plastering => Phase::Finishing,
        }
    }

    /// Measured separately on every floor.
    pub fn per_floor(&self) -> bool {
        matches!(self, WorkItemKind::Masonry | WorkItemKind::RoofSlab | WorkItemKind::Plastering)
    }
}

/// One BOQ line item with its measurement sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    pub title: String,

    pub kind: WorkItemKind,

    pub phase: Phase,

    #[serde(default)]
    pub per_floor: bool,

    /// Floor this copy belongs to, once expanded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,

    #[serde(default)]
    pub rows: Vec<MeasurementRow>,
}

impl WorkItem {
    pub fn new(title: impl Into<String>, kind: WorkItemKind) -> Self {
        WorkItem {
            id: Uuid::new_v4(),
            title: title.into(),
            kind,
            phase: kind.phase(),
            per_floor: kind.per_floor(),
            floor: None,
            rows: Vec::new(),
        }
    }

    /// Free-form item in an explicit phase.
    pub fn other(title: impl Into<String>, phase: Phase) -> Self {
        WorkItem {
            phase,
            ..WorkItem::new(title, WorkItemKind::Other)
        }
    }

    pub fn total(&self) -> f64 {
        calculate_total(&self.rows)
    }
}

/// The default work breakdown of a house build.
pub fn standard_scope() -> Vec<WorkItem> {
    use WorkItemKind::*;
    vec![
        WorkItem::new("Site Clearance & Marking", SiteClearance),
        WorkItem::new("Earthwork Excavation", Excavation),
        WorkItem::new("Foundation & Basement Works", Foundation),
        WorkItem::new("Earth Filling in Plinth", EarthFilling),
        WorkItem::new("Superstructure Masonry (Walls)", Masonry),
        WorkItem::other("Doors, Windows & Openings", Phase::Finishing),
        WorkItem::other("Lintels, Sunshades & Lofts", Phase::SuperStructure),
        WorkItem::new("RCC Roof Slab & Beams", RoofSlab),
        WorkItem::other("Staircase Construction", Phase::SuperStructure),
        WorkItem::other("Porch & Sit-out Structure", Phase::SuperStructure),
        WorkItem::new("Plastering Works", Plastering),
        WorkItem::other("Water proofing of RCC roof", Phase::SuperStructure),
        WorkItem::other("Flooring Works", Phase::Finishing),
        WorkItem::other("Painting & Finishing", Phase::Finishing),
        WorkItem::other("Electrical & Plumbing Works", Phase::Finishing),
    ]
}

/// Replace every per-floor item with one copy per floor.
///
/// Items already tied to a floor pass through unchanged, so expanding an
/// expanded list is a no-op.
pub fn expand_per_floor(items: &[WorkItem], floor_names: &[String]) -> Vec<WorkItem> {
    let mut expanded = Vec::with_capacity(items.len());
    for item in items {
        if !item.per_floor || item.floor.is_some() || floor_names.is_empty() {
            expanded.push(item.clone());
            continue;
        }
        for floor in floor_names {
            expanded.push(WorkItem {
                id: Uuid::new_v4(),
                title: format!("{} - {}", item.title, floor),
                floor: Some(floor.clone()),
                ..item.clone()
            });
        }
    }
    expanded
}

/// Fill sub-structure items with generated rows.
///
/// Existing rows of those items are replaced. Returns the number of items
/// filled. Fails when an RCC project has no column groups yet.
pub fn auto_fill(items: &mut [WorkItem], setup: &GlobalParams) -> CalcResult<usize> {
    if setup.is_column_missing() {
        return Err(CalcError::invalid_input(
            "column_groups",
            "0",
            "RCC foundation needs at least one column group",
        ));
    }

    let total = substructure::total_linear_length(setup);
    let mut filled = 0;
    for item in items.iter_mut() {
        let rows = match item.kind {
            WorkItemKind::SiteClearance => site_clearance_rows(),
            WorkItemKind::Excavation => excavation_rows(setup, total),
            WorkItemKind::Foundation => foundation_rows(setup, total),
            WorkItemKind::EarthFilling => earth_filling_rows(setup, total),
            _ => continue,
        };
        item.rows = rows;
        filled += 1;
    }
    tracing::debug!(filled, total_length = total, "auto-filled sub-structure items");
    Ok(filled)
}

/// Seed empty masonry and roof-slab items with first-pass rule rows.
///
/// Items that already have rows are left alone.
pub fn seed_superstructure(items: &mut [WorkItem], setup: &GlobalParams, plinth_area: f64) -> usize {
    let mut seeded = 0;
    for item in items.iter_mut().filter(|i| i.rows.is_empty()) {
        match item.kind {
            WorkItemKind::Masonry => {
                item.rows = rules::masonry_rows(setup);
                item.rows.extend(rules::column_rows(setup));
            }
            WorkItemKind::RoofSlab => item.rows = rules::slab_and_beam_rows(plinth_area),
            _ => continue,
        }
        seeded += 1;
    }
    seeded
}

/// One printed section of the bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoqSection {
    pub number: usize,
    pub title: String,
    pub phase: Phase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    pub unit: Unit,
    /// Headers and rows with a non-zero quantity
    pub rows: Vec<MeasurementRow>,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BillOfQuantities {
    pub sections: Vec<BoqSection>,
}

impl BillOfQuantities {
    /// Printable bill: empty items are skipped, zero rows dropped.
    pub fn from_items(items: &[WorkItem]) -> Self {
        let sections = items
            .iter()
            .filter(|item| item.rows.iter().any(|r| !r.is_header))
            .enumerate()
            .map(|(i, item)| BoqSection {
                number: i + 1,
                title: item.title.clone(),
                phase: item.phase,
                floor: item.floor.clone(),
                unit: item
                    .rows
                    .iter()
                    .find(|r| !r.is_header)
                    .map(|r| r.unit.clone())
                    .unwrap_or_default(),
                rows: item
                    .rows
                    .iter()
                    .filter(|r| r.is_header || r.quantity() != 0.0)
                    .cloned()
                    .collect(),
                total: round2(item.total()),
            })
            .collect();
        BillOfQuantities { sections }
    }

    pub fn phase_total(&self, phase: Phase) -> f64 {
        self.sections.iter().filter(|s| s.phase == phase).map(|s| s.total).sum()
    }

    pub fn sections_in(&self, phase: Phase) -> impl Iterator<Item = &BoqSection> {
        self.sections.iter().filter(move |s| s.phase == phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Expression;
    use crate::setup::FoundationType;
    use pretty_assertions::assert_eq;

    fn setup() -> GlobalParams {
        GlobalParams {
            ext_len: Expression::new("30"),
            int_len: Expression::new("10"),
            floor_names: vec!["Ground Floor".to_string(), "First Floor".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_phases_and_flags() {
        assert_eq!(WorkItemKind::Excavation.phase(), Phase::SubStructure);
        assert_eq!(WorkItemKind::Plastering.phase(), Phase::Finishing);
        assert!(WorkItemKind::Masonry.per_floor());
        assert!(!WorkItemKind::Foundation.per_floor());
        assert_eq!(WorkItem::other("Flooring Works", Phase::Finishing).phase, Phase::Finishing);
    }

    #[test]
    fn test_expand_per_floor() {
        let items = standard_scope();
        let expanded = expand_per_floor(&items, &setup().floor_names);
        assert_eq!(expanded.len(), items.len() + 3);
        let masonry: Vec<&str> = expanded
            .iter()
            .filter(|i| i.kind == WorkItemKind::Masonry)
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(
            masonry,
            vec!["Superstructure Masonry (Walls) - Ground Floor", "Superstructure Masonry (Walls) - First Floor"]
        );
        let again = expand_per_floor(&expanded, &setup().floor_names);
        assert_eq!(again.len(), expanded.len());
    }

    #[test]
    fn test_auto_fill_substructure() {
        let mut items = standard_scope();
        assert_eq!(auto_fill(&mut items, &setup()).unwrap(), 4);
        assert_eq!(items[0].rows.len(), 1);
        assert_eq!(items[1].rows[0].desc, "Excavation for Foundation Trenches");
        assert_eq!(items[1].rows[0].l, 40.0);
        assert!(items[4].rows.is_empty());
    }

    #[test]
    fn test_auto_fill_blocked_without_columns() {
        let mut params = setup();
        params.foundation_type = FoundationType::Rcc;
        let mut items = standard_scope();
        let err = auto_fill(&mut items, &params).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(items.iter().all(|i| i.rows.is_empty()));
    }

    #[test]
    fn test_seed_superstructure() {
        let mut items = standard_scope();
        assert_eq!(seed_superstructure(&mut items, &setup(), 100.0), 2);
        assert_eq!(items[4].rows[0].desc, "--- WALLS VOLUME ---");
        assert_eq!(items[7].total(), 12.5 + 2.25);
        assert_eq!(seed_superstructure(&mut items, &setup(), 100.0), 0);
    }

    #[test]
    fn test_bill_filters_zero_rows() {
        let mut items = standard_scope();
        auto_fill(&mut items, &setup()).unwrap();
        items[1].rows.push(MeasurementRow::new("Nothing", 0.0, 5.0, 1.0, 1.0, Unit::CubicMeter));

        let bill = BillOfQuantities::from_items(&items);
        assert_eq!(bill.sections.len(), 4);
        assert_eq!(bill.sections[0].unit, Unit::Hours);
        assert!(bill.sections[1].rows.iter().all(|r| r.desc != "Nothing"));
        assert_eq!(bill.sections[3].number, 4);
        assert!(bill.sections_in(Phase::Finishing).next().is_none());

        let sub: f64 = bill.sections.iter().map(|s| s.total).sum();
        assert!((bill.phase_total(Phase::SubStructure) - sub).abs() < 1e-9);
    }
}
