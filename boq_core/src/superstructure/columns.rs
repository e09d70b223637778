//! # Column Deductions
//!
//! Each floor keeps its own flat list of [`ColumnRecord`]s. Concealed
//! columns are cut out of the masonry. Open columns stand free and add
//! plaster on all four faces.
//!
//! ## Seeding
//!
//! A floor's list starts as a one-time copy of the project's concealed
//! column groups (see `FloorParameters::seed_columns`). Later edits to the
//! project setup do not flow back into floors that are already seeded.
//!
//! ## Example
//!
//! ```rust
//! use boq_core::superstructure::columns::{classify, ColumnCategory, ColumnRecord};
//!
//! let columns = vec![
//!     ColumnRecord::manual(ColumnCategory::Concealed).with_count(4.0),
//!     ColumnRecord::manual(ColumnCategory::Open).with_count(2.0),
//! ];
//! let split = classify(&columns);
//! assert!((split.concealed_volume - 4.0 * 0.23 * 0.23 * 3.0).abs() < 1e-9);
//! assert!((split.open_area - 2.0 * 0.92).abs() < 1e-9);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::numeric;
use crate::setup::{ColumnGroup, DEFAULT_COLUMN_SIZE};

use super::walls::DEFAULT_WALL_HEIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnCategory {
    /// Inside a wall: masonry deduction
    #[default]
    Concealed,
    /// Free-standing: plaster addition
    Open,
}

impl fmt::Display for ColumnCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnCategory::Concealed => write!(f, "concealed"),
            ColumnCategory::Open => write!(f, "open"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnSource {
    /// Copied from a project column group
    Auto,
    /// Added by hand on this floor
    #[default]
    Manual,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub length: f64,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub width: f64,

    /// Height used for the masonry deduction (m)
    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub height: f64,

    /// Height used for plaster, when it differs from `height`
    #[serde(default, deserialize_with = "numeric::lenient_opt_non_negative", skip_serializing_if = "Option::is_none")]
    pub plaster_height: Option<f64>,

    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub nos: f64,

    #[serde(default)]
    pub category: ColumnCategory,

    #[serde(default)]
    pub source: ColumnSource,

    /// Project column group this record was copied from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
}

impl ColumnRecord {
    /// Hand-added column, 0.23 × 0.23 × 3.0, one off.
    pub fn manual(category: ColumnCategory) -> Self {
        let name = match category {
            ColumnCategory::Concealed => "Manual Concealed Col",
            ColumnCategory::Open => "Manual Open Col",
        };
        ColumnRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            length: DEFAULT_COLUMN_SIZE,
            width: DEFAULT_COLUMN_SIZE,
            height: DEFAULT_WALL_HEIGHT,
            plaster_height: None,
            nos: 1.0,
            category,
            source: ColumnSource::Manual,
            group_id: None,
        }
    }

    /// Copy of a project column group at storey height.
    pub fn from_group(group: &ColumnGroup, category: ColumnCategory) -> Self {
        ColumnRecord {
            id: Uuid::new_v4(),
            name: group.name.clone(),
            length: group.column_l(),
            width: group.column_b(),
            height: DEFAULT_WALL_HEIGHT,
            plaster_height: None,
            nos: numeric::non_negative(group.count),
            category,
            source: ColumnSource::Auto,
            group_id: Some(group.id),
        }
    }

    pub fn with_count(mut self, nos: f64) -> Self {
        self.nos = numeric::non_negative(nos);
        self
    }

    pub fn with_section(mut self, length: f64, width: f64) -> Self {
        self.length = numeric::non_negative(length);
        self.width = numeric::non_negative(width);
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = numeric::non_negative(height);
        self
    }

    /// Set the plaster-only height; the masonry height is untouched.
    pub fn set_plaster_height(&mut self, height: Option<f64>) {
        self.plaster_height = height.map(numeric::non_negative);
    }

    pub fn height_for_masonry(&self) -> f64 {
        self.height
    }

    pub fn height_for_plaster(&self) -> f64 {
        self.plaster_height.unwrap_or(self.height)
    }

    /// l × b × h × nos
    pub fn volume(&self) -> f64 {
        self.length * self.width * self.height_for_masonry() * self.nos
    }

    /// Plan perimeter times count: 2 × (l + b) × nos
    pub fn plan_perimeter(&self) -> f64 {
        2.0 * (self.length + self.width) * self.nos
    }

    /// Exposed faces: 2 × (l + b) × h_plaster × nos
    pub fn plaster_area(&self) -> f64 {
        self.plan_perimeter() * self.height_for_plaster()
    }
}

/// Column list split by category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnDeductions {
    pub concealed_count: usize,
    pub open_count: usize,
    /// Σ l × b × h × nos over concealed records
    pub concealed_volume: f64,
    /// Σ 2 × (l + b) × nos over open records
    pub open_area: f64,
    /// Σ 2 × (l + b) × h_plaster × nos over open records
    pub open_plaster_area: f64,
}

impl ColumnDeductions {
    pub fn has_concealed(&self) -> bool {
        self.concealed_count > 0
    }

    pub fn has_open(&self) -> bool {
        self.open_count > 0
    }
}

/// Partition into (concealed, open).
pub fn partition(columns: &[ColumnRecord]) -> (Vec<&ColumnRecord>, Vec<&ColumnRecord>) {
    columns.iter().partition(|c| c.category == ColumnCategory::Concealed)
}

/// Classify a floor's columns and sum each category.
pub fn classify(columns: &[ColumnRecord]) -> ColumnDeductions {
    let (concealed, open) = partition(columns);
    ColumnDeductions {
        concealed_count: concealed.len(),
        open_count: open.len(),
        concealed_volume: concealed.iter().map(|c| c.volume()).sum(),
        open_area: open.iter().map(|c| c.plan_perimeter()).sum(),
        open_plaster_area: open.iter().map(|c| c.plaster_area()).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::ColumnGroupKind;

    #[test]
    fn test_manual_defaults() {
        let col = ColumnRecord::manual(ColumnCategory::Open);
        assert_eq!(col.name, "Manual Open Col");
        assert_eq!((col.length, col.width, col.height, col.nos), (0.23, 0.23, 3.0, 1.0));
        assert_eq!(col.source, ColumnSource::Manual);
    }

    #[test]
    fn test_from_group() {
        let group = ColumnGroup::new(ColumnGroupKind::Concealed, 6.0, 2).with_name("C1");
        let col = ColumnRecord::from_group(&group, ColumnCategory::Concealed);
        assert_eq!(col.group_id, Some(group.id));
        assert_eq!((col.length, col.width), (0.23, 0.30));
        assert_eq!(col.nos, 6.0);
        assert_eq!(col.source, ColumnSource::Auto);
    }

    #[test]
    fn test_plaster_height_independent() {
        let mut col = ColumnRecord::manual(ColumnCategory::Open);
        col.set_plaster_height(Some(2.4));
        assert_eq!(col.height_for_masonry(), 3.0);
        assert_eq!(col.height_for_plaster(), 2.4);
        assert!((col.plaster_area() - 0.92 * 2.4).abs() < 1e-9);
        assert!((col.volume() - 0.23 * 0.23 * 3.0).abs() < 1e-9);

        col.set_plaster_height(None);
        assert_eq!(col.height_for_plaster(), 3.0);
    }

    #[test]
    fn test_classify() {
        let columns = vec![
            ColumnRecord::manual(ColumnCategory::Concealed).with_count(8.0),
            ColumnRecord::manual(ColumnCategory::Open).with_section(0.3, 0.3).with_count(2.0),
            ColumnRecord::manual(ColumnCategory::Concealed).with_height(2.7),
        ];
        let split = classify(&columns);
        assert_eq!(split.concealed_count, 2);
        assert_eq!(split.open_count, 1);
        let expected = 8.0 * 0.23 * 0.23 * 3.0 + 0.23 * 0.23 * 2.7;
        assert!((split.concealed_volume - expected).abs() < 1e-9);
        assert!((split.open_area - 2.4).abs() < 1e-9);
        assert!((split.open_plaster_area - 7.2).abs() < 1e-9);
    }

    #[test]
    fn test_empty_list() {
        let split = classify(&[]);
        assert!(!split.has_concealed());
        assert!(!split.has_open());
        assert_eq!(split.concealed_volume, 0.0);
    }

    #[test]
    fn test_blank_count_reads_zero() {
        let col: ColumnRecord = serde_json::from_str(r#"{ "name": "X", "length": "0.23", "width": "0.23", "height": "3", "nos": "" }"#).unwrap();
        assert_eq!(col.nos, 0.0);
        assert_eq!(col.volume(), 0.0);
        assert_eq!(col.category, ColumnCategory::Concealed);
    }

    #[test]
    fn test_negative_plaster_height_loads_as_zero() {
        let col: ColumnRecord =
            serde_json::from_str(r#"{ "name": "X", "height": "3", "nos": 1, "plaster_height": -2 }"#).unwrap();
        assert_eq!(col.plaster_height, Some(0.0));
        assert_eq!(col.height_for_plaster(), 0.0);
        assert_eq!(col.plaster_area(), 0.0);
    }
}
