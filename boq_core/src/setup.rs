//! # Project Setup
//!
//! Project-wide parameters captured once, before any floor is measured:
//! the main wall runs, extra walls, open areas around the building, column
//! groups and the foundation system. The sub-structure generator reads these
//! directly; floors copy what they need when they are first created.
//!
//! ## Foundation length
//!
//! ```text
//! total = exterior + interior
//!       + Σ custom walls that are not plinth-exempt
//!       + Σ free length of open areas included in the plinth
//! ```
//!
//! Open areas that are not structural (an open car porch, say) contribute
//! nothing.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::expression::Expression;
use crate::numeric;
use crate::units::round2;

/// Default thickness of main walls (m)
pub const DEFAULT_WALL_WIDTH: f64 = 0.23;

/// Default thickness of a new partition wall (m)
pub const DEFAULT_PARTITION_WIDTH: f64 = 0.15;

/// Foundation system of the building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FoundationType {
    /// Random-rubble masonry strip foundation (load-bearing walls)
    #[default]
    #[serde(rename = "RR", alias = "rr")]
    RandomRubble,
    /// Isolated RCC footings under columns
    #[serde(rename = "RCC", alias = "rcc")]
    Rcc,
}

impl FoundationType {
    pub const ALL: [FoundationType; 2] = [FoundationType::RandomRubble, FoundationType::Rcc];

    pub fn display_name(&self) -> &'static str {
        match self {
            FoundationType::RandomRubble => "RR Masonry",
            FoundationType::Rcc => "RCC Framed",
        }
    }

    pub fn is_rcc(&self) -> bool {
        matches!(self, FoundationType::Rcc)
    }
}

impl fmt::Display for FoundationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// An extra wall run defined at project level (partition, compound
/// return, etc.).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomWall {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub name: String,

    /// Length, may be an expression
    #[serde(default)]
    pub length: Expression,

    /// Thickness (m)
    #[serde(default, deserialize_with = "numeric::lenient_non_negative")]
    pub width: f64,

    /// Real wall that does not sit on the plinth foundation
    #[serde(default)]
    pub is_plinth_exempt: bool,
}

impl CustomWall {
    /// New partition wall with the default 0.15 m thickness.
    pub fn partition(name: impl Into<String>, length: impl Into<Expression>) -> Self {
        CustomWall {
            id: Uuid::new_v4(),
            name: name.into(),
            length: length.into(),
            width: DEFAULT_PARTITION_WIDTH,
            is_plinth_exempt: false,
        }
    }

    /// Mark as exempt from plinth/foundation length.
    pub fn exempt(mut self) -> Self {
        self.is_plinth_exempt = true;
        self
    }
}

/// Kind of open area attached to the building footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenAreaKind {
    #[default]
    #[serde(rename = "Sit-out")]
    SitOut,
    Courtyard,
    #[serde(rename = "Car Porch")]
    CarPorch,
    #[serde(rename = "Open Area")]
    OpenArea,
    Balcony,
    Verandah,
}

impl OpenAreaKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            OpenAreaKind::SitOut => "Sit-out",
            OpenAreaKind::Courtyard => "Courtyard",
            OpenAreaKind::CarPorch => "Car Porch",
            OpenAreaKind::OpenArea => "Open Area",
            OpenAreaKind::Balcony => "Balcony",
            OpenAreaKind::Verandah => "Verandah",
        }
    }

    /// Courtyards are open to the sky.
    pub fn has_roof(&self) -> bool {
        !matches!(self, OpenAreaKind::Courtyard)
    }

    /// Car porches and plain open areas carry no foundation.
    pub fn is_structural(&self) -> bool {
        !matches!(self, OpenAreaKind::CarPorch | OpenAreaKind::OpenArea)
    }
}

impl fmt::Display for OpenAreaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// An open area (sit-out, courtyard, porch) bordering the building.
///
/// `touching_len` is the edge shared with the building walls, `free_len`
/// the exposed edge that needs its own foundation and beam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenArea {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub kind: OpenAreaKind,

    /// Optional user label; falls back to the kind name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub touching_len: Expression,

    #[serde(default)]
    pub free_len: Expression,

    /// Floor area of the open area (m²)
    #[serde(default)]
    pub area: Expression,

    #[serde(default = "default_true")]
    pub has_roof: bool,

    #[serde(default = "default_true")]
    pub include_in_plinth: bool,
}

fn default_true() -> bool {
    true
}

impl OpenArea {
    pub fn new(kind: OpenAreaKind, touching_len: impl Into<Expression>, free_len: impl Into<Expression>) -> Self {
        OpenArea {
            id: Uuid::new_v4(),
            kind,
            name: None,
            touching_len: touching_len.into(),
            free_len: free_len.into(),
            area: Expression::default(),
            has_roof: kind.has_roof(),
            include_in_plinth: kind.is_structural(),
        }
    }

    pub fn with_area(mut self, area: impl Into<Expression>) -> Self {
        self.area = area.into();
        self
    }

    /// Change the kind, resetting the roof and plinth flags to the kind's defaults.
    pub fn set_kind(&mut self, kind: OpenAreaKind) {
        self.kind = kind;
        self.has_roof = kind.has_roof();
        self.include_in_plinth = kind.is_structural();
    }

    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(self.kind.display_name())
    }

    /// Free length that counts toward the foundation (0 when non-structural).
    pub fn structural_free_length(&self) -> f64 {
        if self.include_in_plinth {
            self.free_len.value()
        } else {
            0.0
        }
    }
}

/// Kind of column group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColumnGroupKind {
    /// Main frame columns hidden inside walls
    #[default]
    Concealed,
    /// Free-standing columns (porch, sit-out)
    Open,
}

/// A group of identical columns with their footing.
///
/// Footing dimensions that are blank or non-positive fall back to
/// 1.0 × 1.0 × 1.2 m; column section to 0.23 × 0.23 m.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnGroup {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    #[serde(default)]
    pub kind: ColumnGroupKind,

    #[serde(default)]
    pub name: String,

    /// Number of columns in the group
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub count: f64,

    /// Footing length (m)
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub footing_length: f64,

    /// Footing breadth (m)
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub footing_width: f64,

    /// Depth of footing bottom below ground (m)
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub footing_depth: f64,

    /// Column length (m)
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub column_length: f64,

    /// Column breadth (m)
    #[serde(default, deserialize_with = "numeric::lenient")]
    pub column_width: f64,
}

/// Default footing plan size (m)
pub const DEFAULT_FOOTING_SIZE: f64 = 1.0;
/// Default footing depth below ground (m)
pub const DEFAULT_FOOTING_DEPTH: f64 = 1.2;
/// Default column section size (m)
pub const DEFAULT_COLUMN_SIZE: f64 = 0.23;

impl ColumnGroup {
    /// New group sized for the given number of floors.
    pub fn new(kind: ColumnGroupKind, count: f64, floors: u32) -> Self {
        let (name, sizes) = match kind {
            ColumnGroupKind::Concealed => ("Concealed Column", suggested_sizes(floors)),
            ColumnGroupKind::Open => ("Open Column (RCC)", suggested_sizes(1)),
        };
        ColumnGroup {
            id: Uuid::new_v4(),
            kind,
            name: name.to_string(),
            count,
            footing_length: sizes.footing_length,
            footing_width: sizes.footing_width,
            footing_depth: sizes.footing_depth,
            column_length: sizes.column_length,
            column_width: sizes.column_width,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_footing(mut self, length: f64, width: f64, depth: f64) -> Self {
        self.footing_length = length;
        self.footing_width = width;
        self.footing_depth = depth;
        self
    }

    pub fn with_column(mut self, length: f64, width: f64) -> Self {
        self.column_length = length;
        self.column_width = width;
        self
    }

    pub fn footing_l(&self) -> f64 {
        numeric::positive_or(self.footing_length, DEFAULT_FOOTING_SIZE)
    }

    pub fn footing_b(&self) -> f64 {
        numeric::positive_or(self.footing_width, DEFAULT_FOOTING_SIZE)
    }

    pub fn footing_d(&self) -> f64 {
        numeric::positive_or(self.footing_depth, DEFAULT_FOOTING_DEPTH)
    }

    pub fn column_l(&self) -> f64 {
        numeric::positive_or(self.column_length, DEFAULT_COLUMN_SIZE)
    }

    pub fn column_b(&self) -> f64 {
        numeric::positive_or(self.column_width, DEFAULT_COLUMN_SIZE)
    }

    /// Concealed by kind, or by a name mentioning "conceal".
    pub fn is_concealed(&self) -> bool {
        self.kind == ColumnGroupKind::Concealed || self.name.to_lowercase().contains("conceal")
    }

    /// Open by kind, or by a name mentioning "open" / "sitout".
    pub fn is_open(&self) -> bool {
        let name = self.name.to_lowercase();
        self.kind == ColumnGroupKind::Open || name.contains("open") || name.contains("sitout")
    }

    fn resize(&mut self, sizes: &SuggestedSizes) {
        self.footing_length = sizes.footing_length;
        self.footing_width = sizes.footing_width;
        self.footing_depth = sizes.footing_depth;
        self.column_length = sizes.column_length;
        self.column_width = sizes.column_width;
    }
}

/// Rule-of-thumb footing and column sizes by storey count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuggestedSizes {
    pub footing_length: f64,
    pub footing_width: f64,
    pub footing_depth: f64,
    pub column_length: f64,
    pub column_width: f64,
}

/// Suggested sizes for a G+(floors-1) structure.
///
/// ```rust
/// use boq_core::setup::suggested_sizes;
///
/// let two = suggested_sizes(2);
/// assert_eq!(two.footing_length, 1.2);
/// assert_eq!(two.column_width, 0.30);
/// ```
pub fn suggested_sizes(floors: u32) -> SuggestedSizes {
    let (f, d, cl, cb) = match floors {
        0 | 1 => (1.0, 1.2, 0.23, 0.23),
        2 => (1.2, 1.5, 0.23, 0.30),
        3 => (1.5, 1.5, 0.30, 0.30),
        _ => (1.8, 1.8, 0.30, 0.45),
    };
    SuggestedSizes {
        footing_length: f,
        footing_width: f,
        footing_depth: d,
        column_length: cl,
        column_width: cb,
    }
}

/// Default name for the floor at `index` (0-based).
pub fn default_floor_name(index: usize) -> String {
    match index {
        0 => "Ground Floor".to_string(),
        1 => "First Floor".to_string(),
        n => format!("Floor {n}"),
    }
}

/// Project-wide parameters.
///
/// ## JSON Example
///
/// ```json
/// {
///   "ext_len": "10+5",
///   "ext_width": 0.23,
///   "int_len": "12",
///   "int_width": 0.23,
///   "custom_walls": [],
///   "open_areas": [],
///   "column_groups": [],
///   "foundation_type": "RR",
///   "floor_names": ["Ground Floor"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalParams {
    /// Total exterior wall length (expression)
    #[serde(default)]
    pub ext_len: Expression,

    /// Exterior wall thickness (m)
    #[serde(default = "default_wall_width", deserialize_with = "numeric::lenient_non_negative")]
    pub ext_width: f64,

    /// Total interior wall length (expression)
    #[serde(default)]
    pub int_len: Expression,

    /// Interior wall thickness (m)
    #[serde(default = "default_wall_width", deserialize_with = "numeric::lenient_non_negative")]
    pub int_width: f64,

    #[serde(default)]
    pub custom_walls: Vec<CustomWall>,

    #[serde(default)]
    pub open_areas: Vec<OpenArea>,

    #[serde(default)]
    pub column_groups: Vec<ColumnGroup>,

    #[serde(default)]
    pub foundation_type: FoundationType,

    #[serde(default = "default_floor_names")]
    pub floor_names: Vec<String>,
}

fn default_wall_width() -> f64 {
    DEFAULT_WALL_WIDTH
}

fn default_floor_names() -> Vec<String> {
    vec![default_floor_name(0)]
}

impl Default for GlobalParams {
    fn default() -> Self {
        GlobalParams {
            ext_len: Expression::default(),
            ext_width: DEFAULT_WALL_WIDTH,
            int_len: Expression::default(),
            int_width: DEFAULT_WALL_WIDTH,
            custom_walls: Vec::new(),
            open_areas: Vec::new(),
            column_groups: Vec::new(),
            foundation_type: FoundationType::default(),
            floor_names: default_floor_names(),
        }
    }
}

impl GlobalParams {
    pub fn num_floors(&self) -> usize {
        self.floor_names.len()
    }

    /// True when any floor is a cellar.
    pub fn has_cellar(&self) -> bool {
        self.floor_names.iter().any(|n| n.to_lowercase().contains("cellar"))
    }

    /// Index of the floor that carries the custom walls and open areas: the
    /// first floor named "ground" (any case), else the first floor.
    pub fn ground_floor_index(&self) -> usize {
        self.floor_names
            .iter()
            .position(|n| n.to_lowercase().contains("ground"))
            .unwrap_or(0)
    }

    /// Length of every wall, exempt or not (display figure).
    pub fn total_enclosed_wall_length(&self) -> f64 {
        let custom: f64 = self.custom_walls.iter().map(|w| w.length.value()).sum();
        round2(self.ext_len.value() + self.int_len.value() + custom)
    }

    /// Linear length the foundation rules measure along.
    pub fn total_foundation_length(&self) -> f64 {
        let custom: f64 = self
            .custom_walls
            .iter()
            .filter(|w| !w.is_plinth_exempt)
            .map(|w| w.length.value())
            .sum();
        let open: f64 = self.open_areas.iter().map(OpenArea::structural_free_length).sum();
        round2(self.ext_len.value() + self.int_len.value() + custom + open)
    }

    /// Total number of columns across all groups.
    pub fn total_columns(&self) -> f64 {
        self.column_groups.iter().map(|g| g.count.max(0.0).trunc()).sum()
    }

    /// RCC needs at least one column group before rows can be generated.
    pub fn is_column_missing(&self) -> bool {
        self.foundation_type.is_rcc() && self.column_groups.is_empty()
    }

    /// Change the storey count: floor names are extended or truncated and
    /// column groups are resized to the suggested sizes (all groups under
    /// RCC, concealed groups otherwise).
    pub fn set_floor_count(&mut self, count: usize) {
        let count = count.max(1);
        if count > self.floor_names.len() {
            for i in self.floor_names.len()..count {
                self.floor_names.push(default_floor_name(i));
            }
        } else {
            self.floor_names.truncate(count);
        }

        let sizes = suggested_sizes(count as u32);
        let rcc = self.foundation_type.is_rcc();
        for group in &mut self.column_groups {
            if rcc || group.kind == ColumnGroupKind::Concealed {
                group.resize(&sizes);
            }
        }
    }
}
