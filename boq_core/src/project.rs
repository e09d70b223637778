//! # Project Data Structures
//!
//! The `Project` struct is the root container for one estimate. Projects
//! serialize to `.boq.json` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, estimator, job info, timestamps)
//! ├── setup: GlobalParams (walls, open areas, column groups, foundation)
//! ├── floors: Vec<FloorParameters> (one per floor name)
//! └── work_items: Vec<WorkItem> (BOQ line items with measurement rows)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use boq_core::expression::Expression;
//! use boq_core::project::Project;
//! use boq_core::setup::GlobalParams;
//!
//! let setup = GlobalParams { ext_len: Expression::new("10+5"), ..Default::default() };
//! let project = Project::from_setup("A. Estimator", "25-001", "Client", setup);
//! assert_eq!(project.floors.len(), 1);
//!
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Ground Floor"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::boq::{self, BillOfQuantities, Phase, WorkItem};
use crate::errors::{CalcError, CalcResult};
use crate::setup::GlobalParams;
use crate::substructure::SubstructureRows;
use crate::superstructure::{FloorParameters, FloorSummary};
use crate::units::{round2, round3};

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, estimator, job info)
    pub meta: ProjectMetadata,

    /// Project-wide parameters
    #[serde(default)]
    pub setup: GlobalParams,

    /// Per-floor measurements, in floor order
    #[serde(default)]
    pub floors: Vec<FloorParameters>,

    /// BOQ line items
    #[serde(default)]
    pub work_items: Vec<WorkItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// ```rust
    /// use boq_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.estimator, "John Doe");
    /// assert!(project.floors.is_empty());
    /// ```
    pub fn new(estimator: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                estimator: estimator.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            setup: GlobalParams::default(),
            floors: Vec::new(),
            work_items: Vec::new(),
        }
    }

    /// New project with floors and the standard scope built from setup.
    ///
    /// Every floor is seeded with the concealed column groups. The ground
    /// floor's slab deduction list is seeded from the open areas.
    pub fn from_setup(
        estimator: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
        setup: GlobalParams,
    ) -> Self {
        let mut project = Project::new(estimator, job_id, client);
        let mut floors: Vec<FloorParameters> = (0..setup.num_floors())
            .map(|i| FloorParameters::from_setup(&setup, i))
            .collect();
        for floor in &mut floors {
            floor.seed_columns(&setup);
        }
        if let Some(ground) = floors.get_mut(setup.ground_floor_index()) {
            ground.slab.seed_deductions(&setup.open_areas);
        }
        project.work_items = boq::expand_per_floor(&boq::standard_scope(), &setup.floor_names);
        project.floors = floors;
        project.setup = setup;
        project
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn floor(&self, name: &str) -> CalcResult<&FloorParameters> {
        self.floors
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| CalcError::floor_not_found(name))
    }

    /// Mutable floor lookup. Marks the project modified only when found.
    pub fn floor_mut(&mut self, name: &str) -> CalcResult<&mut FloorParameters> {
        let floor = self
            .floors
            .iter_mut()
            .find(|f| f.name == name)
            .ok_or_else(|| CalcError::floor_not_found(name))?;
        self.meta.modified = Utc::now();
        Ok(floor)
    }

    /// Fill the sub-structure work items from setup.
    pub fn auto_fill(&mut self) -> CalcResult<usize> {
        let filled = boq::auto_fill(&mut self.work_items, &self.setup)?;
        let plinth_area = self
            .floors
            .get(self.setup.ground_floor_index())
            .map(|f| f.plinth_area_m2())
            .unwrap_or(0.0);
        let seeded = boq::seed_superstructure(&mut self.work_items, &self.setup, plinth_area);
        self.touch();
        Ok(filled + seeded)
    }

    pub fn estimate(&self) -> EstimateReport {
        EstimateReport::build(self, None)
    }

    /// Report restricted to one floor.
    pub fn estimate_floor(&self, name: &str) -> CalcResult<EstimateReport> {
        let floor = self.floor(name)?;
        Ok(EstimateReport::build(self, Some(floor)))
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    #[serde(default)]
    pub version: String,

    /// Name of the person preparing the estimate
    #[serde(default)]
    pub estimator: String,

    /// Job/project number
    #[serde(default)]
    pub job_id: String,

    /// Client name
    #[serde(default)]
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

/// Project-wide figures.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectTotals {
    pub masonry_volume: f64,
    pub plaster_area: f64,
    pub carpet_area: f64,
    pub slab_concrete: f64,
    pub frame_concrete: f64,
    pub parapet_volume: f64,
    pub substructure: f64,
    /// Columns across all project groups
    pub column_count: f64,
}

/// Everything the CLI prints, serializable for `--json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateReport {
    pub job_id: String,
    pub client: String,
    pub foundation: String,
    pub substructure: SubstructureRows,
    /// Rounded per-floor summaries
    pub floors: Vec<FloorSummary>,
    pub bill: BillOfQuantities,
    pub totals: ProjectTotals,
}

impl EstimateReport {
    fn build(project: &Project, only: Option<&FloorParameters>) -> Self {
        let substructure = SubstructureRows::generate(&project.setup);
        let summaries: Vec<FloorSummary> = match only {
            Some(floor) => vec![FloorSummary::compute(floor)],
            None => project.floors.iter().map(FloorSummary::compute).collect(),
        };
        let bill = BillOfQuantities::from_items(&project.work_items);

        let totals = ProjectTotals {
            masonry_volume: round3(summaries.iter().map(|s| s.volume.net).sum()),
            plaster_area: round2(summaries.iter().map(|s| s.area.net).sum()),
            carpet_area: round2(summaries.iter().map(|s| s.carpet.net).sum()),
            slab_concrete: round3(summaries.iter().map(|s| s.slab.total_concrete).sum()),
            frame_concrete: round3(summaries.iter().map(|s| s.concrete_volume).sum()),
            parapet_volume: round3(summaries.iter().map(|s| s.slab.parapet_volume).sum()),
            substructure: round2(bill.phase_total(Phase::SubStructure)),
            column_count: project.setup.total_columns(),
        };

        let advisories: usize = summaries.iter().map(|s| s.advisories.len()).sum();
        if advisories > 0 {
            tracing::warn!(advisories, "estimate has negative figures");
        }

        EstimateReport {
            job_id: project.meta.job_id.clone(),
            client: project.meta.client.clone(),
            foundation: project.setup.foundation_type.to_string(),
            substructure,
            floors: summaries.iter().map(FloorSummary::rounded).collect(),
            bill,
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Expression;
    use crate::setup::{ColumnGroup, ColumnGroupKind, CustomWall, OpenArea, OpenAreaKind};

    fn setup() -> GlobalParams {
        let mut setup = GlobalParams {
            ext_len: Expression::new("12+12+10+10"),
            int_len: Expression::new("16"),
            ..Default::default()
        };
        setup.set_floor_count(2);
        setup.column_groups.push(ColumnGroup::new(ColumnGroupKind::Concealed, 8.0, 2).with_name("C1"));
        setup.open_areas.push(OpenArea::new(OpenAreaKind::Courtyard, "3", "3").with_area("9"));
        setup
    }

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.estimator, "John Doe");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_from_setup_builds_floors() {
        let project = Project::from_setup("E", "J", "C", setup());
        assert_eq!(project.floors.len(), 2);
        assert!(project.floors.iter().all(|f| f.columns_seeded && f.columns.len() == 1));
        assert_eq!(project.floors[0].slab.deductions.len(), 1);
        assert!(project.floors[0].slab.deductions[0].deduct);
        assert!(project.floors[1].slab.deductions.is_empty());
        assert_eq!(project.work_items.len(), boq::standard_scope().len() + 3);
    }

    #[test]
    fn test_floor_lookup() {
        let mut project = Project::from_setup("E", "J", "C", setup());
        assert!(project.floor("First Floor").is_ok());
        let err = project.floor("Terrace").unwrap_err();
        assert_eq!(err, CalcError::floor_not_found("Terrace"));
        project.floor_mut("Ground Floor").unwrap().deduction_volume = 1.0;
        assert_eq!(project.floors[0].deduction_volume, 1.0);
    }

    #[test]
    fn test_ground_floor_found_by_name() {
        let mut setup = setup();
        setup.floor_names = vec!["Cellar".to_string(), "Ground Floor".to_string()];
        setup.custom_walls.push(CustomWall::partition("Store Wall", "4"));
        let project = Project::from_setup("E", "J", "C", setup);

        let cellar = project.floor("Cellar").unwrap();
        let ground = project.floor("Ground Floor").unwrap();
        assert_eq!(cellar.walls.len(), 2);
        assert_eq!(ground.walls.len(), 3);
        assert!(cellar.beams.is_empty());
        assert_eq!(ground.beams.len(), 1);
        assert!(cellar.slab.deductions.is_empty());
        assert_eq!(ground.slab.deductions.len(), 1);
    }

    #[test]
    fn test_failed_floor_lookup_keeps_timestamp() {
        let mut project = Project::from_setup("E", "J", "C", setup());
        let before = project.meta.modified;
        assert!(project.floor_mut("Terrace").is_err());
        assert_eq!(project.meta.modified, before);
        assert!(project.floor_mut("Ground Floor").is_ok());
        assert!(project.meta.modified >= before);
    }

    #[test]
    fn test_estimate_totals() {
        let mut project = Project::from_setup("E", "J", "C", setup());
        project.floors[0].plinth_area = Expression::new("120");
        project.auto_fill().unwrap();

        let report = project.estimate();
        assert_eq!(report.floors.len(), 2);
        let sum: f64 = report.floors.iter().map(|f| f.volume.net).sum();
        assert!((report.totals.masonry_volume - round3(sum)).abs() < 1e-6);
        assert!(report.totals.substructure > 0.0);
        assert_eq!(report.foundation, "RR Masonry");
        assert_eq!(report.totals.column_count, 8.0);

        let one = project.estimate_floor("First Floor").unwrap();
        assert_eq!(one.floors.len(), 1);
        assert!(project.estimate_floor("Terrace").is_err());
    }

    #[test]
    fn test_project_serialization() {
        let project = Project::from_setup("Jane", "25-042", "Test Client", setup());
        let json = serde_json::to_string_pretty(&project).unwrap();
        assert!(json.contains("25-042"));
        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.floors, project.floors);
        assert_eq!(roundtrip.setup, project.setup);
    }
}
