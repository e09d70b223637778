//! # boq_core - Construction Quantity Estimation Engine
//!
//! `boq_core` turns a small set of building parameters into a bill of
//! quantities: sub-structure rows from wall lengths and column groups,
//! per-floor masonry volume, plaster and carpet area, and roof slab concrete.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Every aggregate is a pure function of its inputs
//! - **Lenient Inputs**: Bad expressions and numbers read as 0, never error
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types for the few operations that fail
//!
//! ## Quick Start
//!
//! ```rust
//! use boq_core::expression::Expression;
//! use boq_core::project::Project;
//! use boq_core::setup::GlobalParams;
//!
//! let setup = GlobalParams {
//!     ext_len: Expression::new("12+12+10+10"),
//!     int_len: Expression::new("16"),
//!     ..Default::default()
//! };
//! let mut project = Project::from_setup("A. Estimator", "25-001", "Client", setup);
//! project.auto_fill().unwrap();
//!
//! let report = project.estimate();
//! assert!(report.totals.substructure > 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`expression`] - Arithmetic expressions typed into dimension fields
//! - [`numeric`] - Lenient numeric parsing
//! - [`units`] - Rounding helpers and unit wrappers
//! - [`measurement`] - Measurement rows and quantities
//! - [`setup`] - Project-wide parameters
//! - [`substructure`] - Excavation, foundation and filling rows
//! - [`superstructure`] - Per-floor walls, openings, beams and columns
//! - [`slab`] - Roof slabs, sunshades and parapets
//! - [`boq`] - Work items and the bill of quantities
//! - [`project`] - Project container and estimate report
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves

pub mod boq;
pub mod errors;
pub mod expression;
pub mod file_io;
pub mod measurement;
pub mod numeric;
pub mod project;
pub mod setup;
pub mod slab;
pub mod substructure;
pub mod superstructure;
pub mod units;

#[cfg(test)]
mod scenarios;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use expression::{evaluate, Expression};
pub use file_io::{load_project, save_project};
pub use measurement::{calculate_quantity, calculate_total, MeasurementRow, Unit};
pub use project::{EstimateReport, Project, ProjectMetadata};
pub use setup::GlobalParams;
