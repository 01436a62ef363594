//! # biocalc_core - Biofuel Lifecycle Carbon Intensity Engine
//!
//! `biocalc_core` computes the lifecycle carbon intensity of solid biofuel
//! pathways (agricultural production, industrial processing, distribution
//! transport, and end-use combustion) and converts the margin below the
//! fossil baseline into emission-reduction credits. All inputs and outputs
//! are JSON-serializable, making the engine easy to drive from CLIs, GUIs,
//! or service frontends.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: [`stages::calculate`] is a pure function over a
//!   snapshot and a reference store
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Graceful degradation**: only an unknown biomass aborts a run;
//!   every other missing reference entry falls back to a documented
//!   default, logged via `tracing`
//! - **Typed reference data**: transport modals, electricity sources,
//!   fuels, and industrial inputs are closed enums validated when the
//!   dataset loads, never by string matching at calculation time
//!
//! ## Quick Start
//!
//! ```rust
//! use biocalc_core::project::ProjectSnapshot;
//! use biocalc_core::reference::ReferenceStore;
//! use biocalc_core::stages::calculate;
//!
//! let snapshot = ProjectSnapshot {
//!     biomass_type: "Resíduo de Pinus".to_string(),
//!     production_volume_t: Some(1000.0),
//!     ..Default::default()
//! };
//!
//! let outcome = calculate(&snapshot, ReferenceStore::builtin()).unwrap();
//! println!("{} kg CO2eq/MJ", outcome.carbon_intensity.0);
//! ```
//!
//! ## Modules
//!
//! - [`project`] - Project container, metadata, and the input snapshot
//! - [`stages`] - Stage calculators and the [`stages::calculate`] orchestrator
//! - [`reference`] - Typed reference-data store and dataset loading
//! - [`factors`] - Named emission factors and baseline constants
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves and locking

pub mod errors;
pub mod factors;
pub mod file_io;
pub mod project;
pub mod reference;
pub mod stages;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project, FileLock};
pub use project::{Project, ProjectMetadata, ProjectSnapshot};
pub use reference::ReferenceStore;
pub use stages::{calculate, CalcOutcome};
