//! # Project Data Structures
//!
//! [`ProjectSnapshot`] is the fully-assembled input the engine consumes:
//! one biomass pathway with its agricultural, industrial, and transport
//! quantities for a reference year. The engine treats it as immutable and
//! performs no completeness validation; assembling a complete snapshot
//! (typically over several form steps) is the caller's job.
//!
//! [`Project`] wraps a snapshot with identity, timestamps, a draft/completed
//! status, and the stored calculation outcome. Projects serialize to `.bcp`
//! files as human-readable JSON (see [`crate::file_io`]).
//!
//! ## Example
//!
//! ```rust
//! use biocalc_core::project::{Project, ProjectSnapshot};
//!
//! let snapshot = ProjectSnapshot {
//!     biomass_type: "Resíduo de Pinus".to_string(),
//!     production_volume_t: Some(1000.0),
//!     ..Default::default()
//! };
//! let project = Project::new("Caldeira Norte", snapshot);
//! assert!(!project.is_complete());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::reference::{ElectricitySource, FuelKind};
use crate::stages::CalcOutcome;

/// Current schema version for .bcp files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Annual electricity consumption split by source (kWh/yr).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ElectricitySplit {
    #[serde(default)]
    pub grid: f64,
    #[serde(default)]
    pub solar: f64,
    #[serde(default)]
    pub wind: f64,
    #[serde(default)]
    pub hydro: f64,
    #[serde(default)]
    pub biomass: f64,
    #[serde(default)]
    pub other: f64,
}

impl ElectricitySplit {
    /// Iterate the six declared sources with their quantities.
    pub fn by_source(&self) -> [(ElectricitySource, f64); 6] {
        [
            (ElectricitySource::Grid, self.grid),
            (ElectricitySource::Solar, self.solar),
            (ElectricitySource::Wind, self.wind),
            (ElectricitySource::Hydro, self.hydro),
            (ElectricitySource::Biomass, self.biomass),
            (ElectricitySource::Other, self.other),
        ]
    }
}

/// Annual fuel consumption split by kind (L/yr or kg/yr, matching the
/// unit of each fuel's reference factors).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelSplit {
    #[serde(default)]
    pub diesel: f64,
    #[serde(default)]
    pub gasoline: f64,
    #[serde(default)]
    pub ethanol: f64,
    #[serde(default)]
    pub biodiesel: f64,
    #[serde(default)]
    pub cng: f64,
    #[serde(default)]
    pub lpg: f64,
    #[serde(default)]
    pub biomass: f64,
    #[serde(default)]
    pub other: f64,
}

impl FuelSplit {
    /// Iterate the eight declared fuel kinds with their quantities.
    pub fn by_kind(&self) -> [(FuelKind, f64); 8] {
        [
            (FuelKind::Diesel, self.diesel),
            (FuelKind::Gasoline, self.gasoline),
            (FuelKind::Ethanol, self.ethanol),
            (FuelKind::Biodiesel, self.biodiesel),
            (FuelKind::Cng, self.cng),
            (FuelKind::Lpg, self.lpg),
            (FuelKind::Biomass, self.biomass),
            (FuelKind::Other, self.other),
        ]
    }
}

fn default_full_modal_pct() -> f64 {
    100.0
}

/// Domestic distribution leg: factory to consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomesticTransport {
    /// Mass transported (kg/yr)
    pub mass_kg: Option<f64>,
    /// Average distance (km)
    pub distance_km: Option<f64>,
    /// Modal split percentages; the caller keeps them summing to 100
    #[serde(default = "default_full_modal_pct")]
    pub modal_road_pct: f64,
    #[serde(default)]
    pub modal_rail_pct: f64,
    pub vehicle_type: Option<String>,
}

impl Default for DomesticTransport {
    fn default() -> Self {
        DomesticTransport {
            mass_kg: None,
            distance_km: None,
            modal_road_pct: default_full_modal_pct(),
            modal_rail_pct: 0.0,
            vehicle_type: None,
        }
    }
}

/// Export leg: factory to port to overseas consumer.
///
/// Captured on the snapshot for completeness; the transport stage does not
/// yet price this leg (see [`crate::stages::transport::export_emissions`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportTransport {
    /// Mass exported (t/yr)
    pub mass_t: Option<f64>,
    /// Factory-to-port distance (km)
    pub factory_port_distance_km: Option<f64>,
    #[serde(default = "default_full_modal_pct")]
    pub modal_road_pct: f64,
    #[serde(default)]
    pub modal_rail_pct: f64,
    #[serde(default)]
    pub modal_water_pct: f64,
    pub port_vehicle: Option<String>,
    /// Maritime distance, port to consumer (km)
    pub port_consumer_distance_km: Option<f64>,
}

impl Default for ExportTransport {
    fn default() -> Self {
        ExportTransport {
            mass_t: None,
            factory_port_distance_km: None,
            modal_road_pct: default_full_modal_pct(),
            modal_rail_pct: 0.0,
            modal_water_pct: 0.0,
            port_vehicle: None,
            port_consumer_distance_km: None,
        }
    }
}

/// Fully-specified production pathway for one reference year.
///
/// All quantities are absolute annual figures; the engine rescales them to
/// a per-MJ basis internally. Quantities are expected non-negative, but the
/// engine does not enforce this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    /// Biomass identity; must match a biomass-property record by exact name
    pub biomass_type: String,
    /// Administrative state (UF) for land-use-change lookups
    pub production_state: Option<String>,
    /// Corn-starch input for fermentation feedstocks (kg/MJ)
    pub starch_input: Option<f64>,

    /// Field-to-factory transport distance (km)
    pub agr_transport_distance: Option<f64>,
    /// Field-to-factory vehicle type (vehicle-table key)
    pub agr_transport_vehicle: Option<String>,

    /// Biomass processed by the plant (kg/yr); the normalization base for
    /// the industrial and domestic-transport stages
    pub biomass_processed: Option<f64>,
    /// Process water consumption (m³/yr)
    pub water_consumption: Option<f64>,
    #[serde(default)]
    pub electricity: ElectricitySplit,
    #[serde(default)]
    pub fuels: FuelSplit,
    /// Lubricant consumption (kg/yr)
    pub input_lubricant: Option<f64>,
    /// Generic chemical consumption (kg/yr)
    pub input_chemical: Option<f64>,

    #[serde(default)]
    pub domestic_transport: DomesticTransport,
    #[serde(default)]
    pub export_transport: ExportTransport,

    /// Finished biofuel production volume (t/yr)
    pub production_volume_t: Option<f64>,
}

/// Lifecycle status of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    /// Input still being assembled, or last calculation failed
    Draft,
    /// A calculation succeeded and its outcome is stored
    Completed,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Draft
    }
}

/// Project metadata (identity, naming, timestamps).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version of the serialized file
    pub version: String,
    pub id: Uuid,
    /// User-facing project name
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Root project container.
///
/// This is the top-level struct serialized to `.bcp` files. The engine
/// itself only reads `snapshot`; status and outcome are caller-side state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,
    pub status: ProjectStatus,
    pub snapshot: ProjectSnapshot,
    /// Result of the last successful calculation, if any
    pub outcome: Option<CalcOutcome>,
}

impl Project {
    /// Create a new draft project around a snapshot.
    pub fn new(name: impl Into<String>, snapshot: ProjectSnapshot) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                name: name.into(),
                created: now,
                modified: now,
            },
            status: ProjectStatus::Draft,
            snapshot,
            outcome: None,
        }
    }

    /// Store a calculation outcome and mark the project completed.
    pub fn complete_with(&mut self, outcome: CalcOutcome) {
        self.outcome = Some(outcome);
        self.status = ProjectStatus::Completed;
        self.touch();
    }

    /// Discard any stored outcome and return the project to draft.
    ///
    /// Callers do this when a snapshot field changes after completion, so
    /// stale results never outlive the input they were computed from.
    pub fn invalidate_outcome(&mut self) {
        if self.outcome.take().is_some() {
            self.status = ProjectStatus::Draft;
            self.touch();
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn is_complete(&self) -> bool {
        self.status == ProjectStatus::Completed
    }
}
