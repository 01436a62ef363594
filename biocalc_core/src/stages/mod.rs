//! # Stage Calculators and Orchestration
//!
//! The engine proper: four stage calculators composed by [`calculate`], the
//! single public entry point. Each stage consumes the borrowed snapshot and
//! reference store plus the per-MJ energy basis, and returns its partial
//! intensity; the orchestrator sums them, derives the efficiency margin and
//! credit volume, and packages everything into a [`CalcOutcome`].
//!
//! The computation is pure and synchronous: no shared state, no I/O beyond
//! tracing, and identical inputs produce bit-identical outcomes.
//!
//! ## Example
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
//! assert!(outcome.carbon_intensity.0 > 0.0);
//! ```

pub mod agricultural;
pub mod credits;
pub mod industrial;
pub mod transport;
pub mod use_phase;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CalcResult;
use crate::project::ProjectSnapshot;
use crate::reference::ReferenceStore;
use crate::units::CarbonIntensity;

pub use credits::CreditSummary;

/// Result record of one calculation.
///
/// Created fresh on every invocation and never mutated; the caller decides
/// whether and how to persist it. All values are unrounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalcOutcome {
    /// Calorific value the calculation used (MJ/kg of biomass)
    pub pci_mj_kg: f64,
    /// Stage intensities (kg CO2eq/MJ)
    pub agricultural: CarbonIntensity,
    pub industrial: CarbonIntensity,
    pub transport: CarbonIntensity,
    pub use_phase: CarbonIntensity,
    /// Lifecycle total: exactly the sum of the four stages
    pub carbon_intensity: CarbonIntensity,
    /// Margin below the fossil baseline (kg CO2eq/MJ)
    pub efficiency_margin: f64,
    /// Emission reduction relative to the baseline (%)
    pub reduction_percent: f64,
    /// Credit volume and estimated revenue
    pub credits: CreditSummary,
}

/// Run the full lifecycle calculation for one project snapshot.
///
/// The only hard failure is an unknown biomass
/// ([`crate::errors::CalcError::ReferenceDataMissing`]); every other
/// missing reference entry degrades to a documented default, visible in
/// the `tracing` output.
pub fn calculate(
    snapshot: &ProjectSnapshot,
    store: &ReferenceStore,
) -> CalcResult<CalcOutcome> {
    let biomass = store.biomass_property(&snapshot.biomass_type)?;
    let basis = biomass.calorific_value().energy_basis();

    let agricultural = agricultural::emissions(snapshot, store, basis, biomass);
    let industrial = industrial::emissions(snapshot, store, basis);
    let transport = transport::emissions(snapshot, store, basis);
    let use_phase = use_phase::emissions(biomass);

    let carbon_intensity = agricultural + industrial + transport + use_phase;
    let efficiency_margin = credits::efficiency_margin(carbon_intensity);
    let reduction_percent = credits::reduction_percent(efficiency_margin);
    let credit_summary = credits::convert(snapshot.production_volume_t, efficiency_margin);

    debug!(
        biomass = %snapshot.biomass_type,
        carbon_intensity = carbon_intensity.0,
        efficiency_margin,
        "calculation complete"
    );

    Ok(CalcOutcome {
        pci_mj_kg: biomass.pci_mj_kg,
        agricultural,
        industrial,
        transport,
        use_phase,
        carbon_intensity,
        efficiency_margin,
        reduction_percent,
        credits: credit_summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors;
    use crate::project::DomesticTransport;
    use crate::reference::BiomassProperty;

    fn store() -> ReferenceStore {
        let mut store = ReferenceStore::default();
        store.add_biomass(BiomassProperty {
            biomass_name: "Resíduo de Pinus".to_string(),
            pci_mj_kg: 18.8,
            combustion_emission: Some(0.0012),
        });
        store
    }

    fn snapshot() -> ProjectSnapshot {
        ProjectSnapshot {
            biomass_type: "Resíduo de Pinus".to_string(),
            production_volume_t: Some(1000.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_unknown_biomass_is_hard_failure() {
        let snapshot = ProjectSnapshot {
            biomass_type: "Bagaço de Cana".to_string(),
            ..Default::default()
        };
        let err = calculate(&snapshot, &store()).unwrap_err();
        assert_eq!(err.error_code(), "REFERENCE_DATA_MISSING");
    }

    #[test]
    fn test_additive_decomposition_is_exact() {
        let snapshot = ProjectSnapshot {
            biomass_processed: Some(1_000_000.0),
            water_consumption: Some(300.0),
            agr_transport_distance: Some(120.0),
            agr_transport_vehicle: Some("VUC (Urbano)".to_string()),
            domestic_transport: DomesticTransport {
                mass_kg: Some(500_000.0),
                distance_km: Some(200.0),
                ..Default::default()
            },
            ..snapshot()
        };
        let outcome = calculate(&snapshot, &store()).unwrap();

        let sum = outcome.agricultural
            + outcome.industrial
            + outcome.transport
            + outcome.use_phase;
        assert_eq!(outcome.carbon_intensity, sum);
    }

    #[test]
    fn test_reduction_percent_identity() {
        let outcome = calculate(&snapshot(), &store()).unwrap();
        let expected =
            (outcome.efficiency_margin / factors::FOSSIL_REFERENCE_WEIGHTED) * 100.0;
        assert_eq!(outcome.reduction_percent, expected);
    }

    #[test]
    fn test_idempotence() {
        let snapshot = snapshot();
        let store = store();
        let first = calculate(&snapshot, &store).unwrap();
        let second = calculate(&snapshot, &store).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_minimal_project_scenario() {
        // pci 18.8 and nothing else: only the agricultural production
        // fallback and the use-phase factor contribute.
        let outcome = calculate(&snapshot(), &store()).unwrap();

        assert!((outcome.agricultural.0 - 0.001335).abs() < 1e-6);
        assert_eq!(outcome.industrial, CarbonIntensity::ZERO);
        assert_eq!(outcome.transport, CarbonIntensity::ZERO);
        assert_eq!(outcome.use_phase, CarbonIntensity(0.0012));
        assert!(
            (outcome.carbon_intensity.0 - (outcome.agricultural.0 + 0.0012)).abs() < 1e-15
        );
    }

    #[test]
    fn test_outcome_serializes() {
        let outcome = calculate(&snapshot(), &store()).unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        let roundtrip: CalcOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, roundtrip);
    }
}
