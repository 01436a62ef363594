//! # Distribution Transport Stage
//!
//! Emissions from moving the finished fuel to consumers. Only the domestic
//! leg is priced today; the export leg is a deliberate no-op kept visible
//! in [`export_emissions`] until product decides how it should be modeled.

use crate::project::ProjectSnapshot;
use crate::reference::{ReferenceStore, TransportModal};
use crate::units::{CarbonIntensity, EnergyBasis};

/// Total distribution emission intensity (kg CO2eq/MJ).
pub fn emissions(
    snapshot: &ProjectSnapshot,
    store: &ReferenceStore,
    basis: EnergyBasis,
) -> CarbonIntensity {
    domestic_emissions(snapshot, store, basis) + export_emissions(snapshot)
}

/// Domestic factory-to-consumer leg.
///
/// `mass × distance × road_factor`, rescaled to per-MJ terms through the
/// plant throughput. Mass and distance are both required; without a known
/// throughput the result cannot be normalized and is zero (an alternative
/// base such as production volume is an open product question, so the
/// behavior of the source worksheet is preserved).
fn domestic_emissions(
    snapshot: &ProjectSnapshot,
    store: &ReferenceStore,
    basis: EnergyBasis,
) -> CarbonIntensity {
    let leg = &snapshot.domestic_transport;
    let (mass_kg, distance_km) = match (leg.mass_kg, leg.distance_km) {
        (Some(m), Some(d)) if m > 0.0 && d > 0.0 => (m, d),
        _ => return CarbonIntensity::ZERO,
    };

    let factor = store.modal_factor(TransportModal::Road);
    let annual_kg_co2 = mass_kg * distance_km * factor;

    match snapshot.biomass_processed {
        Some(throughput) if throughput > 0.0 => {
            CarbonIntensity(annual_kg_co2 * (1.0 / throughput) * basis.0)
        }
        _ => CarbonIntensity::ZERO,
    }
}

/// Export leg placeholder.
///
/// The snapshot already captures export masses, distances, and modal
/// splits, but no pricing has been specified for them; this returns zero
/// on purpose so the gap stays explicit rather than silently folded into
/// the domestic figure.
pub fn export_emissions(_snapshot: &ProjectSnapshot) -> CarbonIntensity {
    CarbonIntensity::ZERO
}
