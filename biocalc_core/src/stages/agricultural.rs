//! # Agricultural Stage
//!
//! Upstream emissions of growing and hauling the biomass, expressed per MJ
//! of output energy. Three independent contributions:
//!
//! 1. **Production**: biomass cultivation/harvest factor, plus the optional
//!    starch input declared by fermentation feedstocks.
//! 2. **Land-use change (MUT)**: only when the project declares a
//!    production state; factored by (state, culture) and an allocation
//!    split between product and co-products.
//! 3. **Transport to factory**: field-to-plant haulage by declared vehicle.

use crate::project::ProjectSnapshot;
use crate::reference::{BiomassProperty, Culture, ReferenceStore};
use crate::units::{CarbonIntensity, EnergyBasis, KG_PER_TONNE};

/// Total agricultural emission intensity (kg CO2eq/MJ).
pub fn emissions(
    snapshot: &ProjectSnapshot,
    store: &ReferenceStore,
    basis: EnergyBasis,
    biomass: &BiomassProperty,
) -> CarbonIntensity {
    production_impact(snapshot, store, basis, biomass)
        + land_use_impact(snapshot, store, basis, biomass)
        + transport_impact(snapshot, store, basis)
}

/// Cultivation/harvest emissions: `kg_per_mj × production_factor`, plus
/// `starch × starch_factor` when starch input is declared.
fn production_impact(
    snapshot: &ProjectSnapshot,
    store: &ReferenceStore,
    basis: EnergyBasis,
    biomass: &BiomassProperty,
) -> CarbonIntensity {
    let factor = store.production_factor(&biomass.biomass_name);

    let starch_impact = match snapshot.starch_input {
        Some(qty) if qty > 0.0 => qty * store.starch_factor(),
        _ => 0.0,
    };

    CarbonIntensity(basis.0 * factor + starch_impact)
}

/// Land-use-change emissions, zero unless a production state is declared.
///
/// The biomass name selects the culture; an absent (state, culture) factor
/// means zero impact, not an error. The allocation fraction attributes only
/// the product's share of the conversion emissions.
fn land_use_impact(
    snapshot: &ProjectSnapshot,
    store: &ReferenceStore,
    basis: EnergyBasis,
    biomass: &BiomassProperty,
) -> CarbonIntensity {
    let state = match snapshot.production_state.as_deref() {
        Some(state) if !state.is_empty() => state,
        _ => return CarbonIntensity::ZERO,
    };

    let culture = Culture::from_biomass_name(&biomass.biomass_name);
    let factor = store.mut_factor(state, culture);
    let allocation = store.mut_allocation(&biomass.biomass_name);

    CarbonIntensity(basis.0 * factor * allocation.0)
}

/// Field-to-factory haulage, zero unless both distance and vehicle are
/// declared. The basis is divided by 1000 to match the factor's
/// per-tonne-km unit.
fn transport_impact(
    snapshot: &ProjectSnapshot,
    store: &ReferenceStore,
    basis: EnergyBasis,
) -> CarbonIntensity {
    let (distance_km, vehicle) = match (
        snapshot.agr_transport_distance,
        snapshot.agr_transport_vehicle.as_deref(),
    ) {
        (Some(d), Some(v)) if d > 0.0 && !v.is_empty() => (d, v),
        _ => return CarbonIntensity::ZERO,
    };

    let factor = store.vehicle_factor(vehicle);

    CarbonIntensity(distance_km * (basis.0 / KG_PER_TONNE) * factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors;
    use crate::reference::{BiomassProductionEmission, MutAllocation};
    use crate::units::CalorificValue;

    fn pinus_property() -> BiomassProperty {
        BiomassProperty {
            biomass_name: "Resíduo de Pinus".to_string(),
            pci_mj_kg: 18.8,
            combustion_emission: None,
        }
    }

    fn basis() -> EnergyBasis {
        CalorificValue(18.8).energy_basis()
    }

    #[test]
    fn test_production_falls_back_to_default_factor() {
        // Reference scenario: pci 18.8, empty store, no other inputs.
        let store = ReferenceStore::default();
        let snapshot = ProjectSnapshot::default();

        let result = emissions(&snapshot, &store, basis(), &pinus_property());
        let expected = (1.0 / 18.8) * factors::DEFAULT_PRODUCTION_FACTOR;
        assert!((result.0 - expected).abs() < 1e-9);
        assert!((result.0 - 0.001335).abs() < 1e-6);
    }

    #[test]
    fn test_production_uses_table_factor_when_present() {
        let mut store = ReferenceStore::default();
        store.add_production_emission(BiomassProductionEmission {
            biomass_name: "Resíduo de Pinus".to_string(),
            emission_factor: 0.04,
            allocation_product: 0.05,
            allocation_coproduct: 0.95,
        });
        let snapshot = ProjectSnapshot::default();

        let result = production_impact(&snapshot, &store, basis(), &pinus_property());
        assert!((result.0 - (1.0 / 18.8) * 0.04).abs() < 1e-12);
    }

    #[test]
    fn test_starch_contribution() {
        let store = ReferenceStore::default();
        let snapshot = ProjectSnapshot {
            starch_input: Some(0.002),
            ..Default::default()
        };

        let with_starch = production_impact(&snapshot, &store, basis(), &pinus_property());
        let without = production_impact(&ProjectSnapshot::default(), &store, basis(), &pinus_property());
        let added = with_starch.0 - without.0;
        assert!((added - 0.002 * factors::DEFAULT_STARCH_FACTOR).abs() < 1e-12);
    }

    #[test]
    fn test_land_use_zero_without_state() {
        let mut store = ReferenceStore::default();
        store.set_mut_factor("SP", Culture::Pinus, 0.012);
        let snapshot = ProjectSnapshot::default();

        let result = land_use_impact(&snapshot, &store, basis(), &pinus_property());
        assert_eq!(result, CarbonIntensity::ZERO);
    }

    #[test]
    fn test_land_use_with_state_and_allocation() {
        let mut store = ReferenceStore::default();
        store.set_mut_factor("SP", Culture::Pinus, 0.012);
        store.add_mut_allocation(MutAllocation {
            biomass_name: "Resíduo de Pinus".to_string(),
            lifecycle_stage: None,
            product_name: None,
            coproduct_name: None,
            // Whole-percentage form, exercising the normalization rule
            allocation_product: 5.0,
            allocation_coproduct: 95.0,
        });
        let snapshot = ProjectSnapshot {
            production_state: Some("SP".to_string()),
            ..Default::default()
        };

        let result = land_use_impact(&snapshot, &store, basis(), &pinus_property());
        let expected = (1.0 / 18.8) * 0.012 * 0.05;
        assert!((result.0 - expected).abs() < 1e-12);
    }

    #[test]
    fn test_land_use_absent_pair_is_zero() {
        let mut store = ReferenceStore::default();
        store.set_mut_factor("PR", Culture::Pinus, 0.0087);
        let snapshot = ProjectSnapshot {
            production_state: Some("MG".to_string()),
            ..Default::default()
        };

        let result = land_use_impact(&snapshot, &store, basis(), &pinus_property());
        assert_eq!(result, CarbonIntensity::ZERO);
    }

    #[test]
    fn test_land_use_culture_selected_from_biomass_name() {
        let mut store = ReferenceStore::default();
        store.set_mut_factor("SP", Culture::Eucalipto, 0.0098);
        let eucalipto = BiomassProperty {
            biomass_name: "Resíduo de Eucalipto".to_string(),
            pci_mj_kg: 18.0,
            combustion_emission: None,
        };
        let snapshot = ProjectSnapshot {
            production_state: Some("SP".to_string()),
            ..Default::default()
        };

        let result = land_use_impact(&snapshot, &store, basis(), &eucalipto);
        assert!(result.0 > 0.0);
    }

    #[test]
    fn test_transport_requires_distance_and_vehicle() {
        let store = ReferenceStore::default();

        let missing_vehicle = ProjectSnapshot {
            agr_transport_distance: Some(100.0),
            ..Default::default()
        };
        assert_eq!(
            transport_impact(&missing_vehicle, &store, basis()),
            CarbonIntensity::ZERO
        );

        let missing_distance = ProjectSnapshot {
            agr_transport_vehicle: Some("VUC (Urbano)".to_string()),
            ..Default::default()
        };
        assert_eq!(
            transport_impact(&missing_distance, &store, basis()),
            CarbonIntensity::ZERO
        );
    }

    #[test]
    fn test_transport_unknown_vehicle_uses_default_factor() {
        // Reference scenario: 100 km with a vehicle the table doesn't know.
        let store = ReferenceStore::default();
        let snapshot = ProjectSnapshot {
            agr_transport_distance: Some(100.0),
            agr_transport_vehicle: Some("Dirigível".to_string()),
            ..Default::default()
        };

        let result = transport_impact(&snapshot, &store, basis());
        let expected = 100.0 * ((1.0 / 18.8) / 1000.0) * factors::DEFAULT_VEHICLE_FACTOR;
        assert!((result.0 - expected).abs() < 1e-12);
        assert!((result.0 - 0.000330).abs() < 1e-6);
    }

    #[test]
    fn test_zero_basis_collapses_everything_but_starch() {
        let store = ReferenceStore::default();
        let snapshot = ProjectSnapshot {
            production_state: Some("SP".to_string()),
            agr_transport_distance: Some(100.0),
            agr_transport_vehicle: Some("VUC (Urbano)".to_string()),
            ..Default::default()
        };

        let result = emissions(&snapshot, &store, EnergyBasis(0.0), &pinus_property());
        assert_eq!(result, CarbonIntensity::ZERO);
    }
}
