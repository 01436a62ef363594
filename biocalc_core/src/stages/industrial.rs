//! # Industrial Stage
//!
//! Plant-gate emissions: electricity, stationary fuels, and other process
//! inputs. Each sub-sum is first computed as absolute annual emissions,
//! then rescaled to per-MJ terms through the plant's annual biomass
//! throughput: `× (1 / biomass_processed) × kg_per_mj`.
//!
//! Without a positive `biomass_processed` there is no normalization base
//! and the whole stage is exactly zero, regardless of what else is
//! declared.

use crate::project::ProjectSnapshot;
use crate::reference::{IndustrialInput, ReferenceStore};
use crate::units::{CarbonIntensity, EnergyBasis};

/// Total industrial emission intensity (kg CO2eq/MJ).
pub fn emissions(
    snapshot: &ProjectSnapshot,
    store: &ReferenceStore,
    basis: EnergyBasis,
) -> CarbonIntensity {
    let throughput = match snapshot.biomass_processed {
        Some(kg) if kg > 0.0 => kg,
        _ => return CarbonIntensity::ZERO,
    };

    let annual_kg_co2 = electricity_emissions(snapshot, store)
        + fuel_emissions(snapshot, store)
        + other_input_emissions(snapshot, store);

    CarbonIntensity(annual_kg_co2 * (1.0 / throughput) * basis.0)
}

/// Annual electricity emissions (kg CO2eq/yr) over the six declared
/// sources. Factor resolution per source lives in the reference store.
fn electricity_emissions(snapshot: &ProjectSnapshot, store: &ReferenceStore) -> f64 {
    snapshot
        .electricity
        .by_source()
        .iter()
        .filter(|(_, kwh)| *kwh > 0.0)
        .map(|(source, kwh)| kwh * store.electricity_factor(*source))
        .sum()
}

/// Annual stationary-fuel emissions (kg CO2eq/yr): each declared fuel is
/// priced at its combined Scope-3 production + Scope-1 combustion factor.
fn fuel_emissions(snapshot: &ProjectSnapshot, store: &ReferenceStore) -> f64 {
    snapshot
        .fuels
        .by_kind()
        .iter()
        .filter(|(_, qty)| *qty > 0.0)
        .map(|(kind, qty)| qty * store.combined_fuel_factor(*kind))
        .sum()
}

/// Annual emissions from water, lubricant, and generic chemical inputs
/// (kg CO2eq/yr).
fn other_input_emissions(snapshot: &ProjectSnapshot, store: &ReferenceStore) -> f64 {
    let mut total = 0.0;

    if let Some(qty) = snapshot.water_consumption {
        if qty > 0.0 {
            total += qty * store.input_factor(IndustrialInput::Water);
        }
    }
    if let Some(qty) = snapshot.input_lubricant {
        if qty > 0.0 {
            total += qty * store.input_factor(IndustrialInput::Lubricant);
        }
    }
    if let Some(qty) = snapshot.input_chemical {
        if qty > 0.0 {
            total += qty * store.input_factor(IndustrialInput::Chemical);
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors;
    use crate::project::{ElectricitySplit, FuelSplit};
    use crate::reference::{ElectricitySource, FuelKind, StationaryCombustion};
    use crate::units::CalorificValue;

    fn basis() -> EnergyBasis {
        CalorificValue(18.8).energy_basis()
    }

    fn store_with_grid() -> ReferenceStore {
        let mut store = ReferenceStore::default();
        store.set_electricity_factor(ElectricitySource::Grid, 0.0385);
        store
    }

    #[test]
    fn test_zero_without_throughput() {
        // The zero-throughput guard: populated consumption fields change
        // nothing when the normalization base is absent or zero.
        let store = store_with_grid();
        let snapshot = ProjectSnapshot {
            biomass_processed: None,
            water_consumption: Some(500.0),
            electricity: ElectricitySplit {
                grid: 100_000.0,
                ..Default::default()
            },
            fuels: FuelSplit {
                diesel: 2_000.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(emissions(&snapshot, &store, basis()), CarbonIntensity::ZERO);

        let zero_throughput = ProjectSnapshot {
            biomass_processed: Some(0.0),
            ..snapshot
        };
        assert_eq!(
            emissions(&zero_throughput, &store, basis()),
            CarbonIntensity::ZERO
        );
    }

    #[test]
    fn test_electricity_normalized_by_throughput() {
        let store = store_with_grid();
        let snapshot = ProjectSnapshot {
            biomass_processed: Some(1_000_000.0),
            electricity: ElectricitySplit {
                grid: 200_000.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let result = emissions(&snapshot, &store, basis());
        let expected = 200_000.0 * 0.0385 * (1.0 / 1_000_000.0) * (1.0 / 18.8);
        assert!((result.0 - expected).abs() < 1e-15);
    }

    #[test]
    fn test_renewables_without_record_cost_nothing() {
        let store = store_with_grid();
        let grid_only = ProjectSnapshot {
            biomass_processed: Some(1_000_000.0),
            electricity: ElectricitySplit {
                grid: 100_000.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let with_solar = ProjectSnapshot {
            electricity: ElectricitySplit {
                grid: 100_000.0,
                solar: 400_000.0,
                ..Default::default()
            },
            ..grid_only.clone()
        };

        assert_eq!(
            emissions(&grid_only, &store, basis()),
            emissions(&with_solar, &store, basis())
        );
    }

    #[test]
    fn test_other_source_falls_back_to_grid_factor() {
        let store = store_with_grid();
        let grid = ProjectSnapshot {
            biomass_processed: Some(1_000_000.0),
            electricity: ElectricitySplit {
                grid: 50_000.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let other = ProjectSnapshot {
            electricity: ElectricitySplit {
                other: 50_000.0,
                ..Default::default()
            },
            ..grid.clone()
        };

        assert_eq!(
            emissions(&grid, &store, basis()),
            emissions(&other, &store, basis())
        );
    }

    #[test]
    fn test_fuel_combines_production_and_combustion() {
        let mut store = ReferenceStore::default();
        store.set_fuel_production_factor(FuelKind::Diesel, 0.52);
        store.add_stationary_combustion(StationaryCombustion {
            fuel: FuelKind::Diesel,
            unit: Some("L".to_string()),
            co2_fossil: 2603.0,
            co2_biogenic: 0.0,
            ch4_fossil: 0.14,
            ch4_biogenic: 0.0,
            n2o_emission: 0.02,
            co2_eq_emission: 2.68,
        });

        let snapshot = ProjectSnapshot {
            biomass_processed: Some(500_000.0),
            fuels: FuelSplit {
                diesel: 10_000.0,
                ..Default::default()
            },
            ..Default::default()
        };

        let result = emissions(&snapshot, &store, basis());
        let expected = 10_000.0 * (0.52 + 2.68) * (1.0 / 500_000.0) * (1.0 / 18.8);
        assert!((result.0 - expected).abs() < 1e-12);
    }

    #[test]
    fn test_other_inputs_use_documented_defaults() {
        let store = ReferenceStore::default();
        let snapshot = ProjectSnapshot {
            biomass_processed: Some(100_000.0),
            water_consumption: Some(300.0),
            input_lubricant: Some(50.0),
            input_chemical: Some(20.0),
            ..Default::default()
        };

        let result = emissions(&snapshot, &store, basis());
        let annual = 300.0 * factors::DEFAULT_WATER_FACTOR
            + 50.0 * factors::DEFAULT_LUBRICANT_FACTOR
            + 20.0 * factors::DEFAULT_CHEMICAL_FACTOR;
        let expected = annual * (1.0 / 100_000.0) * (1.0 / 18.8);
        assert!((result.0 - expected).abs() < 1e-12);
    }

    #[test]
    fn test_undeclared_inputs_contribute_nothing() {
        let store = store_with_grid();
        let snapshot = ProjectSnapshot {
            biomass_processed: Some(100_000.0),
            ..Default::default()
        };
        assert_eq!(emissions(&snapshot, &store, basis()), CarbonIntensity::ZERO);
    }
}
