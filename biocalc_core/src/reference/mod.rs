//! # Reference Data Store
//!
//! Read-only emission-factor tables queried by the stage calculators.
//! Tables are keyed by natural names (biomass, vehicle) or by the closed
//! key enums in [`keys`]; the engine never mutates them.
//!
//! ## Degradation Policy
//!
//! Every factor getter resolves a missing entry to the documented default
//! from [`crate::factors`] through one helper, [`lookup_or_default`], which
//! emits a `tracing` warning naming the table, key, and substituted value.
//! The single hard failure lives in [`ReferenceStore::biomass_property`]:
//! a biomass with no calorific-value record aborts the calculation.
//!
//! ## Example
//!
//! ```rust
//! use biocalc_core::reference::{BiomassProperty, ReferenceStore};
//!
//! let mut store = ReferenceStore::default();
//! store.add_biomass(BiomassProperty {
//!     biomass_name: "Resíduo de Pinus".to_string(),
//!     pci_mj_kg: 18.8,
//!     combustion_emission: None,
//! });
//!
//! let prop = store.biomass_property("Resíduo de Pinus").unwrap();
//! assert_eq!(prop.pci_mj_kg, 18.8);
//! ```

pub mod dataset;
pub mod keys;

pub use keys::{Culture, ElectricitySource, FuelKind, IndustrialInput, TransportModal};

use std::collections::HashMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::factors;
use crate::units::{CalorificValue, Fraction};

/// Resolve an optional lookup result against its documented default.
///
/// This is the one place the soft-degradation policy lives: a miss is never
/// an error, but it is always visible in the logs.
pub(crate) fn lookup_or_default(
    table: &'static str,
    key: impl Display,
    value: Option<f64>,
    default: f64,
) -> f64 {
    match value {
        Some(v) => v,
        None => {
            warn!(
                table,
                key = %key,
                default,
                "reference factor missing, using default"
            );
            default
        }
    }
}

/// Calorific value and use-phase combustion factor for one biomass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomassProperty {
    pub biomass_name: String,
    /// Lower calorific value (MJ/kg)
    pub pci_mj_kg: f64,
    /// Direct end-use combustion factor (kg CO2eq/MJ), if any
    pub combustion_emission: Option<f64>,
}

impl BiomassProperty {
    pub fn calorific_value(&self) -> CalorificValue {
        CalorificValue(self.pci_mj_kg)
    }
}

/// Upstream production factor and allocation split for one biomass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomassProductionEmission {
    pub biomass_name: String,
    /// kg CO2eq per kg of biomass produced
    pub emission_factor: f64,
    pub allocation_product: f64,
    pub allocation_coproduct: f64,
}

/// Allocation rule for land-use-change emissions of one biomass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutAllocation {
    pub biomass_name: String,
    pub lifecycle_stage: Option<String>,
    pub product_name: Option<String>,
    pub coproduct_name: Option<String>,
    /// Raw value as recorded; may be a fraction or a whole percentage
    pub allocation_product: f64,
    pub allocation_coproduct: f64,
}

/// Scope-1 combustion factors for one stationary fuel, with the per-gas
/// breakdown the source worksheet carries alongside the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationaryCombustion {
    pub fuel: FuelKind,
    /// Quantity unit the factors are expressed against (L, kg, m³)
    pub unit: Option<String>,
    /// Per-gas breakdown (g/unit)
    #[serde(default)]
    pub co2_fossil: f64,
    #[serde(default)]
    pub co2_biogenic: f64,
    #[serde(default)]
    pub ch4_fossil: f64,
    #[serde(default)]
    pub ch4_biogenic: f64,
    #[serde(default)]
    pub n2o_emission: f64,
    /// Aggregated factor (kg CO2eq/unit); the value the engine consumes
    pub co2_eq_emission: f64,
}

/// Table name constants, shared by error messages and fallback logs.
mod table {
    pub const BIOMASS_PROPERTIES: &str = "biomass_properties";
    pub const BIOMASS_PRODUCTION: &str = "biomass_production_emissions";
    pub const MUT_FACTORS: &str = "mut_factors";
    pub const MUT_ALLOCATIONS: &str = "mut_allocations";
    pub const VEHICLES: &str = "vehicle_emission_factors";
    pub const MODALS: &str = "transport_modal_factors";
    pub const ELECTRICITY: &str = "electricity_emission_factors";
    pub const FUEL_PRODUCTION: &str = "fuel_production_emissions";
    pub const STATIONARY_COMBUSTION: &str = "stationary_combustion_emissions";
    pub const INDUSTRIAL_INPUTS: &str = "industrial_input_emissions";
}

/// In-memory reference-table collection.
///
/// Biomass and vehicle tables are keyed by exact natural name; everything
/// else is keyed by a closed enum validated at dataset load time. The store
/// is immutable for the duration of a calculation, so concurrent
/// calculations can share one instance behind a plain `&` borrow.
#[derive(Debug, Clone, Default)]
pub struct ReferenceStore {
    biomass_properties: HashMap<String, BiomassProperty>,
    production_emissions: HashMap<String, BiomassProductionEmission>,
    mut_factors: HashMap<(String, Culture), f64>,
    mut_allocations: HashMap<String, MutAllocation>,
    vehicle_factors: HashMap<String, f64>,
    modal_factors: HashMap<TransportModal, f64>,
    electricity_factors: HashMap<ElectricitySource, f64>,
    fuel_production_factors: HashMap<FuelKind, f64>,
    combustion_factors: HashMap<FuelKind, StationaryCombustion>,
    input_factors: HashMap<IndustrialInput, f64>,
    /// Global warming potentials (kg CO2eq/kg gas); documentary companion
    /// data carried with the dataset, not consulted by the stage math
    gwp_factors: HashMap<String, f64>,
}

impl ReferenceStore {
    // ------------------------------------------------------------------
    // Population (dataset loader and tests)
    // ------------------------------------------------------------------

    pub fn add_biomass(&mut self, property: BiomassProperty) -> Option<BiomassProperty> {
        self.biomass_properties
            .insert(property.biomass_name.clone(), property)
    }

    pub fn add_production_emission(
        &mut self,
        emission: BiomassProductionEmission,
    ) -> Option<BiomassProductionEmission> {
        self.production_emissions
            .insert(emission.biomass_name.clone(), emission)
    }

    pub fn set_mut_factor(
        &mut self,
        state: impl Into<String>,
        culture: Culture,
        factor: f64,
    ) -> Option<f64> {
        self.mut_factors.insert((state.into(), culture), factor)
    }

    pub fn add_mut_allocation(&mut self, allocation: MutAllocation) -> Option<MutAllocation> {
        self.mut_allocations
            .insert(allocation.biomass_name.clone(), allocation)
    }

    pub fn set_vehicle_factor(
        &mut self,
        vehicle_type: impl Into<String>,
        factor: f64,
    ) -> Option<f64> {
        self.vehicle_factors.insert(vehicle_type.into(), factor)
    }

    pub fn set_modal_factor(&mut self, modal: TransportModal, factor: f64) -> Option<f64> {
        self.modal_factors.insert(modal, factor)
    }

    pub fn set_electricity_factor(
        &mut self,
        source: ElectricitySource,
        factor: f64,
    ) -> Option<f64> {
        self.electricity_factors.insert(source, factor)
    }

    pub fn set_fuel_production_factor(&mut self, fuel: FuelKind, factor: f64) -> Option<f64> {
        self.fuel_production_factors.insert(fuel, factor)
    }

    pub fn add_stationary_combustion(
        &mut self,
        combustion: StationaryCombustion,
    ) -> Option<StationaryCombustion> {
        self.combustion_factors.insert(combustion.fuel, combustion)
    }

    pub fn set_input_factor(&mut self, input: IndustrialInput, factor: f64) -> Option<f64> {
        self.input_factors.insert(input, factor)
    }

    pub fn set_gwp_factor(&mut self, gas: impl Into<String>, value: f64) -> Option<f64> {
        self.gwp_factors.insert(gas.into(), value)
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    /// Look up a biomass's property record.
    ///
    /// This is the engine's single hard stop: a biomass with no record has
    /// no calorific value, so nothing downstream can be computed.
    pub fn biomass_property(&self, biomass_name: &str) -> CalcResult<&BiomassProperty> {
        self.biomass_properties.get(biomass_name).ok_or_else(|| {
            CalcError::reference_data_missing(table::BIOMASS_PROPERTIES, biomass_name)
        })
    }

    /// Production factor for a biomass (kg CO2eq/kg).
    pub fn production_factor(&self, biomass_name: &str) -> f64 {
        lookup_or_default(
            table::BIOMASS_PRODUCTION,
            biomass_name,
            self.production_emissions
                .get(biomass_name)
                .map(|e| e.emission_factor),
            factors::DEFAULT_PRODUCTION_FACTOR,
        )
    }

    /// Starch-input factor (kg CO2eq/kg of starch).
    pub fn starch_factor(&self) -> f64 {
        lookup_or_default(
            table::INDUSTRIAL_INPUTS,
            IndustrialInput::Starch,
            self.input_factors.get(&IndustrialInput::Starch).copied(),
            factors::DEFAULT_STARCH_FACTOR,
        )
    }

    /// Land-use-change factor for a (state, culture) pair.
    ///
    /// Most pairs legitimately have no entry; the documented default is a
    /// zero contribution.
    pub fn mut_factor(&self, state: &str, culture: Culture) -> f64 {
        lookup_or_default(
            table::MUT_FACTORS,
            format_args!("{}/{}", state, culture),
            self.mut_factors
                .get(&(state.to_string(), culture))
                .copied(),
            0.0,
        )
    }

    /// Land-use-change allocation fraction for a biomass.
    ///
    /// Absent records mean full allocation to the product. Raw values are
    /// normalized through [`Fraction::from_allocation`].
    pub fn mut_allocation(&self, biomass_name: &str) -> Fraction {
        Fraction::from_allocation(lookup_or_default(
            table::MUT_ALLOCATIONS,
            biomass_name,
            self.mut_allocations
                .get(biomass_name)
                .map(|a| a.allocation_product),
            Fraction::FULL.0,
        ))
    }

    /// Per-tonne-km factor for an agricultural transport vehicle.
    pub fn vehicle_factor(&self, vehicle_type: &str) -> f64 {
        lookup_or_default(
            table::VEHICLES,
            vehicle_type,
            self.vehicle_factors.get(vehicle_type).copied(),
            factors::DEFAULT_VEHICLE_FACTOR,
        )
    }

    /// Per-tonne-km factor for a distribution modal.
    pub fn modal_factor(&self, modal: TransportModal) -> f64 {
        lookup_or_default(
            table::MODALS,
            modal,
            self.modal_factors.get(&modal).copied(),
            factors::DEFAULT_MODAL_FACTOR,
        )
    }

    /// Emission factor for one declared electricity source (kg CO2eq/kWh).
    ///
    /// Resolution order:
    /// 1. A dedicated record for the source wins.
    /// 2. Record-less on-site renewables count as zero-emission.
    /// 3. Anything else (grid itself, "other") falls back to the grid
    ///    factor, or zero when even the grid has no record.
    pub fn electricity_factor(&self, source: ElectricitySource) -> f64 {
        if let Some(&factor) = self.electricity_factors.get(&source) {
            return factor;
        }
        if source.is_renewable() {
            debug!(source = %source, "no dedicated record for renewable source, counting as zero-emission");
            return 0.0;
        }
        lookup_or_default(
            table::ELECTRICITY,
            source,
            self.electricity_factors
                .get(&ElectricitySource::Grid)
                .copied(),
            0.0,
        )
    }

    /// Scope-3 production factor for a fuel (kg CO2eq/unit).
    pub fn fuel_production_factor(&self, fuel: FuelKind) -> f64 {
        lookup_or_default(
            table::FUEL_PRODUCTION,
            fuel,
            self.fuel_production_factors.get(&fuel).copied(),
            0.0,
        )
    }

    /// Scope-1 combustion factor for a fuel (kg CO2eq/unit).
    pub fn fuel_combustion_factor(&self, fuel: FuelKind) -> f64 {
        lookup_or_default(
            table::STATIONARY_COMBUSTION,
            fuel,
            self.combustion_factors.get(&fuel).map(|c| c.co2_eq_emission),
            0.0,
        )
    }

    /// Combined per-unit fuel factor: production (Scope 3) + combustion
    /// (Scope 1).
    pub fn combined_fuel_factor(&self, fuel: FuelKind) -> f64 {
        self.fuel_production_factor(fuel) + self.fuel_combustion_factor(fuel)
    }

    /// Factor for a non-fuel industrial input (kg CO2eq/unit).
    pub fn input_factor(&self, input: IndustrialInput) -> f64 {
        let default = match input {
            IndustrialInput::Starch => factors::DEFAULT_STARCH_FACTOR,
            IndustrialInput::Water => factors::DEFAULT_WATER_FACTOR,
            IndustrialInput::Lubricant => factors::DEFAULT_LUBRICANT_FACTOR,
            IndustrialInput::Chemical => factors::DEFAULT_CHEMICAL_FACTOR,
        };
        lookup_or_default(
            table::INDUSTRIAL_INPUTS,
            input,
            self.input_factors.get(&input).copied(),
            default,
        )
    }

    /// Global warming potential for a gas, if recorded.
    pub fn gwp_factor(&self, gas_name: &str) -> Option<f64> {
        self.gwp_factors.get(gas_name).copied()
    }

    /// Names of all biomasses with a property record, sorted.
    pub fn biomass_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .biomass_properties
            .keys()
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_biomass() -> ReferenceStore {
        let mut store = ReferenceStore::default();
        store.add_biomass(BiomassProperty {
            biomass_name: "Resíduo de Pinus".to_string(),
            pci_mj_kg: 18.8,
            combustion_emission: Some(0.0012),
        });
        store
    }

    #[test]
    fn test_biomass_lookup_hard_failure() {
        let store = store_with_biomass();
        assert!(store.biomass_property("Resíduo de Pinus").is_ok());

        let err = store.biomass_property("Bagaço de Cana").unwrap_err();
        assert_eq!(err.error_code(), "REFERENCE_DATA_MISSING");
    }

    #[test]
    fn test_production_factor_default() {
        let store = store_with_biomass();
        assert_eq!(
            store.production_factor("Resíduo de Pinus"),
            factors::DEFAULT_PRODUCTION_FACTOR
        );

        let mut store = store_with_biomass();
        store.add_production_emission(BiomassProductionEmission {
            biomass_name: "Resíduo de Pinus".to_string(),
            emission_factor: 0.031,
            allocation_product: 0.05,
            allocation_coproduct: 0.95,
        });
        assert_eq!(store.production_factor("Resíduo de Pinus"), 0.031);
    }

    #[test]
    fn test_mut_allocation_percentage_normalized() {
        let mut store = ReferenceStore::default();
        store.add_mut_allocation(MutAllocation {
            biomass_name: "Resíduo de Pinus".to_string(),
            lifecycle_stage: None,
            product_name: None,
            coproduct_name: None,
            allocation_product: 30.0,
            allocation_coproduct: 70.0,
        });
        assert_eq!(store.mut_allocation("Resíduo de Pinus"), Fraction(0.3));
        // Absent record: full allocation
        assert_eq!(store.mut_allocation("Serragem"), Fraction::FULL);
    }

    #[test]
    fn test_mut_factor_absent_pair_is_zero() {
        let mut store = ReferenceStore::default();
        store.set_mut_factor("SP", Culture::Pinus, 0.012);
        assert_eq!(store.mut_factor("SP", Culture::Pinus), 0.012);
        assert_eq!(store.mut_factor("SP", Culture::Eucalipto), 0.0);
        assert_eq!(store.mut_factor("MG", Culture::Pinus), 0.0);
    }

    #[test]
    fn test_vehicle_and_modal_defaults() {
        let store = ReferenceStore::default();
        assert_eq!(
            store.vehicle_factor("Carreta Espacial"),
            factors::DEFAULT_VEHICLE_FACTOR
        );
        assert_eq!(
            store.modal_factor(TransportModal::Road),
            factors::DEFAULT_MODAL_FACTOR
        );
    }

    #[test]
    fn test_electricity_resolution_order() {
        let mut store = ReferenceStore::default();
        store.set_electricity_factor(ElectricitySource::Grid, 0.0385);

        // Dedicated record wins
        store.set_electricity_factor(ElectricitySource::Biomass, 0.004);
        assert_eq!(store.electricity_factor(ElectricitySource::Biomass), 0.004);

        // Record-less renewables are zero
        assert_eq!(store.electricity_factor(ElectricitySource::Solar), 0.0);

        // "Other" falls back to grid
        assert_eq!(store.electricity_factor(ElectricitySource::Other), 0.0385);

        // Without even a grid record everything non-renewable is zero
        let empty = ReferenceStore::default();
        assert_eq!(empty.electricity_factor(ElectricitySource::Grid), 0.0);
        assert_eq!(empty.electricity_factor(ElectricitySource::Other), 0.0);
    }

    #[test]
    fn test_combined_fuel_factor() {
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
        assert!((store.combined_fuel_factor(FuelKind::Diesel) - 3.2).abs() < 1e-12);
        // Missing both records: zero, not an error
        assert_eq!(store.combined_fuel_factor(FuelKind::Lpg), 0.0);
    }

    #[test]
    fn test_input_factor_defaults() {
        let store = ReferenceStore::default();
        assert_eq!(
            store.input_factor(IndustrialInput::Water),
            factors::DEFAULT_WATER_FACTOR
        );
        assert_eq!(
            store.input_factor(IndustrialInput::Lubricant),
            factors::DEFAULT_LUBRICANT_FACTOR
        );
        assert_eq!(
            store.input_factor(IndustrialInput::Chemical),
            factors::DEFAULT_CHEMICAL_FACTOR
        );
    }

    #[test]
    fn test_biomass_names_sorted() {
        let mut store = store_with_biomass();
        store.add_biomass(BiomassProperty {
            biomass_name: "Casca de Amendoim".to_string(),
            pci_mj_kg: 16.6,
            combustion_emission: None,
        });
        assert_eq!(
            store.biomass_names(),
            vec!["Casca de Amendoim", "Resíduo de Pinus"]
        );
    }
}
