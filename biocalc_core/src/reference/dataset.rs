//! TOML reference-dataset loading.
//!
//! A dataset is a flat TOML document of factor tables (see
//! `data/reference.toml` for the built-in one distilled from the RenovaCalc
//! auxiliary worksheet). Loading validates every closed-enum key and rejects
//! duplicates, so a malformed dataset fails once at startup instead of
//! misresolving lookups mid-calculation.
//!
//! ## Example
//!
//! ```rust
//! use biocalc_core::reference::ReferenceStore;
//!
//! let toml = r#"
//!     [[biomass]]
//!     name = "Resíduo de Pinus"
//!     pci_mj_kg = 18.8
//!
//!     [[modal]]
//!     modal = "road"
//!     emission_factor = 0.062
//! "#;
//! let store = ReferenceStore::from_toml_str(toml).unwrap();
//! assert!(store.biomass_property("Resíduo de Pinus").is_ok());
//! ```

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::errors::{CalcError, CalcResult};
use crate::reference::keys::{Culture, ElectricitySource, FuelKind, IndustrialInput, TransportModal};
use crate::reference::{
    BiomassProductionEmission, BiomassProperty, MutAllocation, ReferenceStore,
    StationaryCombustion,
};

/// Built-in dataset, embedded at compile time and parsed once.
static BUILTIN: Lazy<ReferenceStore> = Lazy::new(|| {
    ReferenceStore::from_toml_str(include_str!("../../data/reference.toml"))
        .expect("embedded reference dataset must be valid")
});

// ----------------------------------------------------------------------
// Raw TOML row shapes
// ----------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawBiomass {
    name: String,
    pci_mj_kg: f64,
    combustion_emission: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawBiomassProduction {
    biomass: String,
    emission_factor: f64,
    #[serde(default)]
    allocation_product: f64,
    #[serde(default = "default_coproduct_allocation")]
    allocation_coproduct: f64,
}

fn default_coproduct_allocation() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
struct RawMutFactor {
    state: String,
    culture: String,
    emission_factor: f64,
}

#[derive(Debug, Deserialize)]
struct RawMutAllocation {
    biomass: String,
    lifecycle_stage: Option<String>,
    product_name: Option<String>,
    coproduct_name: Option<String>,
    allocation_product: f64,
    #[serde(default)]
    allocation_coproduct: f64,
}

#[derive(Debug, Deserialize)]
struct RawVehicle {
    vehicle_type: String,
    emission_factor: f64,
}

#[derive(Debug, Deserialize)]
struct RawModal {
    modal: String,
    emission_factor: f64,
}

#[derive(Debug, Deserialize)]
struct RawElectricity {
    source: String,
    emission_factor: f64,
}

#[derive(Debug, Deserialize)]
struct RawFuelProduction {
    fuel: String,
    emission_factor: f64,
}

#[derive(Debug, Deserialize)]
struct RawStationaryCombustion {
    fuel: String,
    unit: Option<String>,
    #[serde(default)]
    co2_fossil: f64,
    #[serde(default)]
    co2_biogenic: f64,
    #[serde(default)]
    ch4_fossil: f64,
    #[serde(default)]
    ch4_biogenic: f64,
    #[serde(default)]
    n2o_emission: f64,
    co2_eq_emission: f64,
}

#[derive(Debug, Deserialize)]
struct RawIndustrialInput {
    input: String,
    emission_factor: f64,
}

#[derive(Debug, Deserialize)]
struct RawGwp {
    gas: String,
    value: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDataset {
    #[serde(default)]
    biomass: Vec<RawBiomass>,
    #[serde(default)]
    biomass_production: Vec<RawBiomassProduction>,
    #[serde(default)]
    mut_factor: Vec<RawMutFactor>,
    #[serde(default)]
    mut_allocation: Vec<RawMutAllocation>,
    #[serde(default)]
    vehicle: Vec<RawVehicle>,
    #[serde(default)]
    modal: Vec<RawModal>,
    #[serde(default)]
    electricity: Vec<RawElectricity>,
    #[serde(default)]
    fuel_production: Vec<RawFuelProduction>,
    #[serde(default)]
    stationary_combustion: Vec<RawStationaryCombustion>,
    #[serde(default)]
    industrial_input: Vec<RawIndustrialInput>,
    #[serde(default)]
    gwp: Vec<RawGwp>,
}

fn duplicate(table: &str, key: impl std::fmt::Display) -> CalcError {
    CalcError::dataset(format!("duplicate {} entry '{}'", table, key))
}

impl ReferenceStore {
    /// Parse and validate a TOML reference dataset.
    pub fn from_toml_str(source: &str) -> CalcResult<Self> {
        let raw: RawDataset =
            toml::from_str(source).map_err(|e| CalcError::dataset(e.to_string()))?;

        let mut store = ReferenceStore::default();

        for row in raw.biomass {
            let name = row.name.clone();
            if store
                .add_biomass(BiomassProperty {
                    biomass_name: row.name,
                    pci_mj_kg: row.pci_mj_kg,
                    combustion_emission: row.combustion_emission,
                })
                .is_some()
            {
                return Err(duplicate("biomass", name));
            }
        }

        for row in raw.biomass_production {
            let name = row.biomass.clone();
            if store
                .add_production_emission(BiomassProductionEmission {
                    biomass_name: row.biomass,
                    emission_factor: row.emission_factor,
                    allocation_product: row.allocation_product,
                    allocation_coproduct: row.allocation_coproduct,
                })
                .is_some()
            {
                return Err(duplicate("biomass_production", name));
            }
        }

        for row in raw.mut_factor {
            let culture = Culture::parse_key(&row.culture)?;
            if store
                .set_mut_factor(row.state.clone(), culture, row.emission_factor)
                .is_some()
            {
                return Err(duplicate(
                    "mut_factor",
                    format!("{}/{}", row.state, culture),
                ));
            }
        }

        for row in raw.mut_allocation {
            let name = row.biomass.clone();
            if store
                .add_mut_allocation(MutAllocation {
                    biomass_name: row.biomass,
                    lifecycle_stage: row.lifecycle_stage,
                    product_name: row.product_name,
                    coproduct_name: row.coproduct_name,
                    allocation_product: row.allocation_product,
                    allocation_coproduct: row.allocation_coproduct,
                })
                .is_some()
            {
                return Err(duplicate("mut_allocation", name));
            }
        }

        for row in raw.vehicle {
            let name = row.vehicle_type.clone();
            if store
                .set_vehicle_factor(row.vehicle_type, row.emission_factor)
                .is_some()
            {
                return Err(duplicate("vehicle", name));
            }
        }

        for row in raw.modal {
            let modal = TransportModal::parse_key(&row.modal)?;
            if store.set_modal_factor(modal, row.emission_factor).is_some() {
                return Err(duplicate("modal", modal));
            }
        }

        for row in raw.electricity {
            let source = ElectricitySource::parse_key(&row.source)?;
            if store
                .set_electricity_factor(source, row.emission_factor)
                .is_some()
            {
                return Err(duplicate("electricity", source));
            }
        }

        for row in raw.fuel_production {
            let fuel = FuelKind::parse_key(&row.fuel)?;
            if store
                .set_fuel_production_factor(fuel, row.emission_factor)
                .is_some()
            {
                return Err(duplicate("fuel_production", fuel.code()));
            }
        }

        for row in raw.stationary_combustion {
            let fuel = FuelKind::parse_key(&row.fuel)?;
            if store
                .add_stationary_combustion(StationaryCombustion {
                    fuel,
                    unit: row.unit,
                    co2_fossil: row.co2_fossil,
                    co2_biogenic: row.co2_biogenic,
                    ch4_fossil: row.ch4_fossil,
                    ch4_biogenic: row.ch4_biogenic,
                    n2o_emission: row.n2o_emission,
                    co2_eq_emission: row.co2_eq_emission,
                })
                .is_some()
            {
                return Err(duplicate("stationary_combustion", fuel.code()));
            }
        }

        for row in raw.industrial_input {
            let input = IndustrialInput::parse_key(&row.input)?;
            if store
                .set_input_factor(input, row.emission_factor)
                .is_some()
            {
                return Err(duplicate("industrial_input", input));
            }
        }

        for row in raw.gwp {
            let gas = row.gas.clone();
            if store.set_gwp_factor(row.gas, row.value).is_some() {
                return Err(duplicate("gwp", gas));
            }
        }

        Ok(store)
    }

    /// The built-in dataset distilled from the RenovaCalc auxiliary
    /// worksheet. Parsed once; subsequent calls are free.
    pub fn builtin() -> &'static ReferenceStore {
        &BUILTIN
    }
}
