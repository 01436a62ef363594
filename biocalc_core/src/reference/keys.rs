//! Closed key enumerations for reference-table lookups.
//!
//! The source worksheets located factors with ad hoc case-insensitive
//! substring searches ("%Diesel%", "%lubrificante%"). Here every recognized
//! input, fuel, modal, and culture is a closed enum; dataset rows are parsed
//! into these keys at load time, so a typo in a dataset is a load error
//! instead of a silent calculation-time miss.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Crop culture used for land-use-change (MUT) factor lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Culture {
    Pinus,
    Eucalipto,
    Amendoim,
}

impl Culture {
    /// All culture variants
    pub const ALL: [Culture; 3] = [Culture::Pinus, Culture::Eucalipto, Culture::Amendoim];

    /// Get the dataset key string (e.g., "pinus")
    pub fn code(&self) -> &'static str {
        match self {
            Culture::Pinus => "pinus",
            Culture::Eucalipto => "eucalipto",
            Culture::Amendoim => "amendoim",
        }
    }

    /// Classify a biomass name into its culture.
    ///
    /// Worksheet convention: eucalyptus- and peanut-derived residues are
    /// matched on the name, everything else is treated as pine.
    pub fn from_biomass_name(biomass_name: &str) -> Self {
        let lower = biomass_name.to_lowercase();
        if lower.contains("eucali") {
            Culture::Eucalipto
        } else if lower.contains("amendo") {
            Culture::Amendoim
        } else {
            Culture::Pinus
        }
    }

    /// Parse a dataset key, failing on unrecognized cultures.
    pub fn parse_key(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().as_str() {
            "pinus" => Ok(Culture::Pinus),
            "eucalipto" => Ok(Culture::Eucalipto),
            "amendoim" => Ok(Culture::Amendoim),
            _ => Err(CalcError::dataset(format!("unknown culture '{}'", s))),
        }
    }
}

impl std::fmt::Display for Culture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Transport modal for distribution legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportModal {
    Road,
    Rail,
    Water,
    Maritime,
}

impl TransportModal {
    /// All modal variants
    pub const ALL: [TransportModal; 4] = [
        TransportModal::Road,
        TransportModal::Rail,
        TransportModal::Water,
        TransportModal::Maritime,
    ];

    /// Get the dataset key string (e.g., "road")
    pub fn code(&self) -> &'static str {
        match self {
            TransportModal::Road => "road",
            TransportModal::Rail => "rail",
            TransportModal::Water => "water",
            TransportModal::Maritime => "maritime",
        }
    }

    /// Parse a dataset key, failing on unrecognized modals.
    pub fn parse_key(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().as_str() {
            "road" => Ok(TransportModal::Road),
            "rail" => Ok(TransportModal::Rail),
            "water" => Ok(TransportModal::Water),
            "maritime" => Ok(TransportModal::Maritime),
            _ => Err(CalcError::dataset(format!("unknown transport modal '{}'", s))),
        }
    }
}

impl std::fmt::Display for TransportModal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Electricity source categories declared on a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectricitySource {
    Grid,
    Solar,
    Wind,
    Hydro,
    Biomass,
    Other,
}

impl ElectricitySource {
    /// All electricity source variants
    pub const ALL: [ElectricitySource; 6] = [
        ElectricitySource::Grid,
        ElectricitySource::Solar,
        ElectricitySource::Wind,
        ElectricitySource::Hydro,
        ElectricitySource::Biomass,
        ElectricitySource::Other,
    ];

    /// Get the dataset key string (e.g., "grid")
    pub fn code(&self) -> &'static str {
        match self {
            ElectricitySource::Grid => "grid",
            ElectricitySource::Solar => "solar",
            ElectricitySource::Wind => "wind",
            ElectricitySource::Hydro => "hydro",
            ElectricitySource::Biomass => "biomass",
            ElectricitySource::Other => "other",
        }
    }

    /// On-site renewables are zero-emission when the dataset carries no
    /// dedicated record for them; everything else falls back to the grid.
    pub fn is_renewable(&self) -> bool {
        matches!(
            self,
            ElectricitySource::Solar
                | ElectricitySource::Wind
                | ElectricitySource::Hydro
                | ElectricitySource::Biomass
        )
    }

    /// Parse a dataset key, failing on unrecognized sources.
    pub fn parse_key(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().as_str() {
            "grid" => Ok(ElectricitySource::Grid),
            "solar" => Ok(ElectricitySource::Solar),
            "wind" => Ok(ElectricitySource::Wind),
            "hydro" => Ok(ElectricitySource::Hydro),
            "biomass" => Ok(ElectricitySource::Biomass),
            "other" => Ok(ElectricitySource::Other),
            _ => Err(CalcError::dataset(format!(
                "unknown electricity source '{}'",
                s
            ))),
        }
    }
}

impl std::fmt::Display for ElectricitySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Stationary fuel categories declared on a project.
///
/// Display names keep the worksheet's Portuguese labels so reports match
/// the source material operators already know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelKind {
    Diesel,
    Gasoline,
    Ethanol,
    Biodiesel,
    Cng,
    Lpg,
    Biomass,
    Other,
}

impl FuelKind {
    /// All fuel variants
    pub const ALL: [FuelKind; 8] = [
        FuelKind::Diesel,
        FuelKind::Gasoline,
        FuelKind::Ethanol,
        FuelKind::Biodiesel,
        FuelKind::Cng,
        FuelKind::Lpg,
        FuelKind::Biomass,
        FuelKind::Other,
    ];

    /// Get the dataset key string (e.g., "diesel")
    pub fn code(&self) -> &'static str {
        match self {
            FuelKind::Diesel => "diesel",
            FuelKind::Gasoline => "gasoline",
            FuelKind::Ethanol => "ethanol",
            FuelKind::Biodiesel => "biodiesel",
            FuelKind::Cng => "cng",
            FuelKind::Lpg => "lpg",
            FuelKind::Biomass => "biomass",
            FuelKind::Other => "other",
        }
    }

    /// Get display name (worksheet label)
    pub fn display_name(&self) -> &'static str {
        match self {
            FuelKind::Diesel => "Diesel",
            FuelKind::Gasoline => "Gasolina",
            FuelKind::Ethanol => "Etanol",
            FuelKind::Biodiesel => "Biodiesel",
            FuelKind::Cng => "Gás Natural",
            FuelKind::Lpg => "GLP",
            FuelKind::Biomass => "Lenha",
            FuelKind::Other => "Óleo combustível",
        }
    }

    /// Parse a dataset key, failing on unrecognized fuels.
    pub fn parse_key(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().as_str() {
            "diesel" => Ok(FuelKind::Diesel),
            "gasoline" => Ok(FuelKind::Gasoline),
            "ethanol" => Ok(FuelKind::Ethanol),
            "biodiesel" => Ok(FuelKind::Biodiesel),
            "cng" | "gnv" => Ok(FuelKind::Cng),
            "lpg" | "glp" => Ok(FuelKind::Lpg),
            "biomass" => Ok(FuelKind::Biomass),
            "other" => Ok(FuelKind::Other),
            _ => Err(CalcError::dataset(format!("unknown fuel kind '{}'", s))),
        }
    }
}

impl std::fmt::Display for FuelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Non-fuel industrial inputs with dedicated factor records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndustrialInput {
    Starch,
    Water,
    Lubricant,
    Chemical,
}

impl IndustrialInput {
    /// All industrial input variants
    pub const ALL: [IndustrialInput; 4] = [
        IndustrialInput::Starch,
        IndustrialInput::Water,
        IndustrialInput::Lubricant,
        IndustrialInput::Chemical,
    ];

    /// Get the dataset key string (e.g., "water")
    pub fn code(&self) -> &'static str {
        match self {
            IndustrialInput::Starch => "starch",
            IndustrialInput::Water => "water",
            IndustrialInput::Lubricant => "lubricant",
            IndustrialInput::Chemical => "chemical",
        }
    }

    /// Parse a dataset key, failing on unrecognized inputs.
    pub fn parse_key(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().as_str() {
            "starch" | "amido" => Ok(IndustrialInput::Starch),
            "water" => Ok(IndustrialInput::Water),
            "lubricant" | "lubrificante" => Ok(IndustrialInput::Lubricant),
            "chemical" => Ok(IndustrialInput::Chemical),
            _ => Err(CalcError::dataset(format!(
                "unknown industrial input '{}'",
                s
            ))),
        }
    }
}

impl std::fmt::Display for IndustrialInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
