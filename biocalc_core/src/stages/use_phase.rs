//! # Use-phase Stage
//!
//! Direct end-use combustion of the finished fuel. Biogenic CO2 is treated
//! as neutral; whatever residual factor (CH4, N2O) the biomass-property
//! record carries is the whole stage.

use crate::reference::BiomassProperty;
use crate::units::CarbonIntensity;

/// Use-phase emission intensity: the biomass's own combustion factor,
/// zero when the record carries none.
pub fn emissions(biomass: &BiomassProperty) -> CarbonIntensity {
    CarbonIntensity(biomass.combustion_emission.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_recorded_factor() {
        let biomass = BiomassProperty {
            biomass_name: "Lenha de Eucalipto".to_string(),
            pci_mj_kg: 15.5,
            combustion_emission: Some(0.0014),
        };
        assert_eq!(emissions(&biomass), CarbonIntensity(0.0014));
    }

    #[test]
    fn test_absent_factor_is_zero() {
        let biomass = BiomassProperty {
            biomass_name: "Serragem".to_string(),
            pci_mj_kg: 19.0,
            combustion_emission: None,
        };
        assert_eq!(emissions(&biomass), CarbonIntensity::ZERO);
    }
}
