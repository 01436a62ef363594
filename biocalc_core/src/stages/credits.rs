//! # Credit Conversion
//!
//! Turns the lifecycle intensity into an efficiency margin against the
//! fossil baseline, and the margin into tradable emission-reduction
//! credits (1 credit = 1 tCO2eq avoided).
//!
//! No rounding happens here; whether 565.2 credits displays as 565 is a
//! presentation decision left to the caller.

use serde::{Deserialize, Serialize};

use crate::factors;
use crate::units::{CarbonIntensity, KG_CO2_PER_CREDIT, KG_PER_TONNE};

/// Margin of the pathway below the fossil baseline (kg CO2eq/MJ).
/// Negative when the pathway is dirtier than the baseline.
pub fn efficiency_margin(carbon_intensity: CarbonIntensity) -> f64 {
    factors::FOSSIL_REFERENCE_WEIGHTED - carbon_intensity.0
}

/// Percentage emission reduction relative to the fossil baseline.
pub fn reduction_percent(margin: f64) -> f64 {
    (margin / factors::FOSSIL_REFERENCE_WEIGHTED) * 100.0
}

/// Credit volume and estimated revenue for one reference year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditSummary {
    /// Credit units (tCO2eq avoided)
    pub credits: f64,
    /// Estimated revenue at the reference unit price (BRL)
    pub revenue: f64,
}

/// Convert annual production volume and efficiency margin into credits.
///
/// The energy content of the production volume is priced at the finished
/// product's calorific value ([`factors::PRODUCT_PCI_MJ_KG`]), not the
/// feedstock's: `volume_t × 1000 × product_pci` MJ, of which each MJ
/// avoids `margin` kg CO2eq.
pub fn convert(production_volume_t: Option<f64>, margin: f64) -> CreditSummary {
    let volume_t = match production_volume_t {
        Some(v) if v > 0.0 => v,
        _ => return CreditSummary::default(),
    };

    let total_energy_mj = volume_t * KG_PER_TONNE * factors::PRODUCT_PCI_MJ_KG;
    let credits = (total_energy_mj * margin) / KG_CO2_PER_CREDIT;

    CreditSummary {
        credits,
        revenue: credits * factors::CREDIT_UNIT_PRICE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margin_and_reduction_identity() {
        let ci = CarbonIntensity(0.0217);
        let margin = efficiency_margin(ci);
        assert!((margin - (0.0867 - 0.0217)).abs() < 1e-12);

        let pct = reduction_percent(margin);
        assert!((pct - (margin / factors::FOSSIL_REFERENCE_WEIGHTED) * 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_reference_credit_scenario() {
        // 1000 t/yr at a 0.02 kg CO2eq/MJ margin and 28.26 MJ/kg product:
        // 28,260,000 MJ × 0.02 / 1000 = 565.2 credits.
        let summary = convert(Some(1000.0), 0.02);
        assert!((summary.credits - 565.2).abs() < 1e-9);
        assert!((summary.revenue - 565.2 * factors::CREDIT_UNIT_PRICE).abs() < 1e-6);
    }

    #[test]
    fn test_no_volume_means_no_credits() {
        assert_eq!(convert(None, 0.02), CreditSummary::default());
        assert_eq!(convert(Some(0.0), 0.02), CreditSummary::default());
    }

    #[test]
    fn test_negative_margin_yields_negative_credits() {
        // A pathway dirtier than the baseline owes rather than earns;
        // no clamping happens at this layer.
        let summary = convert(Some(100.0), -0.01);
        assert!(summary.credits < 0.0);
        assert!(summary.revenue < 0.0);
    }

    #[test]
    fn test_no_rounding_applied() {
        let summary = convert(Some(333.0), 0.0123);
        let exact = (333.0 * 1000.0 * factors::PRODUCT_PCI_MJ_KG * 0.0123) / 1000.0;
        assert_eq!(summary.credits, exact);
    }
}
