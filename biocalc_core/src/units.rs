//! # Unit Types
//!
//! Type-safe wrappers for the physical quantities the engine mixes:
//! mass, energy, distance, emission intensities, and allocation fractions.
//! These are lightweight newtypes (just f64 wrappers) so JSON serialization
//! stays clean while unit confusion becomes a compile-time concern.
//!
//! ## Unit System
//!
//! The engine works in the units of the RenovaBio worksheets:
//! - Energy: megajoules (MJ)
//! - Mass: kilograms (kg), with tonnes at the transport/credit boundaries
//! - Calorific value: MJ per kg of fuel or feedstock
//! - Emission intensity: kg CO2eq per MJ of output energy
//! - Transport factors: kg CO2eq per tonne-kilometre
//!
//! ## Example
//!
//! ```rust
//! use biocalc_core::units::{CalorificValue, CarbonIntensity};
//!
//! let pci = CalorificValue(18.8); // MJ per kg of biomass
//! let basis = pci.energy_basis();
//! assert!((basis.0 - 1.0 / 18.8).abs() < 1e-12);
//!
//! let total = CarbonIntensity(0.001) + CarbonIntensity(0.002);
//! assert!((total.0 - 0.003).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Kilograms per tonne, for converting transport masses and credit volumes.
pub const KG_PER_TONNE: f64 = 1000.0;

/// Kilograms of avoided CO2eq per tradable credit unit (1 credit = 1 tCO2eq).
pub const KG_CO2_PER_CREDIT: f64 = 1000.0;

// ============================================================================
// Calorific Value / Energy Basis
// ============================================================================

/// Lower calorific value in MJ per kg (PCI).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalorificValue(pub f64);

/// Kilograms of biomass required to deliver one MJ of output energy.
///
/// This is the common denominator for every stage calculation: absolute
/// annual quantities are rescaled through it into per-MJ terms.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnergyBasis(pub f64);

impl CalorificValue {
    /// Invert the calorific value into kg of biomass per MJ.
    ///
    /// A missing or non-positive PCI yields a zero basis, which collapses
    /// every basis-dependent stage to zero. This is deliberate silent
    /// degradation; the hard unknown-biomass failure is raised earlier by
    /// the reference store.
    pub fn energy_basis(self) -> EnergyBasis {
        if self.0 > 0.0 {
            EnergyBasis(1.0 / self.0)
        } else {
            EnergyBasis(0.0)
        }
    }
}

// ============================================================================
// Emission Intensity
// ============================================================================

/// Emission intensity in kg CO2eq per MJ of output energy.
///
/// Stage results and the lifecycle total both carry this unit, so the
/// additive decomposition `total = agricultural + industrial + transport
/// + use` is exact by construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarbonIntensity(pub f64);

impl CarbonIntensity {
    pub const ZERO: CarbonIntensity = CarbonIntensity(0.0);
}

// ============================================================================
// Allocation Fractions
// ============================================================================

/// Share of upstream emissions attributed to the product of interest.
///
/// Reference spreadsheets record allocations inconsistently as either
/// fractions (0.30) or whole percentages (30.0). [`Fraction::from_allocation`]
/// applies the normalization rule used everywhere an allocation appears:
/// values above 1.0 are divided by 100.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fraction(pub f64);

impl Fraction {
    /// Full allocation to the product (no co-product split).
    pub const FULL: Fraction = Fraction(1.0);

    /// Normalize a raw allocation value from a reference record.
    ///
    /// Values above 1.0 are interpreted as whole percentages.
    pub fn from_allocation(raw: f64) -> Self {
        if raw > 1.0 {
            Fraction(raw / 100.0)
        } else {
            Fraction(raw)
        }
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::FULL
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(CalorificValue);
impl_arithmetic!(EnergyBasis);
impl_arithmetic!(CarbonIntensity);
impl_arithmetic!(Fraction);
