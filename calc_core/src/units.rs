//! # Unit Types
//!
//! Lightweight newtype wrappers for the body measurements the BMI screen
//! accepts. They keep centimeters, feet and inches from being mixed up
//! before height is normalized to meters, and serialize as bare numbers.
//!
//! General-purpose unit conversion (length, weight, volume, ...) lives in
//! [`crate::conversion`]; these types only cover height and weight.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Centimeters, Feet, Inches, Meters};
//!
//! let height: Meters = Centimeters(175.0).into();
//! assert!((height.0 - 1.75).abs() < 1e-12);
//!
//! let total = Inches::from(Feet(5.0)) + Inches(10.0);
//! assert_eq!(total.0, 70.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Meters per inch (exact by definition)
pub const METERS_PER_INCH: f64 = 0.0254;

// ============================================================================
// Length Units
// ============================================================================

/// Length in meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Centimeters> for Meters {
    fn from(cm: Centimeters) -> Self {
        Meters(cm.0 / 100.0)
    }
}

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Meters {
    fn from(inches: Inches) -> Self {
        Meters(inches.0 * METERS_PER_INCH)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Centimeters);
impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(Kilograms);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_and_inches_to_meters() {
        let inches = Inches::from(Feet(5.0)) + Inches(9.0);
        assert_eq!(inches.0, 69.0);
        let m: Meters = inches.into();
        assert!((m.0 - 1.7526).abs() < 1e-9);
    }

    #[test]
    fn test_centimeters_to_meters() {
        let m: Meters = Centimeters(180.0).into();
        assert!((m.0 - 1.8).abs() < 1e-12);
    }

    #[test]
    fn test_addition() {
        assert_eq!((Inches(60.0) + Inches(9.5)).value(), 69.5);
        assert_eq!((Kilograms(70.0) + Kilograms(5.0)).value(), 75.0);
    }

    #[test]
    fn test_weight_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Kilograms(70.5)).unwrap(), "70.5");
    }

    #[test]
    fn test_serialization() {
        let h = Centimeters(172.5);
        let json = serde_json::to_string(&h).unwrap();
        assert_eq!(json, "172.5");
        let roundtrip: Centimeters = serde_json::from_str(&json).unwrap();
        assert_eq!(h, roundtrip);
    }
}
