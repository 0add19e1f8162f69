//! # BMI Calculation
//!
//! Body Mass Index from weight in kilograms and a height given either in
//! centimeters or in feet and inches.
//!
//! ```text
//! BMI = weight_kg / height_m²
//! ```
//!
//! The reported BMI is rounded to one decimal. The category is taken from
//! the unrounded value with boundaries at 18.5, 25 and 30.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::bmi::{calculate, BmiCategory, BmiInput, Height};
//! use calc_core::units::Kilograms;
//!
//! let input = BmiInput {
//!     weight_kg: Kilograms(70.0),
//!     height: Height::Centimeters { cm: 175.0 },
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.bmi, 22.9);
//! assert_eq!(result.category, BmiCategory::Normal);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::number::{require_positive, round_to};
use crate::units::{Centimeters, Feet, Inches, Kilograms, Meters};

/// Height as entered on the BMI screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit")]
pub enum Height {
    /// Metric entry
    Centimeters { cm: f64 },
    /// Imperial entry; inches must be in `[0, 12)`
    FeetInches { feet: f64, inches: f64 },
}

impl Height {
    /// Validate and normalize to meters.
    pub fn to_meters(&self) -> CalcResult<Meters> {
        match *self {
            Height::Centimeters { cm } => {
                require_positive("height", cm)?;
                Ok(Centimeters(cm).into())
            }
            Height::FeetInches { feet, inches } => {
                if feet < 0.0 {
                    return Err(CalcError::invalid_input("feet", feet.to_string(), "Feet cannot be negative"));
                }
                if !(0.0..12.0).contains(&inches) {
                    return Err(CalcError::invalid_input(
                        "inches",
                        inches.to_string(),
                        "Inches must be between 0 and 11",
                    ));
                }
                if feet == 0.0 && inches == 0.0 {
                    return Err(CalcError::incomplete_input("height", "Please enter a positive number."));
                }
                Ok((Inches::from(Feet(feet)) + Inches(inches)).into())
            }
        }
    }
}

/// Input parameters for a BMI calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiInput {
    pub weight_kg: Kilograms,
    pub height: Height,
}

impl BmiInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("weight", self.weight_kg.value())?;
        self.height.to_meters().map(|_| ())
    }
}

/// BMI classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value: `< 18.5`, `< 25`, `< 30`, otherwise obese.
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// BMI value and category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
    /// Normalized height used for the calculation
    pub height_m: Meters,
}

pub fn calculate(input: &BmiInput) -> CalcResult<BmiResult> {
    input.validate()?;

    let height = input.height.to_meters()?;
    let bmi = input.weight_kg.value() / (height.value() * height.value());

    let result = BmiResult {
        bmi: round_to(bmi, 1),
        category: BmiCategory::from_bmi(bmi),
        height_m: height,
    };

    debug!(bmi = result.bmi, category = %result.category, "bmi calculated");
    Ok(result)
}
