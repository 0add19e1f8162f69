//! # Calculations
//!
//! Form-based calculators. Each one follows the same pattern:
//!
//! - `*Input` - input parameters (JSON-serializable)
//! - `*Result` - calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - pure calculation function
//!
//! ## Available Calculations
//!
//! - [`emi`] - loan installment
//! - [`gst`] - goods and services tax
//! - [`discount`] - discount and savings
//! - [`bmi`] - body mass index
//! - [`age`] - calendar age and elapsed totals
//!
//! [`CalculationRequest`] wraps these together with unit conversion, the
//! math utilities and expression evaluation so any of them can be driven
//! from a single JSON document:
//!
//! ```rust
//! use calc_core::calculations::{run, CalculationOutcome, CalculationRequest};
//!
//! let request: CalculationRequest =
//!     serde_json::from_str(r#"{"type": "Gst", "amount": 1000, "rate_percent": 18}"#).unwrap();
//! match run(&request).unwrap() {
//!     CalculationOutcome::Gst(result) => assert_eq!(result.total_with_gst, 1180.0),
//!     other => panic!("unexpected outcome {other:?}"),
//! }
//! ```

pub mod age;
pub mod bmi;
pub mod discount;
pub mod emi;
pub mod gst;

use serde::{Deserialize, Serialize};

use crate::arithmetic::evaluate_expression;
use crate::conversion::{self, UnitConversionInput, UnitConversionResult};
use crate::errors::CalcResult;
use crate::number_theory::{self, MathUtilityInput, MathUtilityResult};

// Re-export commonly used types
pub use age::{AgeInput, AgeResult};
pub use bmi::{BmiCategory, BmiInput, BmiResult, Height};
pub use discount::{DiscountInput, DiscountResult};
pub use emi::{EmiInput, EmiResult, TenureUnit};
pub use gst::{GstInput, GstResult};

/// Enum wrapper for every synchronous calculation.
///
/// Currency conversion is not listed: it needs a loaded rate table and is
/// driven through [`crate::rates::RateBook`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationRequest {
    Emi(EmiInput),
    Gst(GstInput),
    Discount(DiscountInput),
    Bmi(BmiInput),
    Age(AgeInput),
    UnitConversion(UnitConversionInput),
    MathUtility(MathUtilityInput),
    /// Scientific-calculator expression, e.g. `"2sin(30)+8(9+6)"`
    Expression { expression: String },
}

impl CalculationRequest {
    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationRequest::Emi(_) => "Emi",
            CalculationRequest::Gst(_) => "Gst",
            CalculationRequest::Discount(_) => "Discount",
            CalculationRequest::Bmi(_) => "Bmi",
            CalculationRequest::Age(_) => "Age",
            CalculationRequest::UnitConversion(_) => "UnitConversion",
            CalculationRequest::MathUtility(_) => "MathUtility",
            CalculationRequest::Expression { .. } => "Expression",
        }
    }
}

/// Result of an evaluated expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionResult {
    pub expression: String,
    pub value: f64,
}

/// Tagged result matching [`CalculationRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutcome {
    Emi(EmiResult),
    Gst(GstResult),
    Discount(DiscountResult),
    Bmi(BmiResult),
    Age(AgeResult),
    UnitConversion(UnitConversionResult),
    MathUtility(MathUtilityResult),
    Expression(ExpressionResult),
}

/// Dispatch a request to its calculator.
pub fn run(request: &CalculationRequest) -> CalcResult<CalculationOutcome> {
    Ok(match request {
        CalculationRequest::Emi(input) => CalculationOutcome::Emi(emi::calculate(input)?),
        CalculationRequest::Gst(input) => CalculationOutcome::Gst(gst::calculate(input)?),
        CalculationRequest::Discount(input) => CalculationOutcome::Discount(discount::calculate(input)?),
        CalculationRequest::Bmi(input) => CalculationOutcome::Bmi(bmi::calculate(input)?),
        CalculationRequest::Age(input) => CalculationOutcome::Age(age::calculate(input)?),
        CalculationRequest::UnitConversion(input) => {
            CalculationOutcome::UnitConversion(conversion::calculate(input)?)
        }
        CalculationRequest::MathUtility(input) => {
            CalculationOutcome::MathUtility(number_theory::calculate(input)?)
        }
        CalculationRequest::Expression { expression } => CalculationOutcome::Expression(ExpressionResult {
            expression: expression.clone(),
            value: evaluate_expression(expression)?,
        }),
    })
}
