//! # GST Calculation
//!
//! Adds Goods and Services Tax to an amount: `gst = A · g / 100`,
//! `total = A + gst`, both rounded to 2 decimals.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::number::{parse_number, round_to};

/// Input parameters for a GST calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstInput {
    /// Amount before tax
    pub amount: f64,
    /// GST rate in percent
    pub rate_percent: f64,
}

impl GstInput {
    /// Build from raw text fields.
    pub fn from_fields(amount: &str, rate: &str) -> CalcResult<Self> {
        Ok(GstInput {
            amount: parse_number("amount", amount)?,
            rate_percent: parse_number("rate_percent", rate)?,
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.amount <= 0.0 {
            return Err(CalcError::incomplete_input("amount", "Amount must be positive"));
        }
        if self.rate_percent <= 0.0 {
            return Err(CalcError::incomplete_input("rate_percent", "GST rate must be positive"));
        }
        Ok(())
    }
}

/// GST breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GstResult {
    pub original_amount: f64,
    pub gst_amount: f64,
    pub total_with_gst: f64,
}

/// Calculate tax and gross total.
pub fn calculate(input: &GstInput) -> CalcResult<GstResult> {
    input.validate()?;

    let gst = input.amount * input.rate_percent / 100.0;
    let result = GstResult {
        original_amount: input.amount,
        gst_amount: round_to(gst, 2),
        total_with_gst: round_to(input.amount + gst, 2),
    };

    debug!(amount = input.amount, rate = input.rate_percent, gst = result.gst_amount, "gst calculated");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gst_calculation() {
        let result = calculate(&GstInput { amount: 1000.0, rate_percent: 18.0 }).unwrap();
        assert_eq!(result.gst_amount, 180.0);
        assert_eq!(result.total_with_gst, 1180.0);
        assert_eq!(result.original_amount, 1000.0);
    }

    #[test]
    fn test_gst_rounds_to_cents() {
        let result = calculate(&GstInput { amount: 99.99, rate_percent: 12.5 }).unwrap();
        // 12.49875 -> 12.50
        assert_eq!(result.gst_amount, 12.5);
        assert_eq!(result.total_with_gst, 112.49);
    }

    #[test]
    fn test_incomplete_inputs() {
        assert!(calculate(&GstInput { amount: 0.0, rate_percent: 5.0 }).is_err());
        assert!(calculate(&GstInput { amount: 100.0, rate_percent: 0.0 }).is_err());
        assert!(GstInput::from_fields("", "5").is_err());
    }
}
