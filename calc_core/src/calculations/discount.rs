//! # Discount Calculation
//!
//! `discount = P · d / 100`, `final = P − discount`, rounded to 2 decimals.
//! A percentage outside `[0, 100]` is rejected as a domain error rather
//! than clamped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::number::{parse_number, round_to};

/// Input parameters for a discount calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountInput {
    /// Original price
    pub price: f64,
    /// Discount in percent, `0..=100`
    pub discount_percent: f64,
}

impl DiscountInput {
    /// Build from raw text fields.
    pub fn from_fields(price: &str, discount: &str) -> CalcResult<Self> {
        Ok(DiscountInput {
            price: parse_number("price", price)?,
            discount_percent: parse_number("discount_percent", discount)?,
        })
    }

    pub fn validate(&self) -> CalcResult<()> {
        if self.price <= 0.0 {
            return Err(CalcError::incomplete_input("price", "Price must be positive"));
        }
        if !(0.0..=100.0).contains(&self.discount_percent) {
            return Err(CalcError::invalid_domain(
                "discount",
                "Discount must be between 0 and 100 percent",
            ));
        }
        Ok(())
    }
}

/// Discount breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountResult {
    pub original_price: f64,
    pub discount_amount: f64,
    pub final_price: f64,
    /// Amount saved (same as `discount_amount`, shown as "You Saved")
    pub saved: f64,
}

/// Calculate discount and final price.
pub fn calculate(input: &DiscountInput) -> CalcResult<DiscountResult> {
    input.validate()?;

    let discount = input.price * input.discount_percent / 100.0;
    let discount_amount = round_to(discount, 2);
    let result = DiscountResult {
        original_price: input.price,
        discount_amount,
        final_price: round_to(input.price - discount, 2),
        saved: discount_amount,
    };

    debug!(price = input.price, percent = input.discount_percent, final_price = result.final_price, "discount calculated");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_calculation() {
        let result = calculate(&DiscountInput { price: 2500.0, discount_percent: 20.0 }).unwrap();
        assert_eq!(result.discount_amount, 500.0);
        assert_eq!(result.final_price, 2000.0);
        assert_eq!(result.saved, 500.0);
    }

    #[test]
    fn test_boundaries_accepted() {
        let none = calculate(&DiscountInput { price: 80.0, discount_percent: 0.0 }).unwrap();
        assert_eq!(none.final_price, 80.0);
        let all = calculate(&DiscountInput { price: 80.0, discount_percent: 100.0 }).unwrap();
        assert_eq!(all.final_price, 0.0);
    }

    #[test]
    fn test_out_of_range_percent_rejected() {
        let err = calculate(&DiscountInput { price: 80.0, discount_percent: 120.0 }).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_DOMAIN");
        assert!(calculate(&DiscountInput { price: 80.0, discount_percent: -5.0 }).is_err());
    }

    #[test]
    fn test_rounding() {
        let result = calculate(&DiscountInput { price: 19.99, discount_percent: 15.0 }).unwrap();
        // 2.9985 -> 3.00, 16.9915 -> 16.99
        assert_eq!(result.discount_amount, 3.0);
        assert_eq!(result.final_price, 16.99);
    }
}
