//! # EMI Calculation
//!
//! Equated Monthly Installment for an amortized loan.
//!
//! ## Formula
//!
//! With monthly rate `i = r / 12 / 100` and tenure `n` in months:
//!
//! ```text
//! EMI            = P · i · (1 + i)^n / ((1 + i)^n − 1)
//! total_amount   = EMI · n
//! total_interest = total_amount − P
//! ```
//!
//! All three outputs are rounded to the nearest whole currency unit.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::emi::{calculate, EmiInput, TenureUnit};
//!
//! let input = EmiInput {
//!     principal: 100_000.0,
//!     annual_rate_percent: 10.0,
//!     tenure: 1.0,
//!     tenure_unit: TenureUnit::Years,
//! };
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.monthly_payment, 8792.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::number::parse_number;

/// Unit of the tenure field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TenureUnit {
    #[default]
    Months,
    Years,
}

/// Input parameters for an EMI calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "principal": 500000.0,
///   "annual_rate_percent": 8.5,
///   "tenure": 240.0,
///   "tenure_unit": "Months"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiInput {
    /// Loan principal
    pub principal: f64,

    /// Annual interest rate in percent (e.g. 8.5)
    pub annual_rate_percent: f64,

    /// Loan tenure, in `tenure_unit`
    pub tenure: f64,

    #[serde(default)]
    pub tenure_unit: TenureUnit,
}

impl EmiInput {
    /// Build from raw text fields.
    pub fn from_fields(principal: &str, rate: &str, tenure: &str, tenure_unit: TenureUnit) -> CalcResult<Self> {
        Ok(EmiInput {
            principal: parse_number("principal", principal)?,
            annual_rate_percent: parse_number("annual_rate_percent", rate)?,
            tenure: parse_number("tenure", tenure)?,
            tenure_unit,
        })
    }

    /// Every field must be positive before a result is produced.
    pub fn validate(&self) -> CalcResult<()> {
        if self.principal <= 0.0 {
            return Err(CalcError::incomplete_input("principal", "Principal must be positive"));
        }
        if self.annual_rate_percent <= 0.0 {
            return Err(CalcError::incomplete_input("annual_rate_percent", "Interest rate must be positive"));
        }
        if self.tenure <= 0.0 {
            return Err(CalcError::incomplete_input("tenure", "Tenure must be positive"));
        }
        Ok(())
    }

    /// Tenure converted to months
    pub fn tenure_months(&self) -> f64 {
        match self.tenure_unit {
            TenureUnit::Months => self.tenure,
            TenureUnit::Years => self.tenure * 12.0,
        }
    }

    /// Monthly interest rate as a fraction
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 12.0 / 100.0
    }
}

/// Results from an EMI calculation, rounded to whole currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiResult {
    pub monthly_payment: f64,
    pub total_amount: f64,
    pub total_interest: f64,
}

/// Calculate the monthly installment and loan totals.
pub fn calculate(input: &EmiInput) -> CalcResult<EmiResult> {
    input.validate()?;

    let p = input.principal;
    let i = input.monthly_rate();
    let n = input.tenure_months();

    let growth = (1.0 + i).powf(n);
    let emi = p * i * growth / (growth - 1.0);

    if !emi.is_finite() {
        return Err(CalcError::invalid_domain("emi", "Installment is not a finite number"));
    }

    let total_amount = (emi * n).round();
    let result = EmiResult {
        monthly_payment: emi.round(),
        total_amount,
        total_interest: (total_amount - p).round(),
    };

    debug!(principal = p, rate = input.annual_rate_percent, months = n, emi = result.monthly_payment, "emi calculated");
    Ok(result)
}
