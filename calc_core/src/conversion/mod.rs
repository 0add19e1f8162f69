//! # Conversions
//!
//! Unit conversion across six categories and currency conversion through
//! a rate table.
//!
//! - [`unit`] - unit and category catalog
//! - [`factors`] - static factor table and temperature formulas
//! - [`currency`] - currency codes, rate tables and conversion
//! - [`panel`] - two-sided form state with swap

pub mod currency;
pub mod factors;
pub mod panel;
pub mod unit;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

pub use currency::{convert_currency, CurrencyCode, ExchangeRateTable, DEFAULT_BASE_CURRENCY};
pub use factors::{convert_temperature, convert_unit, ConversionFactorTable};
pub use panel::ConversionPanel;
pub use unit::{Unit, UnitCategory};

/// Request to convert a value between two units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConversionInput {
    pub value: f64,
    pub from: Unit,
    pub to: Unit,
}

/// Converted value with its units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitConversionResult {
    pub value: f64,
    pub from: Unit,
    pub to: Unit,
    pub result: f64,
}

/// Convert using the standard factor table.
pub fn calculate(input: &UnitConversionInput) -> CalcResult<UnitConversionResult> {
    let table = ConversionFactorTable::standard()?;
    let result = convert_unit(table, input.value, input.from, input.to)?;
    Ok(UnitConversionResult {
        value: input.value,
        from: input.from,
        to: input.to,
        result,
    })
}
