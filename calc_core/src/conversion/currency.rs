//! # Currency Conversion
//!
//! Converts amounts through an [`ExchangeRateTable`] holding rates
//! relative to a base currency (USD by default). Rates are "units of
//! currency per one unit of base".
//!
//! ```text
//! rate(from → to) = rates[to] / rates[from]
//! ```
//!
//! Both codes must be present in the table. An empty table means rates
//! have not been loaded yet, so every conversion fails with
//! [`CalcError::RatesUnavailable`] (even USD → USD).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::errors::{CalcError, CalcResult};
use crate::number::{require_positive, round_to};

/// Default base currency for fetched rate tables
pub const DEFAULT_BASE_CURRENCY: &str = "USD";

/// Three-letter ISO 4217 currency code, stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: &str) -> CalcResult<Self> {
        let code = code.trim();
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(CalcError::invalid_input(
                "currency",
                code,
                "Currency code must be three letters",
            ));
        }
        Ok(CurrencyCode(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CurrencyCode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CurrencyCode::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CalcError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CurrencyCode::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Exchange rates relative to `base`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateTable {
    pub base: CurrencyCode,
    pub rates: BTreeMap<CurrencyCode, f64>,
}

impl ExchangeRateTable {
    /// Build a table, skipping entries whose code is malformed or whose
    /// rate is not a positive finite number.
    pub fn new<I, S>(base: CurrencyCode, rates: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let rates = rates
            .into_iter()
            .filter(|(_, rate)| rate.is_finite() && *rate > 0.0)
            .filter_map(|(code, rate)| CurrencyCode::new(code.as_ref()).ok().map(|c| (c, rate)))
            .collect();
        ExchangeRateTable { base, rates }
    }

    /// Table with no rates (nothing loaded yet).
    pub fn empty(base: CurrencyCode) -> Self {
        ExchangeRateTable {
            base,
            rates: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Currencies available for selection, sorted.
    pub fn currencies(&self) -> impl Iterator<Item = &CurrencyCode> {
        self.rates.keys()
    }

    fn rate(&self, code: &CurrencyCode) -> CalcResult<f64> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| CalcError::rates_unavailable(code.as_str()))
    }

    /// Units of `to` per one unit of `from`.
    pub fn exchange_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> CalcResult<f64> {
        let from_rate = self.rate(from)?;
        let to_rate = self.rate(to)?;
        Ok(to_rate / from_rate)
    }
}

/// Convert `amount` from one currency to another, rounded to 2 decimals.
pub fn convert_currency(
    table: &ExchangeRateTable,
    amount: f64,
    from: &CurrencyCode,
    to: &CurrencyCode,
) -> CalcResult<f64> {
    require_positive("amount", amount)?;
    let rate = table.exchange_rate(from, to)?;
    Ok(round_to(amount * rate, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn test_table() -> ExchangeRateTable {
        ExchangeRateTable::new(code("USD"), [("USD", 1.0), ("INR", 83.0), ("EUR", 0.92)])
    }

    #[test]
    fn test_usd_to_inr_and_back() {
        let table = test_table();
        assert_eq!(convert_currency(&table, 100.0, &code("USD"), &code("INR")).unwrap(), 8300.0);
        assert_eq!(convert_currency(&table, 8300.0, &code("INR"), &code("USD")).unwrap(), 100.0);
    }

    #[test]
    fn test_cross_rate() {
        let table = test_table();
        let rate = table.exchange_rate(&code("EUR"), &code("INR")).unwrap();
        assert!((rate - 83.0 / 0.92).abs() < 1e-12);
        assert_eq!(convert_currency(&table, 10.0, &code("EUR"), &code("INR")).unwrap(), 902.17);
    }

    #[test]
    fn test_missing_rate() {
        let err = convert_currency(&test_table(), 5.0, &code("USD"), &code("GBP")).unwrap_err();
        assert_eq!(err, CalcError::rates_unavailable("GBP"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_empty_table_fails_even_for_same_currency() {
        let table = ExchangeRateTable::empty(code("USD"));
        assert!(convert_currency(&table, 1.0, &code("USD"), &code("USD")).is_err());
    }

    #[test]
    fn test_non_positive_amount() {
        let err = convert_currency(&test_table(), 0.0, &code("USD"), &code("INR")).unwrap_err();
        assert_eq!(err.error_code(), "INCOMPLETE_INPUT");
    }

    #[test]
    fn test_currency_code_validation() {
        assert_eq!(code(" inr ").as_str(), "INR");
        assert!(CurrencyCode::new("US").is_err());
        assert!(CurrencyCode::new("U5D").is_err());
        let parsed: CurrencyCode = serde_json::from_str("\"eur\"").unwrap();
        assert_eq!(parsed, code("EUR"));
        assert!(serde_json::from_str::<CurrencyCode>("\"EURO\"").is_err());
    }

    #[test]
    fn test_bad_rates_skipped() {
        let table = ExchangeRateTable::new(code("USD"), [("USD", 1.0), ("XXXX", 2.0), ("ABC", -1.0)]);
        assert_eq!(table.currencies().count(), 1);
    }
}
