//! # Conversion Factor Table
//!
//! Static multiplicative factors for every non-temperature category,
//! relative to one base unit per category (factor exactly `1.0`).
//!
//! The standard table is embedded from `data/conversion_factors.toml`,
//! validated on first use, and cached for the life of the process.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::conversion::{convert_unit, ConversionFactorTable, Unit};
//!
//! let table = ConversionFactorTable::standard().unwrap();
//! let km = convert_unit(table, 1500.0, Unit::Meter, Unit::Kilometer).unwrap();
//! assert_eq!(km, 1.5);
//! ```

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use super::unit::{Unit, UnitCategory};
use crate::errors::{CalcError, CalcResult};
use crate::number::round_to;

const STANDARD_FACTORS_TOML: &str = include_str!("../../data/conversion_factors.toml");

static STANDARD: OnceCell<ConversionFactorTable> = OnceCell::new();

/// Decimal places kept by unit and temperature conversions
pub const CONVERSION_DECIMALS: u32 = 6;

/// Validated factor table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionFactorTable {
    factors: HashMap<Unit, f64>,
}

impl ConversionFactorTable {
    /// The embedded standard table.
    pub fn standard() -> CalcResult<&'static ConversionFactorTable> {
        STANDARD.get_or_try_init(|| Self::from_toml_str(STANDARD_FACTORS_TOML))
    }

    /// Parse and validate a table of `[CATEGORY] UNIT = factor` entries.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let raw: BTreeMap<String, BTreeMap<String, f64>> =
            toml::from_str(text).map_err(|e| CalcError::config(format!("conversion factors: {e}")))?;

        let mut factors = HashMap::new();
        for (category_key, entries) in &raw {
            let category = UnitCategory::from_str_flexible(category_key)
                .filter(|c| *c != UnitCategory::Temperature)
                .ok_or_else(|| CalcError::config(format!("unknown factor category '{category_key}'")))?;

            let mut base_units = 0;
            for (unit_key, &factor) in entries {
                let unit = Unit::from_key(unit_key)
                    .ok_or_else(|| CalcError::config(format!("unknown unit '{unit_key}'")))?;
                if unit.category() != category {
                    return Err(CalcError::config(format!("{unit_key} is not a {category_key} unit")));
                }
                if !(factor.is_finite() && factor > 0.0) {
                    return Err(CalcError::config(format!("factor for {unit_key} must be positive")));
                }
                if factor == 1.0 {
                    base_units += 1;
                }
                factors.insert(unit, factor);
            }

            if base_units != 1 {
                return Err(CalcError::config(format!(
                    "{category_key} must have exactly one base unit with factor 1, found {base_units}"
                )));
            }
        }

        debug!(units = factors.len(), "conversion factors loaded");
        Ok(ConversionFactorTable { factors })
    }

    /// Factor for `unit`, if it has one.
    pub fn factor(&self, unit: Unit) -> Option<f64> {
        self.factors.get(&unit).copied()
    }

    /// Base unit of `category` (factor `1.0`).
    pub fn base_unit(&self, category: UnitCategory) -> Option<Unit> {
        category.units().find(|u| self.factor(*u) == Some(1.0))
    }
}

/// Convert `value` between two units of the same category.
///
/// Temperature units are routed to [`convert_temperature`].
pub fn convert_unit(table: &ConversionFactorTable, value: f64, from: Unit, to: Unit) -> CalcResult<f64> {
    if from.category() != to.category() {
        return Err(CalcError::invalid_input(
            "unit",
            format!("{from} -> {to}"),
            "Units belong to different categories",
        ));
    }
    if from.category() == UnitCategory::Temperature {
        return convert_temperature(value, from, to);
    }

    let missing = |unit: Unit| CalcError::config(format!("no conversion factor for {}", unit.key()));
    let from_factor = table.factor(from).ok_or_else(|| missing(from))?;
    let to_factor = table.factor(to).ok_or_else(|| missing(to))?;

    Ok(round_to(value / from_factor * to_factor, CONVERSION_DECIMALS))
}

/// Convert between Celsius, Fahrenheit and Kelvin.
pub fn convert_temperature(value: f64, from: Unit, to: Unit) -> CalcResult<f64> {
    let celsius = match from {
        Unit::Celsius => value,
        Unit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        Unit::Kelvin => value - 273.15,
        other => return Err(not_a_temperature(other)),
    };
    let converted = match to {
        Unit::Celsius => celsius,
        Unit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        Unit::Kelvin => celsius + 273.15,
        other => return Err(not_a_temperature(other)),
    };
    Ok(round_to(converted, CONVERSION_DECIMALS))
}

fn not_a_temperature(unit: Unit) -> CalcError {
    CalcError::invalid_input("unit", unit.key(), "Not a temperature unit")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> &'static ConversionFactorTable {
        ConversionFactorTable::standard().unwrap()
    }

    #[test]
    fn test_standard_table_covers_all_units() {
        for unit in Unit::ALL {
            if unit.category() != UnitCategory::Temperature {
                assert!(table().factor(unit).is_some(), "missing factor for {unit}");
            }
        }
        assert_eq!(table().base_unit(UnitCategory::Weight), Some(Unit::Kilogram));
        assert_eq!(table().base_unit(UnitCategory::Speed), Some(Unit::MeterPerSecond));
    }

    #[test]
    fn test_length_conversion() {
        assert_eq!(convert_unit(table(), 1.0, Unit::Kilometer, Unit::Meter).unwrap(), 1000.0);
        assert_eq!(convert_unit(table(), 1.0, Unit::Meter, Unit::Foot).unwrap(), 3.28084);
        // 12 in -> 0.999999 ft with these factors
        let feet = convert_unit(table(), 12.0, Unit::Inch, Unit::Foot).unwrap();
        assert!((feet - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_same_unit_is_identity() {
        for unit in [Unit::Gram, Unit::Acre, Unit::Knot] {
            assert_eq!(convert_unit(table(), 42.5, unit, unit).unwrap(), 42.5);
        }
    }

    #[test]
    fn test_round_trip_every_pair() {
        // Each leg rounds to 6 decimals, so a round trip may drift by up to
        // 5e-7 on the way there, scaled by from/to on the way back, plus
        // 5e-7 on the return leg. Small values can vanish entirely
        // (123.456 mg is 0.000000 t).
        let x = 123.456;
        for category in UnitCategory::ALL {
            if category == UnitCategory::Temperature {
                continue;
            }
            for a in category.units() {
                for b in category.units() {
                    let there = convert_unit(table(), x, a, b).unwrap();
                    let back = convert_unit(table(), there, b, a).unwrap();
                    let ratio = table().factor(a).unwrap() / table().factor(b).unwrap();
                    let tolerance = 1e-6 * (1.0 + ratio) + 1e-9 * x;
                    assert!(
                        (back - x).abs() <= tolerance,
                        "{a} -> {b} -> {a} gave {back}, tolerance {tolerance}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_round_trip_loses_tiny_intermediates() {
        let tons = convert_unit(table(), 123.456, Unit::Milligram, Unit::Ton).unwrap();
        assert_eq!(tons, 0.0);
        for (a, b) in [(Unit::Mile, Unit::Yard), (Unit::Pound, Unit::Ounce), (Unit::Gallon, Unit::Cup)] {
            let there = convert_unit(table(), 3.0, a, b).unwrap();
            let back = convert_unit(table(), there, b, a).unwrap();
            assert!((back - 3.0).abs() < 1e-4, "{a} -> {b} -> {a} gave {back}");
        }
    }

    #[test]
    fn test_temperature_round_trip() {
        for celsius in [-273.15, 0.0, 37.0, 100.0] {
            for via in [Unit::Fahrenheit, Unit::Kelvin] {
                let there = convert_temperature(celsius, Unit::Celsius, via).unwrap();
                let back = convert_temperature(there, via, Unit::Celsius).unwrap();
                assert!((back - celsius).abs() < 1e-9, "{celsius} C via {via} gave {back}");
            }
        }
    }

    #[test]
    fn test_temperature() {
        assert_eq!(convert_temperature(100.0, Unit::Celsius, Unit::Fahrenheit).unwrap(), 212.0);
        assert_eq!(convert_temperature(32.0, Unit::Fahrenheit, Unit::Celsius).unwrap(), 0.0);
        assert_eq!(convert_temperature(0.0, Unit::Kelvin, Unit::Celsius).unwrap(), -273.15);
        assert_eq!(convert_unit(table(), -40.0, Unit::Fahrenheit, Unit::Celsius).unwrap(), -40.0);
        assert_eq!(convert_temperature(25.0, Unit::Celsius, Unit::Kelvin).unwrap(), 298.15);
    }

    #[test]
    fn test_category_mismatch() {
        let err = convert_unit(table(), 1.0, Unit::Meter, Unit::Kilogram).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(convert_temperature(1.0, Unit::Meter, Unit::Celsius).is_err());
    }

    #[test]
    fn test_invalid_tables_rejected() {
        let no_base = "[LENGTH]\nMETER = 2.0\nKILOMETER = 0.002\n";
        assert_eq!(
            ConversionFactorTable::from_toml_str(no_base).unwrap_err().error_code(),
            "CONFIG_ERROR"
        );
        let wrong_category = "[LENGTH]\nMETER = 1.0\nGRAM = 1000.0\n";
        assert!(ConversionFactorTable::from_toml_str(wrong_category).is_err());
        let negative = "[WEIGHT]\nKILOGRAM = 1.0\nGRAM = -1000.0\n";
        assert!(ConversionFactorTable::from_toml_str(negative).is_err());
        let temperature = "[TEMPERATURE]\nCELSIUS = 1.0\n";
        assert!(ConversionFactorTable::from_toml_str(temperature).is_err());
    }
}
