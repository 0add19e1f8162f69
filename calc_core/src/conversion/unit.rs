//! Unit catalog for the unit converter screen.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical quantity a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitCategory {
    Length,
    Weight,
    Temperature,
    Volume,
    Area,
    Speed,
}

impl UnitCategory {
    /// All categories in screen order
    pub const ALL: [UnitCategory; 6] = [
        UnitCategory::Length,
        UnitCategory::Weight,
        UnitCategory::Temperature,
        UnitCategory::Volume,
        UnitCategory::Area,
        UnitCategory::Speed,
    ];

    /// Key used in the factor table (`LENGTH`, `WEIGHT`, ...)
    pub fn key(&self) -> &'static str {
        match self {
            UnitCategory::Length => "LENGTH",
            UnitCategory::Weight => "WEIGHT",
            UnitCategory::Temperature => "TEMPERATURE",
            UnitCategory::Volume => "VOLUME",
            UnitCategory::Area => "AREA",
            UnitCategory::Speed => "SPEED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            UnitCategory::Length => "Length",
            UnitCategory::Weight => "Weight",
            UnitCategory::Temperature => "Temperature",
            UnitCategory::Volume => "Volume",
            UnitCategory::Area => "Area",
            UnitCategory::Speed => "Speed",
        }
    }

    /// Parse from a key or display name, ignoring case.
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(s) || c.display_name().eq_ignore_ascii_case(s))
    }

    /// Units belonging to this category, in screen order.
    pub fn units(&self) -> impl Iterator<Item = Unit> + '_ {
        let category = *self;
        Unit::ALL.into_iter().filter(move |u| u.category() == category)
    }

    /// Units selected when the category is first opened (first two listed)
    pub fn default_pair(&self) -> (Unit, Unit) {
        let mut units = self.units();
        // Every category lists at least three units
        let from = units.next().unwrap_or(Unit::Meter);
        let to = units.next().unwrap_or(from);
        (from, to)
    }
}

impl fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A convertible unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    // Length
    Meter,
    Kilometer,
    Centimeter,
    Millimeter,
    Mile,
    Yard,
    Foot,
    Inch,
    // Weight
    Kilogram,
    Gram,
    Milligram,
    Pound,
    Ounce,
    Ton,
    // Temperature
    Celsius,
    Fahrenheit,
    Kelvin,
    // Volume
    Liter,
    Milliliter,
    Gallon,
    Quart,
    Pint,
    Cup,
    FluidOunce,
    // Area
    SquareMeter,
    SquareKilometer,
    SquareCentimeter,
    SquareMile,
    Acre,
    Hectare,
    // Speed
    MeterPerSecond,
    KilometerPerHour,
    MilePerHour,
    Knot,
}

impl Unit {
    pub const ALL: [Unit; 34] = [
        Unit::Meter,
        Unit::Kilometer,
        Unit::Centimeter,
        Unit::Millimeter,
        Unit::Mile,
        Unit::Yard,
        Unit::Foot,
        Unit::Inch,
        Unit::Kilogram,
        Unit::Gram,
        Unit::Milligram,
        Unit::Pound,
        Unit::Ounce,
        Unit::Ton,
        Unit::Celsius,
        Unit::Fahrenheit,
        Unit::Kelvin,
        Unit::Liter,
        Unit::Milliliter,
        Unit::Gallon,
        Unit::Quart,
        Unit::Pint,
        Unit::Cup,
        Unit::FluidOunce,
        Unit::SquareMeter,
        Unit::SquareKilometer,
        Unit::SquareCentimeter,
        Unit::SquareMile,
        Unit::Acre,
        Unit::Hectare,
        Unit::MeterPerSecond,
        Unit::KilometerPerHour,
        Unit::MilePerHour,
        Unit::Knot,
    ];

    pub fn category(&self) -> UnitCategory {
        use Unit::*;
        match self {
            Meter | Kilometer | Centimeter | Millimeter | Mile | Yard | Foot | Inch => UnitCategory::Length,
            Kilogram | Gram | Milligram | Pound | Ounce | Ton => UnitCategory::Weight,
            Celsius | Fahrenheit | Kelvin => UnitCategory::Temperature,
            Liter | Milliliter | Gallon | Quart | Pint | Cup | FluidOunce => UnitCategory::Volume,
            SquareMeter | SquareKilometer | SquareCentimeter | SquareMile | Acre | Hectare => UnitCategory::Area,
            MeterPerSecond | KilometerPerHour | MilePerHour | Knot => UnitCategory::Speed,
        }
    }

    /// Key used in the factor table (`METER`, `FLUID_OUNCE`, ...)
    pub fn key(&self) -> &'static str {
        use Unit::*;
        match self {
            Meter => "METER",
            Kilometer => "KILOMETER",
            Centimeter => "CENTIMETER",
            Millimeter => "MILLIMETER",
            Mile => "MILE",
            Yard => "YARD",
            Foot => "FOOT",
            Inch => "INCH",
            Kilogram => "KILOGRAM",
            Gram => "GRAM",
            Milligram => "MILLIGRAM",
            Pound => "POUND",
            Ounce => "OUNCE",
            Ton => "TON",
            Celsius => "CELSIUS",
            Fahrenheit => "FAHRENHEIT",
            Kelvin => "KELVIN",
            Liter => "LITER",
            Milliliter => "MILLILITER",
            Gallon => "GALLON",
            Quart => "QUART",
            Pint => "PINT",
            Cup => "CUP",
            FluidOunce => "FLUID_OUNCE",
            SquareMeter => "SQUARE_METER",
            SquareKilometer => "SQUARE_KILOMETER",
            SquareCentimeter => "SQUARE_CENTIMETER",
            SquareMile => "SQUARE_MILE",
            Acre => "ACRE",
            Hectare => "HECTARE",
            MeterPerSecond => "METER_PER_SECOND",
            KilometerPerHour => "KILOMETER_PER_HOUR",
            MilePerHour => "MILE_PER_HOUR",
            Knot => "KNOT",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        use Unit::*;
        match self {
            Meter => "Meter",
            Kilometer => "Kilometer",
            Centimeter => "Centimeter",
            Millimeter => "Millimeter",
            Mile => "Mile",
            Yard => "Yard",
            Foot => "Foot",
            Inch => "Inch",
            Kilogram => "Kilogram",
            Gram => "Gram",
            Milligram => "Milligram",
            Pound => "Pound",
            Ounce => "Ounce",
            Ton => "Ton",
            Celsius => "Celsius",
            Fahrenheit => "Fahrenheit",
            Kelvin => "Kelvin",
            Liter => "Liter",
            Milliliter => "Milliliter",
            Gallon => "Gallon",
            Quart => "Quart",
            Pint => "Pint",
            Cup => "Cup",
            FluidOunce => "Fluid Ounce",
            SquareMeter => "Square Meter",
            SquareKilometer => "Square Kilometer",
            SquareCentimeter => "Square Centimeter",
            SquareMile => "Square Mile",
            Acre => "Acre",
            Hectare => "Hectare",
            MeterPerSecond => "Meter/Second",
            KilometerPerHour => "Kilometer/Hour",
            MilePerHour => "Mile/Hour",
            Knot => "Knot",
        }
    }

    /// Look up a unit by table key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.key() == key)
    }

    /// Parse from a key, label, or common abbreviation, ignoring case.
    ///
    /// Accepts `"FLUID_OUNCE"`, `"fluid ounce"`, `"fl-oz"` or `"km/h"`.
    pub fn from_str_flexible(s: &str) -> Option<Self> {
        let normalized = s.trim().to_uppercase().replace([' ', '-', '/'], "_");
        let alias = match normalized.as_str() {
            "M" => Some(Unit::Meter),
            "KM" => Some(Unit::Kilometer),
            "CM" => Some(Unit::Centimeter),
            "MM" => Some(Unit::Millimeter),
            "MI" => Some(Unit::Mile),
            "YD" => Some(Unit::Yard),
            "FT" | "FEET" => Some(Unit::Foot),
            "IN" | "INCHES" => Some(Unit::Inch),
            "KG" => Some(Unit::Kilogram),
            "G" => Some(Unit::Gram),
            "MG" => Some(Unit::Milligram),
            "LB" | "LBS" => Some(Unit::Pound),
            "OZ" => Some(Unit::Ounce),
            "C" => Some(Unit::Celsius),
            "F" => Some(Unit::Fahrenheit),
            "K" => Some(Unit::Kelvin),
            "L" => Some(Unit::Liter),
            "ML" => Some(Unit::Milliliter),
            "GAL" => Some(Unit::Gallon),
            "QT" => Some(Unit::Quart),
            "PT" => Some(Unit::Pint),
            "FL_OZ" => Some(Unit::FluidOunce),
            "M2" | "SQ_M" => Some(Unit::SquareMeter),
            "KM2" | "SQ_KM" => Some(Unit::SquareKilometer),
            "CM2" | "SQ_CM" => Some(Unit::SquareCentimeter),
            "MI2" | "SQ_MI" => Some(Unit::SquareMile),
            "HA" => Some(Unit::Hectare),
            "M_S" => Some(Unit::MeterPerSecond),
            "KM_H" | "KPH" => Some(Unit::KilometerPerHour),
            "MPH" => Some(Unit::MilePerHour),
            "KN" | "KT" => Some(Unit::Knot),
            _ => None,
        };
        alias.or_else(|| {
            Self::ALL.into_iter().find(|u| {
                u.key() == normalized || u.label().to_uppercase().replace([' ', '/'], "_") == normalized
            })
        })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
