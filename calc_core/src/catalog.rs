//! Calculator catalog shown on the home menu.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One calculator screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalculatorKind {
    Simple,
    Scientific,
    Bmi,
    Emi,
    Age,
    Gst,
    Discount,
    Currency,
    UnitConverter,
    MathUtils,
}

impl CalculatorKind {
    /// Menu order
    pub const ALL: [CalculatorKind; 10] = [
        CalculatorKind::Simple,
        CalculatorKind::Scientific,
        CalculatorKind::Bmi,
        CalculatorKind::Emi,
        CalculatorKind::Age,
        CalculatorKind::Gst,
        CalculatorKind::Discount,
        CalculatorKind::Currency,
        CalculatorKind::UnitConverter,
        CalculatorKind::MathUtils,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CalculatorKind::Simple => "Simple Calculator",
            CalculatorKind::Scientific => "Scientific Calculator",
            CalculatorKind::Bmi => "BMI Calculator",
            CalculatorKind::Emi => "EMI Calculator",
            CalculatorKind::Age => "Age Calculator",
            CalculatorKind::Gst => "GST Calculator",
            CalculatorKind::Discount => "Discount Calculator",
            CalculatorKind::Currency => "Currency Converter",
            CalculatorKind::UnitConverter => "Unit Converter",
            CalculatorKind::MathUtils => "Math Utilities",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CalculatorKind::Simple => "Basic arithmetic operations",
            CalculatorKind::Scientific => "Advanced mathematical functions",
            CalculatorKind::Bmi => "Body Mass Index calculator",
            CalculatorKind::Emi => "Loan installment calculator",
            CalculatorKind::Age => "Calculate age from birth date",
            CalculatorKind::Gst => "Goods and Services Tax calculator",
            CalculatorKind::Discount => "Calculate discounts and savings",
            CalculatorKind::Currency => "Real-time exchange rates",
            CalculatorKind::UnitConverter => "Convert between different units",
            CalculatorKind::MathUtils => "Advanced mathematical calculations",
        }
    }

    /// Navigation route name
    pub fn route(&self) -> &'static str {
        match self {
            CalculatorKind::Simple => "SimpleCalculator",
            CalculatorKind::Scientific => "ScientificCalculator",
            CalculatorKind::Bmi => "BMI",
            CalculatorKind::Emi => "EMI",
            CalculatorKind::Age => "Age",
            CalculatorKind::Gst => "GST",
            CalculatorKind::Discount => "Discount",
            CalculatorKind::Currency => "CurrencyConverter",
            CalculatorKind::UnitConverter => "UnitConverter",
            CalculatorKind::MathUtils => "MathUtils",
        }
    }

    /// Whether the screen needs fetched exchange rates
    pub fn needs_network(&self) -> bool {
        matches!(self, CalculatorKind::Currency)
    }

    pub fn from_route(route: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.route().eq_ignore_ascii_case(route.trim()))
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
