//! # calc_core - Multi-Calculator Engine
//!
//! `calc_core` is the computational heart of Multicalc: the arithmetic,
//! financial, biometric, date, conversion and number-theory logic behind
//! a family of calculator screens, free of any UI framework. All inputs
//! and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, never a panic on user input
//! - **Explicit State**: Screen state (keypad, rate table) is a value passed in
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::arithmetic::evaluate_expression;
//! use calc_core::calculations::emi::{calculate, EmiInput, TenureUnit};
//!
//! let value = evaluate_expression("2sin(30) + 8(9+6)").unwrap();
//! assert!((value - 121.0).abs() < 1e-9);
//!
//! let loan = EmiInput {
//!     principal: 100_000.0,
//!     annual_rate_percent: 10.0,
//!     tenure: 12.0,
//!     tenure_unit: TenureUnit::Months,
//! };
//! assert_eq!(calculate(&loan).unwrap().monthly_payment, 8792.0);
//! ```
//!
//! ## Modules
//!
//! - [`number`] - Text-field parsing, rounding and display formatting
//! - [`arithmetic`] - Keypad reducer, scientific functions, expression mode
//! - [`calculations`] - EMI, GST, discount, BMI and age calculators
//! - [`conversion`] - Unit and currency conversion
//! - [`rates`] - Exchange-rate fetching and the per-screen rate book
//! - [`number_theory`] - Factorial, primes, GCD/LCM, bitwise ops, base conversion
//! - [`catalog`] - Calculator menu entries
//! - [`config`] - Layered runtime settings
//! - [`units`] - Type-safe body-measure wrappers
//! - [`errors`] - Structured error types

pub mod arithmetic;
pub mod calculations;
pub mod catalog;
pub mod config;
pub mod conversion;
pub mod errors;
pub mod number;
pub mod number_theory;
pub mod rates;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{run, CalculationOutcome, CalculationRequest};
pub use catalog::CalculatorKind;
pub use config::Settings;
pub use errors::{CalcError, CalcResult};
pub use rates::{HttpRateSource, RateBook, RateSource, RateStatus};
