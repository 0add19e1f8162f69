//! Key-press reducer for the simple and scientific calculator screens.
//!
//! The screen owns one [`CalculatorState`] and feeds every button press
//! through [`reduce`] (or [`CalculatorState::press`]). No calculation state
//! lives anywhere else.
//!
//! ```rust
//! use calc_core::arithmetic::{CalculatorState, Key, Operator};
//!
//! let mut state = CalculatorState::default();
//! for key in Key::parse_sequence("2 + 3 × 4 =").unwrap() {
//!     state.press(key);
//! }
//! assert_eq!(state.display, "20");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{apply_operator, Constant, Operator, ScientificFunction};
use crate::errors::{CalcError, CalcResult};
use crate::number::format_number;

/// Text shown after a failed unary function or a non-finite result
pub const ERROR_DISPLAY: &str = "Error";

/// Per-screen calculator state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Text currently on the display
    pub display: String,
    /// Left-hand value waiting for the next operand
    pub pending_operand: Option<f64>,
    /// Operator to apply once the next operand is complete
    pub pending_operator: Option<Operator>,
    /// Next digit replaces the display instead of appending to it
    pub awaiting_operand: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        CalculatorState {
            display: "0".to_string(),
            pending_operand: None,
            pending_operator: None,
            awaiting_operand: false,
        }
    }
}

/// A single button press.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Key {
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    Clear,
    /// Divide the displayed value by 100
    Percent,
    /// Negate the displayed value
    ToggleSign,
    Function(ScientificFunction),
    Constant(Constant),
}

impl Key {
    /// Parse a whitespace-separated key sequence such as `"12.5 × 2 ="`.
    ///
    /// Number tokens expand into digit and decimal keys; everything else
    /// must name a single key (`AC`, `%`, `+/-`, `sin`, `π`, ...).
    pub fn parse_sequence(input: &str) -> CalcResult<Vec<Key>> {
        let mut keys = Vec::new();
        for token in input.split_whitespace() {
            if token.chars().all(|c| c.is_ascii_digit() || c == '.') {
                for c in token.chars() {
                    match c.to_digit(10) {
                        Some(d) => keys.push(Key::Digit(d as u8)),
                        None => keys.push(Key::Decimal),
                    }
                }
                continue;
            }

            let key = match token {
                "=" => Key::Equals,
                "C" | "AC" | "c" | "ac" => Key::Clear,
                "%" => Key::Percent,
                "+/-" | "±" | "neg" => Key::ToggleSign,
                "π" | "pi" => Key::Constant(Constant::Pi),
                "e" => Key::Constant(Constant::E),
                other => {
                    if let Some(op) = Operator::from_symbol(other) {
                        Key::Operator(op)
                    } else if let Some(f) = ScientificFunction::from_name(other) {
                        Key::Function(f)
                    } else {
                        return Err(CalcError::invalid_input("keys", other, "Unknown calculator key"));
                    }
                }
            };
            keys.push(key);
        }
        Ok(keys)
    }
}

impl CalculatorState {
    /// Numeric value of the display (`0` while showing an error)
    pub fn current_value(&self) -> f64 {
        self.display.parse().unwrap_or(0.0)
    }

    /// Whether the display currently shows an error
    pub fn is_error(&self) -> bool {
        self.display == ERROR_DISPLAY
    }

    /// Apply one key press in place.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Digit(d) => self.input_digit(d),
            Key::Decimal => self.input_decimal(),
            Key::Operator(op) => self.input_operator(op),
            Key::Equals => self.input_equals(),
            Key::Clear => *self = CalculatorState::default(),
            Key::Percent => {
                let value = self.current_value() / 100.0;
                self.display = format_number(value);
            }
            Key::ToggleSign => {
                let value = self.current_value() * -1.0;
                self.display = format_number(value);
            }
            Key::Function(f) => match f.apply(self.current_value()) {
                Ok(value) => {
                    self.display = format_number(value);
                    self.awaiting_operand = true;
                }
                Err(e) => {
                    debug!(function = f.name(), error = %e, "scientific function rejected");
                    self.show_error();
                }
            },
            Key::Constant(c) => {
                self.display = format_number(c.value());
                self.awaiting_operand = true;
            }
        }
    }

    fn input_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        let digit = char::from(b'0' + digit);
        if self.awaiting_operand || self.is_error() {
            self.display = digit.to_string();
            self.awaiting_operand = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push(digit);
        }
    }

    fn input_decimal(&mut self) {
        if self.awaiting_operand || self.is_error() {
            self.display = "0.".to_string();
            self.awaiting_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    fn input_operator(&mut self, op: Operator) {
        let operand = self.current_value();

        match (self.pending_operand, self.pending_operator) {
            (Some(accumulator), Some(pending)) => {
                let value = apply_operator(accumulator, operand, pending);
                if !self.show_value(value) {
                    return;
                }
                self.pending_operand = Some(value);
            }
            _ => self.pending_operand = Some(operand),
        }

        self.awaiting_operand = true;
        self.pending_operator = Some(op);
    }

    fn input_equals(&mut self) {
        if let (Some(accumulator), Some(op)) = (self.pending_operand, self.pending_operator) {
            let value = apply_operator(accumulator, self.current_value(), op);
            self.pending_operand = None;
            self.pending_operator = None;
            self.awaiting_operand = true;
            self.show_value(value);
        }
    }

    /// Show a folded result; non-finite values (e.g. `(-8)^0.5`) become an error.
    fn show_value(&mut self, value: f64) -> bool {
        if value.is_finite() {
            self.display = format_number(value);
            true
        } else {
            self.show_error();
            false
        }
    }

    fn show_error(&mut self) {
        self.display = ERROR_DISPLAY.to_string();
        self.pending_operand = None;
        self.pending_operator = None;
        self.awaiting_operand = true;
    }
}

/// Pure reducer form of [`CalculatorState::press`].
pub fn reduce(state: &CalculatorState, key: Key) -> CalculatorState {
    let mut next = state.clone();
    next.press(key);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(sequence: &str) -> CalculatorState {
        Key::parse_sequence(sequence)
            .unwrap()
            .into_iter()
            .fold(CalculatorState::default(), |state, key| reduce(&state, key))
    }

    #[test]
    fn test_digits_and_decimal() {
        assert_eq!(run("0 0 7").display, "7");
        assert_eq!(run("12.5").display, "12.5");
        assert_eq!(run("1 . . 5").display, "1.5");
        assert_eq!(run(". 5").display, "0.5");
    }

    #[test]
    fn test_no_operator_precedence() {
        assert_eq!(run("2 + 3 × 4 =").display, "20");
        assert_eq!(run("10 - 4 / 3 =").display, "2");
    }

    #[test]
    fn test_chaining_shows_intermediate() {
        let state = run("2 + 3 ×");
        assert_eq!(state.display, "5");
        assert_eq!(state.pending_operand, Some(5.0));
        assert_eq!(state.pending_operator, Some(Operator::Mul));
        assert!(state.awaiting_operand);
    }

    #[test]
    fn test_division_by_zero_shows_zero() {
        assert_eq!(run("9 ÷ 0 =").display, "0");
    }

    #[test]
    fn test_equals_without_pending_is_noop() {
        let state = run("42 =");
        assert_eq!(state.display, "42");
        assert_eq!(state.pending_operand, None);
    }

    #[test]
    fn test_new_number_after_equals() {
        assert_eq!(run("2 + 2 = 7").display, "7");
        assert_eq!(run("2 + 2 = × 3 =").display, "12");
    }

    #[test]
    fn test_percent_and_sign() {
        assert_eq!(run("50 %").display, "0.5");
        assert_eq!(run("8 +/-").display, "-8");
        assert_eq!(run("0 +/-").display, "0");
        // Only the current operand changes; history is untouched
        let state = run("100 + 50 %");
        assert_eq!(state.display, "0.5");
        assert_eq!(state.pending_operand, Some(100.0));
        assert_eq!(run("100 + 50 % =").display, "100.5");
    }

    #[test]
    fn test_power_is_deferred() {
        assert_eq!(run("2 ^ 8 =").display, "256");
        assert_eq!(run("2 ^ 3 + 1 =").display, "9");
    }

    #[test]
    fn test_scientific_functions_replace_display() {
        assert_eq!(run("16 sqrt").display, "4");
        assert_eq!(run("100 log").display, "2");
        let state = run("30 sin");
        assert!((state.current_value() - 0.5).abs() < 1e-12);
        assert!(state.awaiting_operand);
    }

    #[test]
    fn test_domain_error_resets() {
        let state = run("5 + 4 +/- sqrt");
        assert!(state.is_error());
        assert_eq!(state.pending_operator, None);
        assert_eq!(reduce(&state, Key::Digit(3)).display, "3");
    }

    #[test]
    fn test_non_finite_power_is_error() {
        assert!(run("8 +/- ^ 0.5 =").is_error());
    }

    #[test]
    fn test_constants() {
        let state = run("2 × π =");
        assert!((state.current_value() - 2.0 * std::f64::consts::PI).abs() < 1e-12);
        let state = run("e 5");
        assert_eq!(state.display, "5");
    }

    #[test]
    fn test_clear() {
        assert_eq!(run("9 + 9 AC"), CalculatorState::default());
    }

    #[test]
    fn test_unknown_key() {
        assert!(Key::parse_sequence("2 $ 3").is_err());
    }
}
