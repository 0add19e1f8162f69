//! Two-sided conversion form shared by the unit and currency screens.

use serde::{Deserialize, Serialize};

/// Input text, output text and the selected pair of units.
///
/// `U` is a [`Unit`](super::Unit) on the unit screen and a
/// [`CurrencyCode`](super::CurrencyCode) on the currency screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionPanel<U> {
    pub input: String,
    pub output: String,
    pub from: U,
    pub to: U,
}

impl<U: Clone> ConversionPanel<U> {
    pub fn new(from: U, to: U) -> Self {
        ConversionPanel {
            input: String::new(),
            output: String::new(),
            from,
            to,
        }
    }

    /// Exchange input with output and `from` with `to`.
    ///
    /// Swapping twice restores the original panel.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
        std::mem::swap(&mut self.input, &mut self.output);
    }

    /// Clear both text fields, keeping the selected units.
    pub fn clear(&mut self) {
        self.input.clear();
        self.output.clear();
    }

    /// Select a new pair (e.g. after a category change) and clear the fields.
    pub fn reset_units(&mut self, from: U, to: U) {
        self.from = from;
        self.to = to;
        self.clear();
    }

    /// Store a computed value in the output field.
    pub fn set_output(&mut self, text: impl Into<String>) {
        self.output = text.into();
    }
}
