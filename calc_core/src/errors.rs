//! # Error Types
//!
//! Structured error types for calc_core. Every failure path in the engine
//! returns one of these instead of panicking, so a screen can always show
//! either a number or a diagnostic string.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::errors::{CalcError, CalcResult};
//!
//! fn validate_weight(weight_kg: f64) -> CalcResult<()> {
//!     if weight_kg <= 0.0 {
//!         return Err(CalcError::incomplete_input(
//!             "weight_kg",
//!             "Weight must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for calc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Text does not parse to a finite number, or names something unknown
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Input parses but is not yet usable (empty, zero, negative where positive is required)
    #[error("Incomplete input for '{field}': {reason}")]
    IncompleteInput { field: String, reason: String },

    /// Input violates a mathematical precondition
    #[error("Invalid domain for {operation}: {reason}")]
    InvalidDomain { operation: String, reason: String },

    /// Birth date lies after the reference date
    #[error("Birth date {birth_date} is after {today}")]
    FutureDate { birth_date: String, today: String },

    /// Currency rate missing from the table (or the table is not loaded)
    #[error("Exchange rate unavailable for {currency}")]
    RatesUnavailable { currency: String },

    /// Exchange-rate fetch failed
    #[error("Network error: {reason}")]
    Network { reason: String },

    /// Configuration or static data could not be loaded
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an IncompleteInput error
    pub fn incomplete_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::IncompleteInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidDomain error
    pub fn invalid_domain(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidDomain {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Create a FutureDate error
    pub fn future_date(birth_date: impl ToString, today: impl ToString) -> Self {
        CalcError::FutureDate {
            birth_date: birth_date.to_string(),
            today: today.to_string(),
        }
    }

    /// Create a RatesUnavailable error
    pub fn rates_unavailable(currency: impl Into<String>) -> Self {
        CalcError::RatesUnavailable {
            currency: currency.into(),
        }
    }

    /// Create a Network error
    pub fn network(reason: impl Into<String>) -> Self {
        CalcError::Network {
            reason: reason.into(),
        }
    }

    /// Create a Config error
    pub fn config(reason: impl Into<String>) -> Self {
        CalcError::Config {
            reason: reason.into(),
        }
    }

    /// Check if this is a recoverable error (the user can retry without editing input)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CalcError::Network { .. } | CalcError::RatesUnavailable { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::IncompleteInput { .. } => "INCOMPLETE_INPUT",
            CalcError::InvalidDomain { .. } => "INVALID_DOMAIN",
            CalcError::FutureDate { .. } => "FUTURE_DATE",
            CalcError::RatesUnavailable { .. } => "RATES_UNAVAILABLE",
            CalcError::Network { .. } => "ERROR_FETCHING",
            CalcError::Config { .. } => "CONFIG_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Diagnostic string a screen shows in place of a numeric result.
    ///
    /// Domain errors carry their own reason ("Factorial is not defined for
    /// negative numbers"); the rest use fixed messages.
    pub fn user_message(&self) -> String {
        match self {
            CalcError::InvalidInput { .. } => "Please enter a valid number.".to_string(),
            CalcError::IncompleteInput { reason, .. } => reason.clone(),
            CalcError::InvalidDomain { reason, .. } => reason.clone(),
            CalcError::FutureDate { .. } => "Birth date cannot be in the future.".to_string(),
            CalcError::RatesUnavailable { .. } => "Loading exchange rates...".to_string(),
            CalcError::Network { .. } => "Error fetching exchange rates".to_string(),
            CalcError::Config { .. } | CalcError::Internal { .. } => "An error occurred".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_input("weight_kg", "abc", "Not a number");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::incomplete_input("tenure", "x").error_code(), "INCOMPLETE_INPUT");
        assert_eq!(CalcError::invalid_domain("factorial", "x").error_code(), "INVALID_DOMAIN");
        assert_eq!(CalcError::network("timeout").error_code(), "ERROR_FETCHING");
    }

    #[test]
    fn test_recoverable() {
        assert!(CalcError::network("timeout").is_recoverable());
        assert!(CalcError::rates_unavailable("INR").is_recoverable());
        assert!(!CalcError::future_date("2030-01-01", "2024-01-01").is_recoverable());
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            CalcError::future_date("2030-01-01", "2024-01-01").user_message(),
            "Birth date cannot be in the future."
        );
        assert_eq!(
            CalcError::network("boom").user_message(),
            "Error fetching exchange rates"
        );
        assert_eq!(
            CalcError::invalid_domain("sqrt", "Cannot calculate square root of negative number").user_message(),
            "Cannot calculate square root of negative number"
        );
    }
}
