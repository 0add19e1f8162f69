//! # Configuration
//!
//! Runtime settings, layered with `figment`:
//!
//! 1. built-in defaults
//! 2. a TOML file (`multicalc.toml` in the working directory, or an explicit path)
//! 3. environment variables prefixed `MULTICALC_`, nested with `__`
//!    (e.g. `MULTICALC_RATES__TIMEOUT_SECS=5`)
//!
//! ## Example
//!
//! ```rust
//! use calc_core::config::Settings;
//!
//! let settings = Settings::default();
//! assert_eq!(settings.rates.base_currency, "USD");
//! assert_eq!(settings.rates.timeout_secs, 10);
//! ```

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::errors::{CalcError, CalcResult};

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "multicalc.toml";

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "MULTICALC_";

/// Default exchange-rate endpoint; the base currency code is appended
pub const DEFAULT_RATES_URL: &str = "https://api.exchangerate-api.com/v4/latest/";

/// Exchange-rate fetch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesSettings {
    pub base_url: String,
    pub base_currency: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for RatesSettings {
    fn default() -> Self {
        RatesSettings {
            base_url: DEFAULT_RATES_URL.to_string(),
            base_currency: crate::conversion::DEFAULT_BASE_CURRENCY.to_string(),
            timeout_secs: 10,
            user_agent: format!("Multicalc/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RatesSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Full request URL: `{base_url}{base_currency}`
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.base_currency)
    }
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rates: RatesSettings,
    /// Default tracing filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            rates: RatesSettings::default(),
            log_level: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from defaults, a TOML file and the environment.
    ///
    /// With `path = None` the default file is read only if it exists; an
    /// explicit path must exist.
    pub fn load(path: Option<&Path>) -> CalcResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CalcError::config(format!("config file not found: {}", path.display())));
                }
                figment = figment.merge(Toml::file(path));
            }
            None => figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| CalcError::config(e.to_string()))
    }
}
