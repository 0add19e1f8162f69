//! # Exchange Rates
//!
//! Fetching and holding the currency rate table.
//!
//! - [`RateSource`] - anything that can produce an [`ExchangeRateTable`]
//! - [`HttpRateSource`] - `GET {base_url}{base_currency}` returning `{"rates": {...}}`
//! - [`StaticRateSource`] - fixed table, for offline use and tests
//! - [`RateBook`] - per-screen state (`Idle`, `Loading`, `Ready`, `Failed`)
//!
//! Only one fetch runs at a time per book: [`RateBook::refresh`] takes
//! `&mut self`, and a retry simply calls it again, replacing the previous
//! state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::config::RatesSettings;
use crate::conversion::{convert_currency, CurrencyCode, ExchangeRateTable};
use crate::errors::{CalcError, CalcResult};

/// Produces a rate table.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Fetch rates relative to `base`.
    async fn fetch(&self, base: &CurrencyCode) -> CalcResult<ExchangeRateTable>;
}

/// Response body of the rate endpoint; everything but `rates` is ignored.
#[derive(Debug, Deserialize)]
struct LatestRates {
    rates: HashMap<String, f64>,
}

/// Rate source backed by an HTTP JSON endpoint.
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRateSource {
    pub fn new(settings: &RatesSettings) -> CalcResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .timeout(settings.timeout())
            .build()
            .map_err(|e| CalcError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(HttpRateSource {
            client,
            base_url: settings.base_url.clone(),
        })
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch(&self, base: &CurrencyCode) -> CalcResult<ExchangeRateTable> {
        let url = format!("{}{}", self.base_url, base);

        let response = self.client.get(&url).send().await.map_err(|e| {
            let reason = if e.is_timeout() {
                "Request timed out".to_string()
            } else {
                format!("Request failed: {e}")
            };
            warn!(%url, %reason, "exchange rate fetch failed");
            CalcError::network(reason)
        })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(%url, %status, "exchange rate endpoint returned an error");
            return Err(CalcError::network(format!("Rate service returned {status}")));
        }

        let body: LatestRates = response.json().await.map_err(|e| {
            warn!(%url, error = %e, "exchange rate payload malformed");
            CalcError::network(format!("Failed to parse response: {e}"))
        })?;

        let table = ExchangeRateTable::new(base.clone(), body.rates);
        info!(base = %base, currencies = table.rates.len(), "exchange rates loaded");
        Ok(table)
    }
}

/// Rate source that always returns the same table.
#[derive(Debug, Clone)]
pub struct StaticRateSource {
    table: ExchangeRateTable,
}

impl StaticRateSource {
    pub fn new(table: ExchangeRateTable) -> Self {
        StaticRateSource { table }
    }
}

#[async_trait]
impl RateSource for StaticRateSource {
    async fn fetch(&self, _base: &CurrencyCode) -> CalcResult<ExchangeRateTable> {
        Ok(self.table.clone())
    }
}

/// Load state of a [`RateBook`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "data")]
pub enum RateStatus {
    Idle,
    Loading,
    Ready(ExchangeRateTable),
    /// Last fetch failed; holds the error to show beside a retry action
    Failed(CalcError),
}

/// Rate table holder for the currency screen.
#[derive(Debug, Clone, PartialEq)]
pub struct RateBook {
    base: CurrencyCode,
    status: RateStatus,
}

impl RateBook {
    pub fn new(base: CurrencyCode) -> Self {
        RateBook {
            base,
            status: RateStatus::Idle,
        }
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn status(&self) -> &RateStatus {
        &self.status
    }

    /// Loaded table, if any.
    pub fn table(&self) -> Option<&ExchangeRateTable> {
        match &self.status {
            RateStatus::Ready(table) => Some(table),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, RateStatus::Loading)
    }

    /// Fetch a fresh table, replacing whatever state the book was in.
    ///
    /// Also serves as the retry action after a failure.
    pub async fn refresh(&mut self, source: &dyn RateSource) -> CalcResult<&ExchangeRateTable> {
        self.status = RateStatus::Loading;
        let fetched = source.fetch(&self.base).await;
        match fetched {
            Ok(table) => {
                self.status = RateStatus::Ready(table);
                self.table().ok_or_else(|| CalcError::Internal {
                    message: "rate table missing after load".to_string(),
                })
            }
            Err(e) => {
                self.status = RateStatus::Failed(e.clone());
                Err(e)
            }
        }
    }

    /// Convert `amount`; fails with `RatesUnavailable` unless rates are loaded.
    pub fn convert(&self, amount: f64, from: &CurrencyCode, to: &CurrencyCode) -> CalcResult<f64> {
        let table = self
            .table()
            .ok_or_else(|| CalcError::rates_unavailable(from.as_str()))?;
        convert_currency(table, amount, from, to)
    }

    /// Displayed "1 FROM = x TO" rate.
    pub fn exchange_rate(&self, from: &CurrencyCode, to: &CurrencyCode) -> CalcResult<f64> {
        self.table()
            .ok_or_else(|| CalcError::rates_unavailable(from.as_str()))?
            .exchange_rate(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn settings_for(server: &MockServer) -> RatesSettings {
        RatesSettings {
            base_url: format!("{}/v4/latest/", server.uri()),
            timeout_secs: 1,
            ..RatesSettings::default()
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RateSource for FailingSource {
        async fn fetch(&self, _base: &CurrencyCode) -> CalcResult<ExchangeRateTable> {
            Err(CalcError::network("offline"))
        }
    }

    #[tokio::test]
    async fn test_http_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/latest/USD"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "base": "USD",
                "date": "2024-06-15",
                "rates": {"USD": 1.0, "INR": 83.0, "EUR": 0.92}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let source = HttpRateSource::new(&settings_for(&server)).unwrap();
        let table = source.fetch(&code("USD")).await.unwrap();
        assert_eq!(table.rates.len(), 3);
        assert_eq!(table.rates[&code("INR")], 83.0);
    }

    #[tokio::test]
    async fn test_http_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let source = HttpRateSource::new(&settings_for(&server)).unwrap();
        let err = source.fetch(&code("USD")).await.unwrap_err();
        assert_eq!(err.error_code(), "ERROR_FETCHING");
        assert_eq!(err.user_message(), "Error fetching exchange rates");
    }

    #[tokio::test]
    async fn test_http_malformed_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let source = HttpRateSource::new(&settings_for(&server)).unwrap();
        assert!(matches!(
            source.fetch(&code("USD")).await,
            Err(CalcError::Network { .. })
        ));
    }

    #[tokio::test]
    async fn test_http_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"rates": {"USD": 1.0}}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let source = HttpRateSource::new(&settings_for(&server)).unwrap();
        let err = source.fetch(&code("USD")).await.unwrap_err();
        assert_eq!(err, CalcError::network("Request timed out"));
    }

    #[tokio::test]
    async fn test_rate_book_lifecycle() {
        let mut book = RateBook::new(code("USD"));
        assert_eq!(book.status(), &RateStatus::Idle);
        assert!(book.convert(100.0, &code("USD"), &code("INR")).is_err());

        assert!(book.refresh(&FailingSource).await.is_err());
        assert!(matches!(book.status(), RateStatus::Failed(e) if e.is_recoverable()));

        let table = ExchangeRateTable::new(code("USD"), [("USD", 1.0), ("INR", 83.0)]);
        book.refresh(&StaticRateSource::new(table)).await.unwrap();
        assert_eq!(book.convert(100.0, &code("USD"), &code("INR")).unwrap(), 8300.0);
        assert_eq!(book.exchange_rate(&code("INR"), &code("USD")).unwrap(), 1.0 / 83.0);
    }

    #[tokio::test]
    async fn test_failed_refresh_drops_previous_table() {
        let mut book = RateBook::new(code("USD"));
        let table = ExchangeRateTable::new(code("USD"), [("USD", 1.0)]);
        book.refresh(&StaticRateSource::new(table)).await.unwrap();
        assert!(book.table().is_some());

        let _ = book.refresh(&FailingSource).await;
        assert!(book.table().is_none());
        assert!(!book.is_loading());
    }
}
