// In crates/api-client/src/lib.rs

use app_config::MarketDataSettings;
use async_trait::async_trait;
use core_types::{MarketData, PriceSeries};

pub mod error;
pub mod parse;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use parse::{parse_fx_daily, parse_market_chart, parse_pair};
pub use types::*;

/// How many days of history the crypto provider is asked for.
pub const CRYPTO_HISTORY_DAYS: u32 = 90;

/// A source of daily price series.
///
/// Both operations are total: every failure is reported as
/// `MarketData::NoData`, never as an error or a panic.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches the daily series for a `BASE/QUOTE` forex pair.
    async fn fetch_forex_series(&self, pair: &str) -> MarketData;

    /// Fetches roughly three months of USD prices for a crypto asset.
    async fn fetch_crypto_series(&self, coin_id: &str) -> MarketData;
}

impl MarketDataClient {
    /// Constructs a new MarketDataClient from MarketDataSettings.
    pub fn new(settings: &MarketDataSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|e| Error::ClientBuildError(e.to_string()))?;

        Ok(MarketDataClient {
            http_client,
            api_key: settings.api_key.clone(),
            forex_base_url: settings.forex_base_url.trim_end_matches('/').to_string(),
            crypto_base_url: settings.crypto_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches and parses the full daily history of a forex pair.
    ///
    /// This corresponds to the `FX_DAILY` function with `outputsize=full`.
    pub async fn get_forex_series(&self, pair: &str) -> Result<PriceSeries> {
        let (from_symbol, to_symbol) = parse_pair(pair)?;

        let request = self.http_client.get(&self.forex_base_url).query(&[
            ("function", "FX_DAILY"),
            ("from_symbol", from_symbol),
            ("to_symbol", to_symbol),
            ("apikey", self.api_key.as_str()),
            ("outputsize", "full"),
        ]);

        let body = send(request).await?;
        parse_fx_daily(&body)
    }

    /// Fetches and parses the USD price history of a crypto asset.
    ///
    /// This corresponds to the `GET /coins/{id}/market_chart` endpoint.
    pub async fn get_crypto_series(&self, coin_id: &str) -> Result<PriceSeries> {
        let coin_id = coin_id.trim();
        if coin_id.is_empty() {
            return Err(Error::InvalidCoinId(coin_id.to_string()));
        }

        let url = format!(
            "{}/coins/{}/market_chart",
            self.crypto_base_url,
            urlencoding::encode(coin_id)
        );
        let days = CRYPTO_HISTORY_DAYS.to_string();
        let request = self
            .http_client
            .get(&url)
            .query(&[("vs_currency", "usd"), ("days", days.as_str())]);

        let body = send(request).await?;
        parse_market_chart(&body)
    }
}

/// Sends a request and returns the body of a successful response.
async fn send(request: reqwest::RequestBuilder) -> Result<String> {
    // Strip the URL from transport errors: it carries the API key.
    let response = request.send().await.map_err(|e| Error::RequestFailed(e.without_url()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::HttpStatus(status.as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| Error::RequestFailed(e.without_url()))
}

/// Collapses a fetch result into the outcome handed to the analysis layer.
fn into_market_data(result: Result<PriceSeries>, market: &'static str, instrument: &str) -> MarketData {
    match result {
        Ok(series) => {
            tracing::info!(market, instrument, points = series.len(), "Fetched price series.");
            MarketData::Series(series)
        }
        Err(e) => {
            tracing::warn!(market, instrument, error = %e, "Market data unavailable.");
            MarketData::NoData
        }
    }
}

#[async_trait]
impl MarketDataSource for MarketDataClient {
    async fn fetch_forex_series(&self, pair: &str) -> MarketData {
        into_market_data(self.get_forex_series(pair).await, "forex", pair)
    }

    async fn fetch_crypto_series(&self, coin_id: &str) -> MarketData {
        into_market_data(self.get_crypto_series(coin_id).await, "crypto", coin_id)
    }
}

// Free function to allow api_client::new usage
pub fn new(settings: &MarketDataSettings) -> Result<MarketDataClient> {
    MarketDataClient::new(settings)
}
