// In crates/api-client/src/types.rs

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// The client for the forex and crypto market data providers.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    /// The persistent HTTP client.
    pub http_client: Client,
    /// The API key sent to the forex provider.
    pub api_key: String,
    /// The query endpoint of the forex provider.
    pub forex_base_url: String,
    /// The REST API base URL of the crypto provider.
    pub crypto_base_url: String,
}

/// Key of the daily series in an `FX_DAILY` response.
pub const FX_DAILY_SERIES_KEY: &str = "Time Series FX (Daily)";

/// Key of the price array in a `market_chart` response.
pub const MARKET_CHART_PRICES_KEY: &str = "prices";

/// The forex provider's response. Besides the series it may carry
/// "Error Message", "Note" or "Information" strings, so we keep the raw map.
#[derive(Debug, Deserialize)]
pub struct FxDailyResponse {
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

/// One day in the forex series. Prices arrive as strings.
#[derive(Debug, Deserialize, Clone)]
pub struct FxDailyBar {
    #[serde(rename = "1. open")]
    pub open: String,
    #[serde(rename = "2. high")]
    pub high: String,
    #[serde(rename = "3. low")]
    pub low: String,
    #[serde(rename = "4. close")]
    pub close: String,
}

/// Daily bars keyed by ISO date.
pub type FxDailySeries = BTreeMap<String, FxDailyBar>;

/// The crypto provider's `market_chart` response.
#[derive(Debug, Deserialize)]
pub struct MarketChartResponse {
    /// `[epoch_ms, price]` pairs.
    pub prices: Option<Vec<(f64, f64)>>,
    /// Set instead of `prices` when the provider rejects the request.
    pub error: Option<Value>,
}
