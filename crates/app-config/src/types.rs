// In crates/app-config/src/types.rs

use serde::Deserialize;
use std::time::Duration;
use strategies::TrendMomentumSettings;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    pub server: ServerSettings,
    /// Settings for the forex and crypto data providers.
    pub market_data: MarketDataSettings,
    /// Indicator windows and thresholds. Defaults apply when the table is absent.
    #[serde(default)]
    pub strategy: TrendMomentumSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MarketDataSettings {
    /// The API key for the forex provider.
    pub api_key: String,
    /// The query endpoint of the forex provider.
    pub forex_base_url: String,
    /// The REST API base URL of the crypto provider.
    pub crypto_base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl MarketDataSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Helper functions for serde defaults
fn default_log_level() -> String { "info".into() }
fn default_request_timeout_secs() -> u64 { 30 }
