// In crates/web-server/src/types.rs

use core_types::{Rationale, Signal};
use serde::{Deserialize, Serialize};
use strategies::{Assessment, IndicatorSnapshot, Vote};

pub const DEFAULT_FOREX_PAIR: &str = "EUR/USD";
pub const DEFAULT_COIN_ID: &str = "bitcoin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Forex,
    Crypto,
}

/// Query parameters of the forex routes (e.g. `?pair=EUR/USD`).
#[derive(Debug, Deserialize)]
pub struct ForexParams {
    pub pair: Option<String>,
}

impl ForexParams {
    pub fn pair(self) -> String {
        self.pair.unwrap_or_else(|| DEFAULT_FOREX_PAIR.to_string())
    }
}

/// Query parameters of the crypto routes (e.g. `?coin=bitcoin`).
#[derive(Debug, Deserialize)]
pub struct CryptoParams {
    pub coin: Option<String>,
}

impl CryptoParams {
    pub fn coin(self) -> String {
        self.coin.unwrap_or_else(|| DEFAULT_COIN_ID.to_string())
    }
}

/// The JSON body returned by the `/api` routes.
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub market: Market,
    pub instrument: String,
    pub signal: Signal,
    /// The label shown in the UI, e.g. "No Data".
    pub label: &'static str,
    pub rationale: Rationale,
    pub votes: Vec<Vote>,
    pub indicators: Option<IndicatorSnapshot>,
}

impl AnalysisResponse {
    pub fn new(market: Market, instrument: String, assessment: Assessment) -> Self {
        Self {
            market,
            instrument,
            signal: assessment.signal,
            label: assessment.signal.label(),
            rationale: assessment.rationale,
            votes: assessment.votes,
            indicators: assessment.indicators,
        }
    }
}
