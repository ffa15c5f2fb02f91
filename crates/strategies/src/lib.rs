// In crates/strategies/src/lib.rs

use core_types::{MarketData, PriceSeries, Rationale, Signal};
use serde::Serialize;

pub mod error;
pub mod indicators;
pub mod trend_momentum;
pub mod types;

pub use error::{Error, Result};
pub use indicators::IndicatorSnapshot;
pub use trend_momentum::TrendMomentum;
pub use types::TrendMomentumSettings;

/// The universal interface for a signal strategy.
///
/// A strategy looks at a complete price series and reduces it to a single
/// `Assessment`. Strategies hold only their settings, so assessing is a pure
/// function of the series.
pub trait Strategy {
    /// The name of the strategy.
    fn name(&self) -> &'static str;

    fn assess(&self, series: &PriceSeries) -> Assessment;

    /// Assesses the outcome of a fetch, treating a missing series as no data.
    fn evaluate(&self, data: &MarketData) -> Assessment {
        match data.series() {
            Some(series) => self.assess(series),
            None => Assessment::no_data(),
        }
    }
}

/// Which indicator cast a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    MovingAverageCrossover,
    Rsi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Vote {
    pub indicator: Indicator,
    pub signal: Signal,
}

/// The result of analyzing one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub signal: Signal,
    pub rationale: Rationale,
    pub votes: Vec<Vote>,
    /// Indicator values on the most recent row; absent when there was not
    /// enough data to compute them.
    pub indicators: Option<IndicatorSnapshot>,
}

impl Assessment {
    pub fn no_data() -> Self {
        Self {
            signal: Signal::NoData,
            rationale: Rationale::NotEnoughData,
            votes: Vec::new(),
            indicators: None,
        }
    }
}

/// Analyzes a fetch outcome with the default SMA20/SMA50/RSI14 rule.
pub fn analyze(data: &MarketData) -> Assessment {
    TrendMomentum::default().evaluate(data)
}
