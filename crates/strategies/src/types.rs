// In crates/strategies/src/types.rs

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TrendMomentumSettings {
    // Moving-average crossover windows
    pub fast_period: usize,
    pub slow_period: usize,

    // RSI window and its vote thresholds
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,

    // How many agreeing votes it takes to leave HOLD
    pub required_votes: usize,
}

impl Default for TrendMomentumSettings {
    fn default() -> Self {
        Self {
            fast_period: 20,
            slow_period: 50,
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            required_votes: 2,
        }
    }
}

impl TrendMomentumSettings {
    /// The shortest series the strategy will analyze.
    ///
    /// Every indicator has to be defined on the last row, so this is the
    /// longest warm-up among them.
    pub fn min_points(&self) -> usize {
        self.slow_period
            .max(self.fast_period)
            .max(self.rsi_period + 1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fast_period == 0 || self.slow_period == 0 || self.rsi_period == 0 {
            return Err(Error::InvalidSettings("periods must be greater than zero".into()));
        }
        if self.fast_period >= self.slow_period {
            return Err(Error::InvalidSettings(format!(
                "fast_period ({}) must be shorter than slow_period ({})",
                self.fast_period, self.slow_period
            )));
        }
        if !(0.0..=100.0).contains(&self.rsi_oversold)
            || !(0.0..=100.0).contains(&self.rsi_overbought)
            || self.rsi_oversold >= self.rsi_overbought
        {
            return Err(Error::InvalidSettings(format!(
                "rsi thresholds must satisfy 0 <= oversold ({}) < overbought ({}) <= 100",
                self.rsi_oversold, self.rsi_overbought
            )));
        }
        // Two indicators, so at most two votes can ever be cast.
        if !(1..=2).contains(&self.required_votes) {
            return Err(Error::InvalidSettings(format!(
                "required_votes must be 1 or 2, got {}",
                self.required_votes
            )));
        }
        Ok(())
    }
}
