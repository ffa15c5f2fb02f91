// In crates/strategies/src/trend_momentum.rs

use crate::indicators::{self, IndicatorSnapshot};
use crate::types::TrendMomentumSettings;
use crate::{Assessment, Indicator, Result, Strategy, Vote};
use core_types::{PriceSeries, Rationale, Signal};

/// Moving-average crossover plus RSI, combined by vote.
///
/// Each indicator casts at most one vote from the latest row. A direction
/// wins only when it collects `required_votes` votes; anything else is HOLD.
#[derive(Debug, Clone, Default)]
pub struct TrendMomentum {
    settings: TrendMomentumSettings,
}

impl TrendMomentum {
    /// Creates a strategy instance without checking its settings.
    pub fn new(settings: TrendMomentumSettings) -> Self {
        Self { settings }
    }

    /// Creates a strategy instance, rejecting settings it cannot honor.
    pub fn try_new(settings: TrendMomentumSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::new(settings))
    }

    pub fn settings(&self) -> &TrendMomentumSettings {
        &self.settings
    }

    fn cast_votes(&self, snapshot: &IndicatorSnapshot) -> Vec<Vote> {
        let mut votes = Vec::with_capacity(2);

        // 1. Trend: where the fast average sits relative to the slow one.
        if let (Some(fast), Some(slow)) = (snapshot.sma_fast, snapshot.sma_slow) {
            let signal = if fast > slow {
                Some(Signal::Buy)
            } else if fast < slow {
                Some(Signal::Sell)
            } else {
                None
            };
            if let Some(signal) = signal {
                votes.push(Vote {
                    indicator: Indicator::MovingAverageCrossover,
                    signal,
                });
            }
        }

        // 2. Momentum: oversold buys, overbought sells.
        if let Some(rsi) = snapshot.rsi {
            let signal = if rsi < self.settings.rsi_oversold {
                Some(Signal::Buy)
            } else if rsi > self.settings.rsi_overbought {
                Some(Signal::Sell)
            } else {
                None
            };
            if let Some(signal) = signal {
                votes.push(Vote {
                    indicator: Indicator::Rsi,
                    signal,
                });
            }
        }

        votes
    }

    fn decide(&self, votes: &[Vote]) -> (Signal, Rationale) {
        let count = |wanted: Signal| votes.iter().filter(|v| v.signal == wanted).count();

        if count(Signal::Buy) >= self.settings.required_votes {
            (Signal::Buy, Rationale::Bullish)
        } else if count(Signal::Sell) >= self.settings.required_votes {
            (Signal::Sell, Rationale::Bearish)
        } else {
            (Signal::Hold, Rationale::Mixed)
        }
    }
}

impl Strategy for TrendMomentum {
    fn name(&self) -> &'static str {
        "TrendMomentum"
    }

    fn assess(&self, series: &PriceSeries) -> Assessment {
        // Every rolling window must be full on the last row.
        if series.len() < self.settings.min_points() {
            tracing::debug!(
                points = series.len(),
                required = self.settings.min_points(),
                "Series too short to analyze."
            );
            return Assessment::no_data();
        }

        let closes = series.closes();
        let Some(snapshot) = indicators::snapshots(&closes, &self.settings).pop() else {
            return Assessment::no_data();
        };

        let votes = self.cast_votes(&snapshot);
        let (signal, rationale) = self.decide(&votes);

        tracing::debug!(
            sma_fast = ?snapshot.sma_fast,
            sma_slow = ?snapshot.sma_slow,
            rsi = ?snapshot.rsi,
            votes = votes.len(),
            %signal,
            "Series assessed."
        );

        Assessment {
            signal,
            rationale,
            votes,
            indicators: Some(snapshot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze;
    use chrono::{Duration, TimeZone, Utc};
    use core_types::{MarketData, PricePoint};

    fn series(closes: &[f64]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint::close_only(start + Duration::days(i as i64), close).unwrap())
            .collect();
        PriceSeries::new(points)
    }

    fn assess(closes: &[f64]) -> Assessment {
        TrendMomentum::default().assess(&series(closes))
    }

    #[test]
    fn short_series_has_no_data() {
        let closes: Vec<f64> = (0..49).map(|i| 100.0 + f64::from(i)).collect();
        assert_eq!(assess(&closes), Assessment::no_data());
        assert_eq!(assess(&[]), Assessment::no_data());
    }

    #[test]
    fn missing_market_data_has_no_data() {
        let result = analyze(&MarketData::NoData);
        assert_eq!(result.signal, Signal::NoData);
        assert_eq!(result.rationale.as_str(), "Not enough data to analyze.");
        assert!(result.indicators.is_none());
    }

    #[test]
    fn linear_rise_is_mixed() {
        // SMA20 149.5 > SMA50 134.5 votes BUY, RSI 100 votes SELL.
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i)).collect();
        let result = analyze(&MarketData::Series(series(&closes)));

        assert_eq!(result.signal, Signal::Hold);
        assert_eq!(result.rationale.as_str(), "Mixed signals — wait for a clearer trend.");
        assert_eq!(
            result.votes,
            vec![
                Vote { indicator: Indicator::MovingAverageCrossover, signal: Signal::Buy },
                Vote { indicator: Indicator::Rsi, signal: Signal::Sell },
            ]
        );
        let snapshot = result.indicators.unwrap();
        assert_eq!(snapshot.sma_fast, Some(149.5));
        assert_eq!(snapshot.sma_slow, Some(134.5));
        assert_eq!(snapshot.rsi, Some(100.0));
    }

    #[test]
    fn exactly_fifty_points_is_enough() {
        let closes: Vec<f64> = (0..50).map(|i| 100.0 + f64::from(i)).collect();
        assert_ne!(assess(&closes).signal, Signal::NoData);
    }

    #[test]
    fn single_bullish_vote_holds() {
        // Uptrend, then the last 14 moves alternate +1/-1 so RSI sits at 50.
        let mut closes: Vec<f64> = (0..46).map(|i| 100.0 + f64::from(i)).collect();
        for i in 0..14 {
            closes.push(if i % 2 == 0 { 146.0 } else { 145.0 });
        }
        let result = assess(&closes);

        assert_eq!(result.signal, Signal::Hold);
        assert_eq!(result.rationale, Rationale::Mixed);
        assert_eq!(result.votes.len(), 1);
        assert_eq!(result.votes[0].signal, Signal::Buy);
        assert_eq!(result.indicators.unwrap().rsi, Some(50.0));
    }

    #[test]
    fn downtrend_with_overbought_rsi_sells() {
        let mut closes: Vec<f64> = (0..46).map(|i| 200.0 - 2.0 * f64::from(i)).collect();
        closes.extend((1..=14).map(|i| 110.0 + 0.1 * f64::from(i)));
        let result = assess(&closes);

        let snapshot = result.indicators.unwrap();
        assert!(snapshot.sma_fast < snapshot.sma_slow);
        assert_eq!(snapshot.rsi, Some(100.0));
        assert_eq!(result.signal, Signal::Sell);
        assert_eq!(result.rationale.as_str(), "Multiple bearish signals detected.");
    }

    #[test]
    fn uptrend_with_oversold_rsi_buys() {
        let mut closes: Vec<f64> = (0..46).map(|i| 100.0 + 2.0 * f64::from(i)).collect();
        closes.extend((1..=14).map(|i| 190.0 - 0.1 * f64::from(i)));
        let result = assess(&closes);

        let snapshot = result.indicators.unwrap();
        assert!(snapshot.sma_fast > snapshot.sma_slow);
        assert_eq!(snapshot.rsi, Some(0.0));
        assert_eq!(result.signal, Signal::Buy);
        assert_eq!(result.rationale.as_str(), "Multiple bullish signals detected.");
    }

    #[test]
    fn zero_losses_resolve_rsi_to_one_hundred() {
        let mut closes = vec![100.0; 40];
        closes.extend((1..=20).map(|i| 100.0 + f64::from(i)));
        let result = assess(&closes);

        assert_eq!(result.indicators.unwrap().rsi, Some(100.0));
        assert!(result.votes.contains(&Vote { indicator: Indicator::Rsi, signal: Signal::Sell }));
    }

    #[test]
    fn flat_series_casts_no_votes() {
        let result = assess(&[100.0; 60]);
        assert_eq!(result.signal, Signal::Hold);
        assert!(result.votes.is_empty());
    }

    #[test]
    fn only_the_last_fifty_closes_matter() {
        let tail: Vec<f64> = (0..50).map(|i| 50.0 + (f64::from(i) * 0.7).sin() * 5.0).collect();

        let mut ascending: Vec<f64> = (0..30).map(|i| 10.0 + f64::from(i)).collect();
        ascending.extend(&tail);
        let mut shuffled: Vec<f64> = (0..30).map(|i| 10.0 + f64::from((i * 7) % 30)).collect();
        shuffled.extend(&tail);

        assert_eq!(assess(&ascending), assess(&shuffled));
    }

    #[test]
    fn one_vote_is_enough_when_configured() {
        let strategy = TrendMomentum::try_new(TrendMomentumSettings {
            required_votes: 1,
            ..Default::default()
        })
        .unwrap();
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i)).collect();

        // BUY is checked first, so the conflicting SELL vote loses.
        assert_eq!(strategy.assess(&series(&closes)).signal, Signal::Buy);
    }

    #[test]
    fn try_new_rejects_invalid_settings() {
        let settings = TrendMomentumSettings { slow_period: 0, ..Default::default() };
        assert!(TrendMomentum::try_new(settings).is_err());
    }
}
