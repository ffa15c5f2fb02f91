// In crates/strategies/src/indicators.rs

use serde::Serialize;

use crate::types::TrendMomentumSettings;

/// RSI reported for a window with neither gains nor losses.
pub const NEUTRAL_RSI: f64 = 50.0;

/// Indicator values attached to one row of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorSnapshot {
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub rsi: Option<f64>,
}

/// Simple moving average for every index.
///
/// Index `i` holds the mean of `values[i + 1 - period..=i]`, or `None` while
/// fewer than `period` values are available.
pub fn sma(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let window = &values[i + 1 - period..=i];
            Some(window.iter().sum::<f64>() / period as f64)
        })
        .collect()
}

/// Relative strength index for every index.
///
/// Average gain and loss are plain means over the trailing `period` price
/// changes, so index `i` needs `closes[i - period..=i]` and the first
/// `period` rows are `None`.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return out;
    }

    // changes[j] is the move from closes[j] to closes[j + 1]
    let gains: Vec<f64> = closes.windows(2).map(|w| (w[1] - w[0]).max(0.0)).collect();
    let losses: Vec<f64> = closes.windows(2).map(|w| (w[0] - w[1]).max(0.0)).collect();

    for (i, slot) in out.iter_mut().enumerate().skip(period) {
        let changes = i - period..i;
        let avg_gain = gains[changes.clone()].iter().sum::<f64>() / period as f64;
        let avg_loss = losses[changes].iter().sum::<f64>() / period as f64;
        *slot = Some(relative_strength_index(avg_gain, avg_loss));
    }

    out
}

fn relative_strength_index(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return if avg_gain == 0.0 { NEUTRAL_RSI } else { 100.0 };
    }
    let rs = avg_gain / avg_loss;
    100.0 - 100.0 / (1.0 + rs)
}

/// Computes the full indicator table for a series of closes.
pub fn snapshots(closes: &[f64], settings: &TrendMomentumSettings) -> Vec<IndicatorSnapshot> {
    let fast = sma(closes, settings.fast_period);
    let slow = sma(closes, settings.slow_period);
    let rsi = rsi(closes, settings.rsi_period);

    fast.into_iter()
        .zip(slow)
        .zip(rsi)
        .map(|((sma_fast, sma_slow), rsi)| IndicatorSnapshot {
            sma_fast,
            sma_slow,
            rsi,
        })
        .collect()
}
