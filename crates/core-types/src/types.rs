// In crates/core-types/src/types.rs

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

use crate::{Error, Result};

/// A single daily observation for an instrument.
///
/// Forex observations carry the full OHLC set; crypto observations only
/// carry a closing price. Only `close` feeds the indicators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
}

impl PricePoint {
    /// Creates a point with a full open/high/low/close set.
    pub fn ohlc(timestamp: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Result<Self> {
        for value in [open, high, low, close] {
            ensure_finite(value)?;
        }
        Ok(Self {
            timestamp,
            open: Some(open),
            high: Some(high),
            low: Some(low),
            close,
        })
    }

    /// Creates a point that only knows its closing price.
    pub fn close_only(timestamp: DateTime<Utc>, close: f64) -> Result<Self> {
        ensure_finite(close)?;
        Ok(Self {
            timestamp,
            open: None,
            high: None,
            low: None,
            close,
        })
    }
}

fn ensure_finite(value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::NonFinitePrice(value))
    }
}

/// A time-ordered series of price points.
///
/// Points are strictly increasing by timestamp. The constructor sorts its
/// input and drops duplicate timestamps, keeping the observation that came
/// last in the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        // Stable sort keeps input order among equal timestamps.
        points.sort_by_key(|p| p.timestamp);

        let mut deduped: Vec<PricePoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.timestamp == point.timestamp => *last = point,
                _ => deduped.push(point),
            }
        }

        Self { points: deduped }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// The closing prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }
}

/// The outcome of asking a market data provider for a series.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketData {
    Series(PriceSeries),
    /// The provider could not produce a usable series.
    NoData,
}

impl MarketData {
    pub fn series(&self) -> Option<&PriceSeries> {
        match self {
            MarketData::Series(series) => Some(series),
            MarketData::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, MarketData::NoData)
    }
}

impl From<Option<PriceSeries>> for MarketData {
    fn from(value: Option<PriceSeries>) -> Self {
        value.map_or(MarketData::NoData, MarketData::Series)
    }
}

/// The discrete output of an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
    NoData,
}

impl Signal {
    /// The label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Signal::Buy => "BUY",
            Signal::Sell => "SELL",
            Signal::Hold => "HOLD",
            Signal::NoData => "No Data",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The fixed explanation attached to every signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rationale {
    NotEnoughData,
    Bullish,
    Bearish,
    Mixed,
}

impl Rationale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rationale::NotEnoughData => "Not enough data to analyze.",
            Rationale::Bullish => "Multiple bullish signals detected.",
            Rationale::Bearish => "Multiple bearish signals detected.",
            Rationale::Mixed => "Mixed signals — wait for a clearer trend.",
        }
    }
}

impl fmt::Display for Rationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Rationale {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn series_is_sorted_ascending() {
        let series = PriceSeries::new(vec![
            PricePoint::close_only(at(3), 3.0).unwrap(),
            PricePoint::close_only(at(1), 1.0).unwrap(),
            PricePoint::close_only(at(2), 2.0).unwrap(),
        ]);

        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.first().unwrap().timestamp, at(1));
        assert_eq!(series.last().unwrap().timestamp, at(3));
    }

    #[test]
    fn duplicate_timestamps_keep_the_later_observation() {
        let series = PriceSeries::new(vec![
            PricePoint::close_only(at(2), 20.0).unwrap(),
            PricePoint::close_only(at(1), 10.0).unwrap(),
            PricePoint::close_only(at(2), 21.0).unwrap(),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![10.0, 21.0]);
    }

    #[test]
    fn non_finite_prices_are_rejected() {
        assert_eq!(
            PricePoint::close_only(at(1), f64::NAN).map_err(|e| e.to_string()).unwrap_err(),
            "Price must be a finite number, got NaN"
        );
        assert!(PricePoint::ohlc(at(1), 1.0, f64::INFINITY, 1.0, 1.0).is_err());
    }

    #[test]
    fn ohlc_points_keep_every_price() {
        let point = PricePoint::ohlc(at(1), 1.1, 1.2, 1.0, 1.15).unwrap();
        assert_eq!(point.open, Some(1.1));
        assert_eq!(point.high, Some(1.2));
        assert_eq!(point.low, Some(1.0));
        assert_eq!(point.close, 1.15);
    }

    #[test]
    fn signal_labels_and_wire_names() {
        assert_eq!(Signal::NoData.to_string(), "No Data");
        assert_eq!(Signal::Buy.label(), "BUY");
        assert_eq!(serde_json::to_string(&Signal::NoData).unwrap(), "\"NO_DATA\"");
        assert_eq!(serde_json::to_string(&Signal::Sell).unwrap(), "\"SELL\"");
    }

    #[test]
    fn rationale_serializes_as_its_text() {
        assert_eq!(
            serde_json::to_string(&Rationale::NotEnoughData).unwrap(),
            "\"Not enough data to analyze.\""
        );
        assert_eq!(Rationale::Mixed.to_string(), "Mixed signals — wait for a clearer trend.");
    }

    #[test]
    fn market_data_from_option() {
        assert!(MarketData::from(None).is_no_data());
        let data = MarketData::from(Some(PriceSeries::default()));
        assert_eq!(data.series().map(PriceSeries::len), Some(0));
    }
}
