// In crates/api-client/src/parse.rs

use chrono::{DateTime, NaiveDate, Utc};
use core_types::{PricePoint, PriceSeries};
use serde_json::Value;

use crate::types::{
    FX_DAILY_SERIES_KEY, FxDailyBar, FxDailyResponse, FxDailySeries, MARKET_CHART_PRICES_KEY,
    MarketChartResponse,
};
use crate::{Error, Result};

/// Splits a `BASE/QUOTE` pair into its two symbols.
pub fn parse_pair(pair: &str) -> Result<(&str, &str)> {
    let mut parts = pair.split('/').map(str::trim);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(base), Some(quote), None) if !base.is_empty() && !quote.is_empty() => Ok((base, quote)),
        _ => Err(Error::InvalidPair(pair.to_string())),
    }
}

/// Parses an `FX_DAILY` response body into an ascending series.
pub fn parse_fx_daily(body: &str) -> Result<PriceSeries> {
    let mut response: FxDailyResponse = serde_json::from_str(body)?;

    let Some(raw_series) = response.fields.remove(FX_DAILY_SERIES_KEY) else {
        return Err(Error::MissingSeries {
            key: FX_DAILY_SERIES_KEY,
            detail: provider_message(&response),
        });
    };

    let series: FxDailySeries = serde_json::from_value(raw_series)?;
    if series.is_empty() {
        return Err(Error::EmptyPayload);
    }

    let points = series
        .iter()
        .map(|(date, bar)| fx_point(date, bar))
        .collect::<Result<Vec<_>>>()?;

    Ok(PriceSeries::new(points))
}

fn fx_point(date: &str, bar: &FxDailyBar) -> Result<PricePoint> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| Error::InvalidValue {
        field: "date",
        value: date.to_string(),
    })?;
    let timestamp = day.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();

    let point = PricePoint::ohlc(
        timestamp,
        price("open", &bar.open)?,
        price("high", &bar.high)?,
        price("low", &bar.low)?,
        price("close", &bar.close)?,
    )?;
    Ok(point)
}

fn price(field: &'static str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| Error::InvalidValue {
            field,
            value: raw.to_string(),
        })
}

/// The provider explains rejected requests in one of these fields.
fn provider_message(response: &FxDailyResponse) -> String {
    ["Error Message", "Note", "Information"]
        .iter()
        .find_map(|key| response.fields.get(*key).and_then(Value::as_str))
        .unwrap_or("unexpected response body")
        .to_string()
}

/// Parses a `market_chart` response body into an ascending series.
pub fn parse_market_chart(body: &str) -> Result<PriceSeries> {
    let response: MarketChartResponse = serde_json::from_str(body)?;

    let Some(prices) = response.prices else {
        let detail = match response.error {
            Some(Value::String(message)) => message,
            Some(other) => other.to_string(),
            None => "unexpected response body".to_string(),
        };
        return Err(Error::MissingSeries {
            key: MARKET_CHART_PRICES_KEY,
            detail,
        });
    };

    if prices.is_empty() {
        return Err(Error::EmptyPayload);
    }

    let points = prices
        .into_iter()
        .map(|(epoch_ms, close)| {
            let timestamp = timestamp_from_millis(epoch_ms)?;
            Ok(PricePoint::close_only(timestamp, close)?)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PriceSeries::new(points))
}

fn timestamp_from_millis(epoch_ms: f64) -> Result<DateTime<Utc>> {
    let invalid = || Error::InvalidValue {
        field: "timestamp",
        value: epoch_ms.to_string(),
    };
    if !epoch_ms.is_finite() {
        return Err(invalid());
    }
    DateTime::from_timestamp_millis(epoch_ms as i64).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FX_BODY: &str = r#"{
        "Meta Data": { "1. Information": "Forex Daily Prices (open, high, low, close)" },
        "Time Series FX (Daily)": {
            "2024-03-05": { "1. open": "1.08560", "2. high": "1.08700", "3. low": "1.08400", "4. close": "1.08550" },
            "2024-03-01": { "1. open": "1.08000", "2. high": "1.08400", "3. low": "1.07900", "4. close": "1.08380" },
            "2024-03-04": { "1. open": "1.08380", "2. high": "1.08650", "3. low": "1.08300", "4. close": "1.08560" }
        }
    }"#;

    #[test]
    fn pair_is_split_on_slash() {
        assert_eq!(parse_pair("EUR/USD").unwrap(), ("EUR", "USD"));
        assert_eq!(parse_pair(" gbp / jpy ").unwrap(), ("gbp", "jpy"));
    }

    #[test]
    fn malformed_pairs_are_rejected() {
        for pair in ["EURUSD", "EUR/", "/USD", "EUR/USD/JPY", ""] {
            assert!(matches!(parse_pair(pair), Err(Error::InvalidPair(_))), "{pair}");
        }
    }

    #[test]
    fn fx_daily_is_sorted_by_date() {
        let series = parse_fx_daily(FX_BODY).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![1.0838, 1.0856, 1.0855]);
        let first = series.first().unwrap();
        assert_eq!(first.timestamp, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(first.open, Some(1.08));
        assert_eq!(first.high, Some(1.084));
        assert_eq!(first.low, Some(1.079));
    }

    #[test]
    fn fx_daily_without_series_reports_provider_message() {
        let body = r#"{ "Error Message": "Invalid API call." }"#;
        match parse_fx_daily(body) {
            Err(Error::MissingSeries { key, detail }) => {
                assert_eq!(key, "Time Series FX (Daily)");
                assert_eq!(detail, "Invalid API call.");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn fx_daily_with_empty_series_is_rejected() {
        let body = r#"{ "Time Series FX (Daily)": {} }"#;
        assert!(matches!(parse_fx_daily(body), Err(Error::EmptyPayload)));
    }

    #[test]
    fn fx_daily_with_bad_number_is_rejected() {
        let body = r#"{ "Time Series FX (Daily)": {
            "2024-03-01": { "1. open": "1.0", "2. high": "1.1", "3. low": "0.9", "4. close": "n/a" }
        } }"#;
        assert!(matches!(
            parse_fx_daily(body),
            Err(Error::InvalidValue { field: "close", .. })
        ));
    }

    #[test]
    fn fx_daily_with_bad_date_is_rejected() {
        let body = r#"{ "Time Series FX (Daily)": {
            "yesterday": { "1. open": "1.0", "2. high": "1.1", "3. low": "0.9", "4. close": "1.0" }
        } }"#;
        assert!(matches!(
            parse_fx_daily(body),
            Err(Error::InvalidValue { field: "date", .. })
        ));
    }

    #[test]
    fn fx_daily_rejects_non_json() {
        assert!(matches!(
            parse_fx_daily("<html>busy</html>"),
            Err(Error::DeserializationFailed(_))
        ));
    }

    #[test]
    fn market_chart_is_sorted_and_close_only() {
        let body = r#"{
            "prices": [[1709337600000, 62000.5], [1709251200000, 61000.0], [1709424000000, 63000.25]],
            "market_caps": [],
            "total_volumes": []
        }"#;
        let series = parse_market_chart(body).unwrap();

        assert_eq!(series.closes(), vec![61000.0, 62000.5, 63000.25]);
        let first = series.first().unwrap();
        assert_eq!(first.timestamp, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(first.open, None);
        assert_eq!(first.high, None);
        assert_eq!(first.low, None);
    }

    #[test]
    fn market_chart_without_prices_is_missing() {
        let body = r#"{ "error": "coin not found" }"#;
        match parse_market_chart(body) {
            Err(Error::MissingSeries { key, detail }) => {
                assert_eq!(key, "prices");
                assert_eq!(detail, "coin not found");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn market_chart_with_empty_prices_is_rejected() {
        assert!(matches!(
            parse_market_chart(r#"{ "prices": [] }"#),
            Err(Error::EmptyPayload)
        ));
    }

    #[test]
    fn market_chart_with_null_price_is_rejected() {
        assert!(parse_market_chart(r#"{ "prices": [[1709251200000, null]] }"#).is_err());
    }
}
