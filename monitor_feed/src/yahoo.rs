//! Yahoo Finance data source.
//!
//! Fetches the latest daily bar set from Yahoo's v8 chart API with
//! `range=1d&interval=1d`. There is no retry and no backoff: the next polling
//! cycle is the only retry.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes;
//! every shape mismatch surfaces as `MonitorError::ResponseFormat` and the fetcher
//! turns it into a placeholder row.

use log::debug;
use monitor_common::net::{REQUEST_TIMEOUT_SECS, USER_AGENT, YAHOO_CHART_BASE, chart_url};
use monitor_common::{DailyBar, MonitorError, Result};
use serde::Deserialize;
use std::time::Duration;

use crate::source::QuoteSource;

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

/// Blocking Yahoo Finance client.
pub struct YahooSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooSource {
    /// Create a client against the public Yahoo endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(YAHOO_CHART_BASE)
    }

    /// Create a client against a custom base URL (mirrors, proxies).
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| MonitorError::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// Parse a chart payload into bars, oldest first.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<DailyBar>> {
        if let Some(err) = resp.chart.error {
            return Err(if err.code == "Not Found" {
                MonitorError::NoData {
                    symbol: symbol.to_string(),
                }
            } else {
                MonitorError::ResponseFormat(format!("{}: {}", err.code, err.description))
            });
        }

        let data = resp
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| MonitorError::NoData {
                symbol: symbol.to_string(),
            })?;

        let quote = data.indicators.quote.into_iter().next().unwrap_or_default();

        let bars = data
            .timestamp
            .iter()
            .enumerate()
            .filter_map(|(i, &timestamp)| {
                // Holidays and halted sessions come back as nulls.
                let open = quote.open.get(i).copied().flatten()?;
                let close = quote.close.get(i).copied().flatten()?;
                let volume = quote.volume.get(i).copied().flatten().unwrap_or(0);
                Some(DailyBar {
                    timestamp,
                    open,
                    close,
                    volume,
                })
            })
            .collect();

        Ok(bars)
    }
}

impl QuoteSource for YahooSource {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn latest_bars(&self, symbol: &str) -> Result<Vec<DailyBar>> {
        let url = chart_url(&self.base_url, symbol);
        debug!("GET {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| MonitorError::Http(e.to_string()))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MonitorError::NoData {
                symbol: symbol.to_string(),
            });
        }
        if !status.is_success() {
            return Err(MonitorError::Http(format!("HTTP {status} for {symbol}")));
        }

        let chart: ChartResponse = resp.json().map_err(|e| {
            MonitorError::ResponseFormat(format!("failed to parse response for {symbol}: {e}"))
        })?;

        Self::parse_response(symbol, chart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<Vec<DailyBar>> {
        let resp: ChartResponse = serde_json::from_str(json)?;
        YahooSource::parse_response("TSM", resp)
    }

    #[test]
    fn parses_single_daily_bar() {
        let bars = parse(
            r#"{"chart":{"result":[{"meta":{"symbol":"TSM"},"timestamp":[1709213400],
            "indicators":{"quote":[{"open":[100.0],"high":[106.0],"low":[99.0],
            "close":[105.0],"volume":[1234567]}]}}],"error":null}}"#,
        )
        .unwrap();

        assert_eq!(
            bars,
            vec![DailyBar {
                timestamp: 1709213400,
                open: 100.0,
                close: 105.0,
                volume: 1234567,
            }]
        );
    }

    #[test]
    fn skips_null_bars_and_defaults_missing_volume() {
        let bars = parse(
            r#"{"chart":{"result":[{"timestamp":[1,2],
            "indicators":{"quote":[{"open":[null,10.0],"close":[null,11.0],
            "volume":[null,null]}]}}],"error":null}}"#,
        )
        .unwrap();

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].timestamp, 2);
        assert_eq!(bars[0].volume, 0);
    }

    #[test]
    fn empty_session_yields_no_bars() {
        let bars = parse(
            r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[{}]}}],"error":null}}"#,
        )
        .unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn not_found_maps_to_no_data() {
        let err = parse(
            r#"{"chart":{"result":null,"error":{"code":"Not Found",
            "description":"No data found, symbol may be delisted"}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, MonitorError::NoData { symbol } if symbol == "TSM"));
    }

    #[test]
    fn other_provider_errors_are_format_errors() {
        let err = parse(
            r#"{"chart":{"result":null,
            "error":{"code":"Bad Request","description":"Invalid range"}}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, MonitorError::ResponseFormat(msg) if msg.contains("Invalid range")));
    }
}
