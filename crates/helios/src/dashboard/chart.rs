//! Chart series
//!
//! Price/trend and RSI series derived from a report's `price_data`, using the
//! same rolling functions as the indicator engine.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use crate::indicators::{MA_LONG_PERIOD, MA_SHORT_PERIOD, RSI_PERIOD, rolling_mean, rsi_series};

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartData {
    pub dates: Vec<NaiveDate>,
    pub close: Vec<f64>,
    pub ma20: Vec<Option<f64>>,
    pub ma50: Vec<Option<f64>>,
    pub rsi: Vec<Option<f64>>,
    /// Horizontal RSI reference lines
    pub rsi_guides: [f64; 2],
}

impl ChartData {
    /// `None` when no row has both a parseable date and a numeric close
    pub fn from_price_data(price_data: &Value) -> Option<Self> {
        let mut rows: Vec<(NaiveDate, f64)> = price_data
            .as_array()?
            .iter()
            .filter_map(|row| {
                let date = row.get("Date").and_then(Value::as_str).and_then(parse_date)?;
                let close = row.get("Close").and_then(Value::as_f64)?;
                Some((date, close))
            })
            .collect();
        if rows.is_empty() {
            return None;
        }
        rows.sort_by_key(|(date, _)| *date);

        let (dates, close): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
        Some(Self {
            ma20: rolling_mean(&close, MA_SHORT_PERIOD),
            ma50: rolling_mean(&close, MA_LONG_PERIOD),
            rsi: rsi_series(&close, RSI_PERIOD),
            rsi_guides: [RSI_OVERSOLD, RSI_OVERBOUGHT],
            dates,
            close,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Accepts plain dates and the datetime forms price feeds commonly emit
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%:z")
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}
