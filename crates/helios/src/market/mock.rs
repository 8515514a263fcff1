//! Mock Price Source
//!
//! For testing and offline demo runs. Produces a deterministic weekday series
//! for a handful of well-known symbols and an empty series for anything else.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Utc, Weekday};

use super::PriceFetcher;
use crate::error::Result;
use crate::indicators::round_to;
use crate::model::{PricePoint, PriceSeries};

/// Deterministic price source
pub struct MockPriceFetcher {
    /// Last day of every generated series
    anchor: NaiveDate,
    /// Series returned verbatim instead of generated ones
    overrides: HashMap<String, PriceSeries>,
}

impl Default for MockPriceFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPriceFetcher {
    pub fn new() -> Self {
        Self::anchored_at(Utc::now().date_naive())
    }

    /// Generate series ending on a fixed day (for reproducible tests)
    pub fn anchored_at(anchor: NaiveDate) -> Self {
        Self {
            anchor,
            overrides: HashMap::new(),
        }
    }

    /// Serve a specific series for a ticker
    pub fn with_series(mut self, ticker: impl Into<String>, series: PriceSeries) -> Self {
        self.overrides.insert(ticker.into().to_uppercase(), series);
        self
    }

    /// (base price, daily drift, swing amplitude)
    fn profile(ticker: &str) -> Option<(f64, f64, f64)> {
        match ticker {
            "AAPL" => Some((190.0, 0.0008, 0.03)),
            "MSFT" => Some((415.0, 0.0006, 0.025)),
            "NVDA" => Some((120.0, 0.0020, 0.06)),
            "GOOGL" => Some((165.0, 0.0004, 0.03)),
            "AMZN" => Some((185.0, 0.0007, 0.035)),
            "META" => Some((500.0, 0.0010, 0.04)),
            "TSLA" => Some((240.0, -0.0012, 0.08)),
            "SPY" => Some((540.0, 0.0003, 0.015)),
            _ => None,
        }
    }

    fn generate(&self, ticker: &str, lookback_days: i64) -> PriceSeries {
        let Some((base, drift, amplitude)) = Self::profile(ticker) else {
            return PriceSeries::empty();
        };
        let phase = f64::from(ticker.bytes().map(u32::from).sum::<u32>() % 13);

        let start = self.anchor - Duration::days(lookback_days);
        let days = start
            .iter_days()
            .take_while(|d| *d <= self.anchor)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun));

        let points = days
            .enumerate()
            .map(|(i, date)| {
                #[allow(clippy::cast_precision_loss)]
                let t = i as f64;
                let close = base * (1.0 + drift * t) * (1.0 + amplitude * (t * 0.45 + phase).sin());
                PricePoint::new(date, round_to(close, 2))
            })
            .collect();

        PriceSeries::new(points)
    }
}

#[async_trait]
impl PriceFetcher for MockPriceFetcher {
    async fn fetch_history(&self, ticker: &str, lookback_days: i64) -> Result<PriceSeries> {
        let key = ticker.to_uppercase();
        if let Some(series) = self.overrides.get(&key) {
            return Ok(series.clone());
        }
        Ok(self.generate(&key, lookback_days))
    }

    fn name(&self) -> &str {
        "MockMarket"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> MockPriceFetcher {
        MockPriceFetcher::anchored_at(NaiveDate::from_ymd_opt(2024, 6, 28).unwrap())
    }

    #[tokio::test]
    async fn test_known_ticker_has_weekday_history() {
        let series = fetcher().fetch_history("aapl", 90).await.unwrap();

        assert!(series.len() > 55, "got {} points", series.len());
        assert!(
            series
                .points()
                .iter()
                .all(|p| !matches!(p.date.weekday(), Weekday::Sat | Weekday::Sun))
        );
        assert!(series.closes().iter().all(|c| *c > 0.0));
    }

    #[tokio::test]
    async fn test_series_is_deterministic() {
        let a = fetcher().fetch_history("NVDA", 90).await.unwrap();
        let b = fetcher().fetch_history("NVDA", 90).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_unknown_ticker_is_empty() {
        let series = fetcher().fetch_history("NOTREAL", 90).await.unwrap();
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn test_override_wins() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let custom = PriceSeries::new(vec![PricePoint::new(day, 1.0)]);
        let fetcher = fetcher().with_series("xyz", custom.clone());

        assert_eq!(fetcher.fetch_history("XYZ", 90).await.unwrap(), custom);
    }
}
