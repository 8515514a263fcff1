//! Yahoo Finance price source

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

use super::PriceFetcher;
use crate::error::{HeliosError, Result};
use crate::model::{PricePoint, PriceSeries};

/// Daily history from Yahoo Finance
pub struct YahooPriceFetcher {
    connector: yahoo::YahooConnector,
}

impl YahooPriceFetcher {
    pub fn new() -> Result<Self> {
        let connector = yahoo::YahooConnector::new().map_err(|e| HeliosError::MarketData {
            ticker: "*".into(),
            reason: format!("cannot create Yahoo connector: {e}"),
        })?;
        Ok(Self { connector })
    }

    fn to_offset(ts: DateTime<Utc>) -> Result<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(ts.timestamp()).map_err(|e| HeliosError::MarketData {
            ticker: "*".into(),
            reason: format!("invalid timestamp {ts}: {e}"),
        })
    }
}

#[async_trait]
impl PriceFetcher for YahooPriceFetcher {
    async fn fetch_history(&self, ticker: &str, lookback_days: i64) -> Result<PriceSeries> {
        let end = Utc::now();
        let start = end - Duration::days(lookback_days);

        let response = match self
            .connector
            .get_quote_history(ticker, Self::to_offset(start)?, Self::to_offset(end)?)
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%ticker, error = %e, "No price history; continuing with empty series");
                return Ok(PriceSeries::empty());
            }
        };

        let quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(e) => {
                tracing::warn!(%ticker, error = %e, "Unreadable price history; continuing with empty series");
                return Ok(PriceSeries::empty());
            }
        };

        #[allow(clippy::cast_possible_wrap, clippy::unnecessary_cast)]
        let points = quotes
            .iter()
            .filter_map(|q| {
                DateTime::from_timestamp(q.timestamp as i64, 0)
                    .map(|ts| PricePoint::new(ts.date_naive(), q.close))
            })
            .collect();

        let series = PriceSeries::new(points);
        tracing::debug!(%ticker, points = series.len(), "Fetched price history");
        Ok(series)
    }

    fn name(&self) -> &str {
        "YahooFinance"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_known_ticker() {
        let fetcher = YahooPriceFetcher::new().unwrap();
        let series = fetcher.fetch_history("AAPL", 90).await.unwrap();
        assert!(!series.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_unknown_ticker_is_empty() {
        let fetcher = YahooPriceFetcher::new().unwrap();
        let series = fetcher.fetch_history("INVALID_SYMBOL_12345", 90).await.unwrap();
        assert!(series.is_empty());
    }
}
