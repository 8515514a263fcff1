//! Market Data
//!
//! Abstractions and implementations for historical price sources.

mod mock;
mod yahoo;

pub use mock::MockPriceFetcher;
pub use yahoo::YahooPriceFetcher;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::PriceSeries;

/// Historical price source (Strategy pattern)
///
/// "No data for this ticker" is an empty [`PriceSeries`], not an error;
/// errors are reserved for a source that cannot be used at all.
#[async_trait]
pub trait PriceFetcher: Send + Sync {
    /// Daily closes over the trailing `lookback_days`
    async fn fetch_history(&self, ticker: &str, lookback_days: i64) -> Result<PriceSeries>;

    /// Source name
    fn name(&self) -> &str;
}
