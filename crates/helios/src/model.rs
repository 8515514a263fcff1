//! Domain Models
//!
//! Price history for one ticker. A series is immutable once fetched and may
//! legitimately be empty (unknown symbol, no trading data).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily close
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Trading day, serialized as `YYYY-MM-DD`
    #[serde(rename = "Date")]
    pub date: NaiveDate,

    /// Closing price
    #[serde(rename = "Close")]
    pub close: f64,
}

impl PricePoint {
    pub const fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Ordered (oldest first) closing prices for a ticker
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PricePoint>", into = "Vec<PricePoint>")]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl From<Vec<PricePoint>> for PriceSeries {
    fn from(points: Vec<PricePoint>) -> Self {
        Self::new(points)
    }
}

impl From<PriceSeries> for Vec<PricePoint> {
    fn from(series: PriceSeries) -> Self {
        series.points
    }
}

impl PriceSeries {
    /// Build from points in any order; sorts by date and drops non-finite closes
    pub fn new(mut points: Vec<PricePoint>) -> Self {
        points.retain(|p| p.close.is_finite());
        points.sort_by_key(|p| p.date);
        Self { points }
    }

    pub const fn empty() -> Self {
        Self { points: Vec::new() }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices, oldest first
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
