//! Indicator Engine
//!
//! Pure functions over closing prices. Every indicator is a trailing-window
//! value: the last element of the corresponding rolling series. Insufficient
//! history or an undefined ratio yields `None`, never an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::PriceSeries;

pub const MA_SHORT_PERIOD: usize = 20;
pub const MA_LONG_PERIOD: usize = 50;
pub const RSI_PERIOD: usize = 14;

/// Summary handed to the analyst when there is nothing to compute
pub const NO_TECHNICAL_DATA: &str = "No technical data available.";

/// Summary handed to the researcher when there are no prices
pub const NO_PRICE_DATA: &str = "No price data available.";

/// Scalar indicators at the end of the window
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(rename = "MA20")]
    pub ma20: Option<f64>,
    #[serde(rename = "MA50")]
    pub ma50: Option<f64>,
    #[serde(rename = "RSI14")]
    pub rsi14: Option<f64>,
    #[serde(rename = "Volatility")]
    pub volatility: Option<f64>,
}

/// Result of running the engine over a series
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IndicatorSet {
    /// The series was empty
    NoData,
    /// At least one close was available
    Computed(Indicators),
}

impl IndicatorSet {
    pub const fn indicators(&self) -> Option<&Indicators> {
        match self {
            Self::NoData => None,
            Self::Computed(indicators) => Some(indicators),
        }
    }

    /// Report `metrics` object: empty for `NoData`, `null` for undefined values
    pub fn to_metrics(&self) -> BTreeMap<String, Option<f64>> {
        let mut metrics = BTreeMap::new();
        if let Self::Computed(ind) = self {
            metrics.insert("MA20".into(), ind.ma20);
            metrics.insert("MA50".into(), ind.ma50);
            metrics.insert("RSI14".into(), ind.rsi14);
            metrics.insert("Volatility".into(), ind.volatility);
        }
        metrics
    }

    /// Text given to the technical analyst
    pub fn summary(&self) -> String {
        match self {
            Self::NoData => NO_TECHNICAL_DATA.to_string(),
            Self::Computed(ind) => format!(
                "MA20: {}\nMA50: {}\nRSI14: {}\nVolatility: {}",
                display(ind.ma20),
                display(ind.ma50),
                display(ind.rsi14),
                display(ind.volatility),
            ),
        }
    }
}

fn display(value: Option<f64>) -> String {
    value.map_or_else(|| "undefined".to_string(), |v| v.to_string())
}

/// Compute the indicator set and its summary text
pub fn compute_indicators(series: &PriceSeries) -> (IndicatorSet, String) {
    if series.is_empty() {
        return (IndicatorSet::NoData, NO_TECHNICAL_DATA.to_string());
    }

    let closes = series.closes();
    let set = IndicatorSet::Computed(Indicators {
        ma20: sma(&closes, MA_SHORT_PERIOD).map(|v| round_to(v, 2)),
        ma50: sma(&closes, MA_LONG_PERIOD).map(|v| round_to(v, 2)),
        rsi14: rsi(&closes, RSI_PERIOD).map(|v| round_to(v, 2)),
        volatility: sample_std(&closes).map(|v| round_to(v, 4)),
    });
    let summary = set.summary();
    (set, summary)
}

/// Text given to the market researcher
pub fn price_summary(series: &PriceSeries) -> String {
    let Some(latest) = series.latest() else {
        return NO_PRICE_DATA.to_string();
    };

    let closes = series.closes();
    let volatility = sample_std(&closes)
        .map_or_else(|| "undefined".to_string(), |v| format!("{v:.2}"));

    format!(
        "Latest close: {:.2}\nAverage close: {:.2}\nVolatility: {}",
        latest.close,
        mean(&closes).unwrap_or(latest.close),
        volatility
    )
}

/// Arithmetic mean; `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1); `None` below two values
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    #[allow(clippy::cast_precision_loss)]
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Trailing simple moving average over the last `period` values
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    rolling_mean(values, period).last().copied().flatten()
}

/// Trailing RSI over the last `period` deltas
pub fn rsi(values: &[f64], period: usize) -> Option<f64> {
    rsi_series(values, period).last().copied().flatten()
}

/// Rolling mean aligned with `values`; positions without a full window are `None`
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    if period == 0 {
        return vec![None; values.len()];
    }
    (0..values.len())
        .map(|i| {
            if i + 1 < period {
                None
            } else {
                mean(&values[i + 1 - period..=i])
            }
        })
        .collect()
}

/// Rolling RSI aligned with `values`
///
/// Position `i` averages gains and losses of the `period` deltas ending at
/// `i`, so the first defined value is at index `period`. A zero average loss
/// leaves the ratio undefined and the position `None`.
pub fn rsi_series(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() <= period {
        return out;
    }

    let deltas: Vec<f64> = values.windows(2).map(|w| w[1] - w[0]).collect();
    for i in period..values.len() {
        // deltas[k] is the change into values[k + 1]
        let window = &deltas[i - period..i];
        let gains: Vec<f64> = window.iter().map(|d| d.max(0.0)).collect();
        let losses: Vec<f64> = window.iter().map(|d| (-d).max(0.0)).collect();

        let (Some(avg_gain), Some(avg_loss)) = (mean(&gains), mean(&losses)) else {
            continue;
        };
        if avg_loss == 0.0 {
            continue;
        }
        let ratio = avg_gain / avg_loss;
        out[i] = Some(100.0 - 100.0 / (1.0 + ratio));
    }
    out
}

/// Round half away from zero to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PricePoint;
    use chrono::{Duration, NaiveDate};

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PriceSeries::new(
            closes
                .iter()
                .enumerate()
                .map(|(i, &c)| PricePoint::new(start + Duration::days(i as i64), c))
                .collect(),
        )
    }

    fn zigzag(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64) * 0.5 + if i % 2 == 0 { 2.0 } else { -2.0 })
            .collect()
    }

    #[test]
    fn test_empty_series_returns_no_data() {
        let (set, summary) = compute_indicators(&PriceSeries::empty());
        assert_eq!(set, IndicatorSet::NoData);
        assert_eq!(summary, "No technical data available.");
        assert!(set.to_metrics().is_empty());
    }

    #[test]
    fn test_short_history_leaves_windows_undefined() {
        for n in 1..14 {
            let (set, _) = compute_indicators(&series(&zigzag(n)));
            let ind = set.indicators().unwrap();
            assert_eq!(ind.ma20, None, "n = {n}");
            assert_eq!(ind.ma50, None, "n = {n}");
            assert_eq!(ind.rsi14, None, "n = {n}");
        }

        let (set, _) = compute_indicators(&series(&zigzag(30)));
        let ind = set.indicators().unwrap();
        assert!(ind.ma20.is_some());
        assert_eq!(ind.ma50, None);
        assert!(ind.rsi14.is_some());
    }

    #[test]
    fn test_single_close_has_no_volatility() {
        let (set, summary) = compute_indicators(&series(&[42.0]));
        assert_eq!(set.indicators().unwrap().volatility, None);
        assert!(summary.contains("Volatility: undefined"));
        assert_eq!(set.to_metrics().len(), 4);
    }

    #[test]
    fn test_moving_average_uses_trailing_window() {
        let closes: Vec<f64> = (1..=25).map(f64::from).collect();
        // last 20 values are 6..=25
        assert_eq!(sma(&closes, 20), Some(15.5));
        assert_eq!(sma(&closes[..19], 20), None);
    }

    #[test]
    fn test_rsi_needs_period_deltas() {
        let closes = zigzag(15);
        assert!(rsi(&closes[..14], RSI_PERIOD).is_none());
        assert!(rsi(&closes, RSI_PERIOD).is_some());
    }

    #[test]
    fn test_rsi_undefined_without_losses() {
        let rising: Vec<f64> = (0..40).map(|i| 100.0 + f64::from(i)).collect();
        assert_eq!(rsi(&rising, RSI_PERIOD), None);

        let flat = vec![50.0; 40];
        assert_eq!(rsi(&flat, RSI_PERIOD), None);
    }

    #[test]
    fn test_rsi_bounded_when_defined() {
        let falling: Vec<f64> = (0..40).map(|i| 200.0 - f64::from(i)).collect();
        assert_eq!(rsi(&falling, RSI_PERIOD), Some(0.0));

        for n in 15..80 {
            for value in rsi_series(&zigzag(n), RSI_PERIOD).into_iter().flatten() {
                assert!((0.0..=100.0).contains(&value), "rsi {value} out of range");
            }
        }
    }

    #[test]
    fn test_rsi_known_value() {
        // 14 deltas: seven +2, seven -1 => avg gain 1.0, avg loss 0.5, RS 2
        let mut closes = vec![100.0];
        for i in 0..14 {
            let last = *closes.last().unwrap();
            closes.push(if i % 2 == 0 { last + 2.0 } else { last - 1.0 });
        }
        let value = rsi(&closes, RSI_PERIOD).unwrap();
        assert!((value - 66.666_666).abs() < 1e-4);
    }

    #[test]
    fn test_volatility_is_sample_std() {
        let std = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((std - 2.138_089_935).abs() < 1e-9);
    }

    #[test]
    fn test_metrics_are_rounded() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + f64::from(i) / 3.0).collect();
        let (set, summary) = compute_indicators(&series(&closes));
        let ind = set.indicators().unwrap();

        let ma20 = ind.ma20.unwrap();
        assert!((ma20 * 100.0 - (ma20 * 100.0).round()).abs() < 1e-6);
        let vol = ind.volatility.unwrap();
        assert!((vol * 10_000.0 - (vol * 10_000.0).round()).abs() < 1e-6);
        assert!(summary.starts_with("MA20: "));
        assert!(summary.contains("\nRSI14: undefined\n"));
    }

    #[test]
    fn test_price_summary() {
        assert_eq!(price_summary(&PriceSeries::empty()), "No price data available.");

        let summary = price_summary(&series(&[10.0, 20.0, 30.0]));
        assert_eq!(
            summary,
            "Latest close: 30.00\nAverage close: 20.00\nVolatility: 10.00"
        );
    }

    #[test]
    fn test_rolling_mean_alignment() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(out, vec![None, None, Some(2.0), Some(3.0)]);
        assert_eq!(rolling_mean(&[1.0], 0), vec![None]);
    }
}
