//! Report view model
//!
//! Everything a dashboard page shows for one report, with placeholders
//! already filled in. Built only from documents that passed validation, but
//! still tolerant of missing or oddly-typed inner fields.

use serde::Serialize;
use serde_json::Value;

use super::chart::ChartData;
use super::metrics::MetricsTable;
use crate::pipeline::Consistency;

pub const MISSING_META: &str = "—";
pub const NO_OUTPUT: &str = "No output";
pub const NO_CRITIQUE: &str = "No critique";
pub const NO_METRICS_NOTICE: &str = "No metrics found";
pub const NO_PRICE_DATA_NOTICE: &str = "No price data available for charts";
pub const CHART_UNAVAILABLE_NOTICE: &str = "Unable to render charts";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewMeta {
    pub ticker: String,
    pub model: String,
    pub version: String,
    pub timestamp: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerLevel {
    Success,
    Warning,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ConsistencyBanner {
    pub label: String,
    pub level: BannerLevel,
    pub message: &'static str,
}

impl ConsistencyBanner {
    pub fn from_label(label: &str) -> Self {
        let (level, message) = match Consistency::parse(label) {
            Consistency::High => (BannerLevel::Success, "High agent agreement"),
            Consistency::Medium => (BannerLevel::Warning, "Partial disagreement"),
            Consistency::Low => (BannerLevel::Error, "Low consistency"),
            Consistency::Other(_) => (BannerLevel::Info, "Consistency not classified"),
        };
        Self {
            label: label.to_string(),
            level,
            message,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportView {
    pub meta: ViewMeta,
    pub metrics: MetricsTable,
    pub metrics_notice: Option<&'static str>,
    pub chart: Option<ChartData>,
    pub chart_notice: Option<&'static str>,
    pub market_researcher: String,
    pub technical_analysis: String,
    pub strategic_critic: String,
    pub consistency: ConsistencyBanner,
}

impl ReportView {
    pub fn from_report(report: &Value) -> Self {
        let meta = report.get("meta");
        let analysis = report.get("analysis");
        let critique = report.get("critique");

        let metrics = MetricsTable::from_report(report);
        let metrics_notice = metrics.is_empty().then_some(NO_METRICS_NOTICE);

        let price_data = report.get("price_data");
        let has_prices = price_data.is_some_and(|v| !is_blank(v));
        let chart = price_data.and_then(ChartData::from_price_data);
        let chart_notice = match (has_prices, &chart) {
            (false, _) => Some(NO_PRICE_DATA_NOTICE),
            (true, None) => Some(CHART_UNAVAILABLE_NOTICE),
            (true, Some(_)) => None,
        };

        let consistency = critique
            .and_then(|c| c.get("consistency"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");

        Self {
            meta: ViewMeta {
                ticker: text(meta, "ticker", MISSING_META),
                model: text(meta, "model", MISSING_META),
                version: text(meta, "version", MISSING_META),
                timestamp: text(meta, "timestamp", MISSING_META),
            },
            metrics,
            metrics_notice,
            chart,
            chart_notice,
            market_researcher: text(analysis, "market_researcher", NO_OUTPUT),
            technical_analysis: text(analysis, "technical_analysis", NO_OUTPUT),
            strategic_critic: text(critique, "strategic_critic", NO_CRITIQUE),
            consistency: ConsistencyBanner::from_label(consistency),
        }
    }
}

/// String field of a section, the placeholder when absent, JSON text otherwise
fn text(section: Option<&Value>, key: &str, placeholder: &str) -> String {
    match section.and_then(|s| s.get(key)) {
        None => placeholder.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}
