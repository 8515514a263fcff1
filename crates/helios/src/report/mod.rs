//! Report Schema
//!
//! One JSON document per ticker per run:
//!
//! ```text
//! {
//!   "meta":       {"project", "version", "timestamp", "ticker", "model"},
//!   "inputs":     {"price_summary", "technical_indicators"},   optional
//!   "metrics":    {"MA20", "MA50", "RSI14", "Volatility"},      optional, may be {}
//!   "analysis":   {"market_researcher", "technical_analysis"},
//!   "critique":   {"strategic_critic", "consistency"},
//!   "price_data": [{"Date", "Close"}, ...]
//! }
//! ```

mod builder;
mod naming;
mod summary;
mod writer;

pub use builder::{ReportBuilder, ReportParts};
pub use naming::{
    SUMMARY_PREFIX, file_safe_timestamp, iso_timestamp, report_file_name, sanitize_ticker,
    summary_file_name,
};
pub use summary::{PortfolioSummary, SummaryEntry};
pub use writer::ReportWriter;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::PriceSeries;
use crate::pipeline::Consistency;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    pub project: String,
    pub version: String,
    pub timestamp: String,
    pub ticker: String,
    pub model: String,
}

/// Exact text the agents were given
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportInputs {
    pub price_summary: String,
    pub technical_indicators: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAnalysis {
    pub market_researcher: String,
    pub technical_analysis: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportCritique {
    pub strategic_critic: String,
    pub consistency: Consistency,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub meta: ReportMeta,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<ReportInputs>,

    #[serde(default)]
    pub metrics: BTreeMap<String, Option<f64>>,

    pub analysis: ReportAnalysis,
    pub critique: ReportCritique,
    pub price_data: PriceSeries,
}
