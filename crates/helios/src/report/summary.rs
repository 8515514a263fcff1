//! Portfolio summary
//!
//! Append-only list of per-ticker outcomes, in input order, written once
//! after every ticker has been attempted.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SummaryEntry {
    Success { ticker: String, report_file: String },
    Error { ticker: String, error: String },
}

impl SummaryEntry {
    pub fn ticker(&self) -> &str {
        match self {
            Self::Success { ticker, .. } | Self::Error { ticker, .. } => ticker,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PortfolioSummary {
    entries: Vec<SummaryEntry>,
}

impl PortfolioSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: SummaryEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
