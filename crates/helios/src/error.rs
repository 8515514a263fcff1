//! Error Types for Helios

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeliosError>;

#[derive(Error, Debug)]
pub enum HeliosError {
    #[error("Market data error for {ticker}: {reason}")]
    MarketData { ticker: String, reason: String },

    #[error(transparent)]
    Agent(#[from] agent_core::AgentError),

    #[error("Invalid report name: {0}")]
    InvalidReportName(String),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
