//! Run Configuration
//!
//! Everything a run needs is carried by an explicitly constructed
//! [`HeliosConfig`]; nothing is read from globals after startup.

use std::path::PathBuf;
use std::str::FromStr;

use agent_core::GenerationOptions;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{HeliosError, Result};

/// Project tag written into every report
pub const PROJECT_NAME: &str = "Helios AI";

/// Report format version
pub const REPORT_VERSION: &str = "0.1";

/// Ticker analysed when none are given
pub const DEFAULT_TICKER: &str = "AAPL";

#[derive(Clone, Debug)]
pub struct HeliosConfig {
    /// Project tag for report metadata
    pub project: String,

    /// Report format version
    pub version: String,

    /// LLM model identifier
    pub model: String,

    /// Sampling temperature for every agent
    pub temperature: f32,

    /// Directory reports and summaries are written to
    pub reports_dir: PathBuf,

    /// Trailing price window in calendar days
    pub lookback_days: i64,

    /// When the run started; names the portfolio summary
    pub started_at: DateTime<Utc>,

    /// Correlates log lines of one run
    pub run_id: Uuid,
}

impl Default for HeliosConfig {
    fn default() -> Self {
        Self {
            project: PROJECT_NAME.into(),
            version: REPORT_VERSION.into(),
            model: "llama3.2".into(),
            temperature: 0.2,
            reports_dir: PathBuf::from("reports"),
            lookback_days: 90,
            started_at: Utc::now(),
            run_id: Uuid::new_v4(),
        }
    }
}

impl HeliosConfig {
    /// Read overrides from `HELIOS_*` environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            model: env_or("HELIOS_MODEL", defaults.model)?,
            temperature: env_or("HELIOS_TEMPERATURE", defaults.temperature)?,
            reports_dir: env_or("HELIOS_REPORTS_DIR", defaults.reports_dir)?,
            lookback_days: env_or("HELIOS_LOOKBACK_DAYS", defaults.lookback_days)?,
            ..defaults
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_reports_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.reports_dir = dir.into();
        self
    }

    /// Reject values no run could succeed with
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(HeliosError::Config("model must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(HeliosError::Config(format!(
                "temperature {} outside 0.0..=2.0",
                self.temperature
            )));
        }
        if self.lookback_days <= 0 {
            return Err(HeliosError::Config(format!(
                "lookback_days must be positive, got {}",
                self.lookback_days
            )));
        }
        Ok(())
    }

    /// Generation options shared by all three agents
    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            ..Default::default()
        }
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| HeliosError::Config(format!("{key}={raw}: {e}"))),
        _ => Ok(default),
    }
}
