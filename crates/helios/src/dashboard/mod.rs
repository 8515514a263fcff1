//! Dashboard Reader
//!
//! Read side of the reports directory. Nothing here writes; documents are
//! handled as raw JSON so that malformed reports can be reported back
//! instead of failing deserialization.

mod chart;
mod metrics;
mod validate;
mod view;

pub use chart::{ChartData, RSI_OVERBOUGHT, RSI_OVERSOLD};
pub use metrics::{METRICS_COLUMNS, MetricRow, MetricsTable, metrics_table};
pub use validate::{FieldRule, REPORT_SCHEMA, Validation, validate};
pub use view::{BannerLevel, ConsistencyBanner, ReportView, ViewMeta};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::{HeliosError, Result};
use crate::report::SUMMARY_PREFIX;

/// One selectable report
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub file: String,
    pub ticker: String,
    pub timestamp: String,
}

impl ReportEntry {
    /// Parse `<ticker>_<timestamp>.json`; anything else is not a report
    pub fn from_file_name(file: &str) -> Option<Self> {
        if file.starts_with(SUMMARY_PREFIX.trim_end_matches('_')) {
            return None;
        }
        let stem = file.strip_suffix(".json")?;
        let (ticker, timestamp) = stem.split_once('_')?;
        Some(Self {
            file: file.to_string(),
            ticker: ticker.to_string(),
            timestamp: timestamp.to_string(),
        })
    }
}

/// Reports directory as seen by the dashboard
#[derive(Clone, Debug)]
pub struct ReportCatalog {
    dir: PathBuf,
}

impl ReportCatalog {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reports newest first; a missing directory is simply empty
    pub async fn list(&self) -> Result<Vec<ReportEntry>> {
        let mut dir = match tokio::fs::read_dir(&self.dir).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut entries = Vec::new();
        while let Some(item) = dir.next_entry().await? {
            let name = item.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(entry) = ReportEntry::from_file_name(name) {
                entries.push(entry);
            }
        }

        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(entries)
    }

    /// Read and parse one report by file name
    pub async fn load(&self, file: &str) -> Result<Value> {
        check_file_name(file)?;

        let raw = match tokio::fs::read_to_string(self.dir.join(file)).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(HeliosError::ReportNotFound(file.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Only bare file names inside the reports directory are readable
fn check_file_name(file: &str) -> Result<()> {
    let bad = file.is_empty()
        || file == "."
        || file == ".."
        || file.contains('/')
        || file.contains('\\')
        || Path::new(file).is_absolute();
    if bad {
        return Err(HeliosError::InvalidReportName(file.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str, body: &str) {
        std::fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn test_entry_from_file_name() {
        let entry = ReportEntry::from_file_name("AAPL_2024-05-17T14-03-09.000042.json").unwrap();
        assert_eq!(entry.ticker, "AAPL");
        assert_eq!(entry.timestamp, "2024-05-17T14-03-09.000042");

        assert!(ReportEntry::from_file_name("portfolio_summary_2024.json").is_none());
        assert!(ReportEntry::from_file_name("notes.txt").is_none());
        assert!(ReportEntry::from_file_name("README.json").is_none());
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts_newest_first() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "AAPL_2024-01-01T00-00-00.000000.json", "{}");
        touch(tmp.path(), "MSFT_2024-03-01T00-00-00.000000.json", "{}");
        touch(tmp.path(), "portfolio_summary_2024-03-02T00-00-00.000000.json", "[]");
        touch(tmp.path(), "scratch.txt", "");

        let entries = ReportCatalog::new(tmp.path()).list().await.unwrap();

        let tickers: Vec<_> = entries.iter().map(|e| e.ticker.as_str()).collect();
        assert_eq!(tickers, ["MSFT", "AAPL"]);
    }

    #[tokio::test]
    async fn test_list_missing_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let catalog = ReportCatalog::new(tmp.path().join("absent"));
        assert!(catalog.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_rejects_traversal() {
        let tmp = tempfile::tempdir().unwrap();
        let catalog = ReportCatalog::new(tmp.path());

        for name in ["../secret.json", "a/b.json", "..", ".", "", "/etc/passwd", "..\\x.json"] {
            assert!(
                matches!(
                    catalog.load(name).await,
                    Err(HeliosError::InvalidReportName(_))
                ),
                "{name}"
            );
        }
    }

    #[tokio::test]
    async fn test_listed_names_with_dots_are_loadable() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "A..B_2024-05-17T14-03-09.000042.json", r#"{"meta": {}}"#);
        let catalog = ReportCatalog::new(tmp.path());

        let entries = catalog.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].ticker, "A..B");
        assert!(catalog.load(&entries[0].file).await.is_ok());
    }

    #[tokio::test]
    async fn test_load_missing_and_present() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "AAPL_x.json", r#"{"meta": {"ticker": "AAPL"}}"#);
        let catalog = ReportCatalog::new(tmp.path());

        let doc = catalog.load("AAPL_x.json").await.unwrap();
        assert_eq!(doc["meta"]["ticker"], "AAPL");

        assert!(matches!(
            catalog.load("MSFT_x.json").await,
            Err(HeliosError::ReportNotFound(_))
        ));
    }
}
