//! Report persistence
//!
//! Documents are written to a temporary sibling and renamed into place, so a
//! reader listing the directory never sees a half-written report.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{PortfolioSummary, Report, naming};
use crate::error::Result;

#[derive(Clone, Debug)]
pub struct ReportWriter {
    dir: PathBuf,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one ticker report, returning its path
    pub async fn write_report(&self, report: &Report, timestamp: DateTime<Utc>) -> Result<PathBuf> {
        let name = naming::report_file_name(&report.meta.ticker, timestamp);
        self.write_json(&name, report).await
    }

    /// Write the portfolio summary for a run, returning its path
    pub async fn write_summary(
        &self,
        summary: &PortfolioSummary,
        started_at: DateTime<Utc>,
    ) -> Result<PathBuf> {
        let name = naming::summary_file_name(started_at);
        self.write_json(&name, summary).await
    }

    async fn write_json<T: Serialize + Sync>(&self, name: &str, value: &T) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let body = serde_json::to_vec_pretty(value)?;
        let path = self.dir.join(name);
        let tmp = self.dir.join(format!(".{name}.tmp"));

        tokio::fs::write(&tmp, body).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), "Wrote report file");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ReportAnalysis, ReportCritique, ReportMeta, SummaryEntry};
    use crate::model::PriceSeries;
    use crate::pipeline::Consistency;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 14, 3, 9).unwrap()
    }

    fn report(ticker: &str) -> Report {
        Report {
            meta: ReportMeta {
                project: "Helios AI".into(),
                version: "0.1".into(),
                timestamp: naming::iso_timestamp(ts()),
                ticker: ticker.into(),
                model: "llama3.2".into(),
            },
            inputs: None,
            metrics: std::collections::BTreeMap::new(),
            analysis: ReportAnalysis {
                market_researcher: "- r".into(),
                technical_analysis: "- a".into(),
            },
            critique: ReportCritique {
                strategic_critic: "ok".into(),
                consistency: Consistency::High,
            },
            price_data: PriceSeries::empty(),
        }
    }

    #[tokio::test]
    async fn test_write_report_creates_dir_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(tmp.path().join("nested/reports"));

        let path = writer.write_report(&report("AAPL"), ts()).await.unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "AAPL_2024-05-17T14-03-09.000000.json"
        );
        let raw = std::fs::read_to_string(&path).unwrap();
        let back: Report = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.meta.ticker, "AAPL");

        let leftovers: Vec<_> = std::fs::read_dir(writer.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_write_summary_named_by_run_start() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(tmp.path());
        let mut summary = PortfolioSummary::new();
        summary.push(SummaryEntry::Error {
            ticker: "MSFT".into(),
            error: "boom".into(),
        });

        let path = writer.write_summary(&summary, ts()).await.unwrap();

        assert!(
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("portfolio_summary_2024-05-17T14-03-09")
        );
        let raw = std::fs::read_to_string(&path).unwrap();
        let back: PortfolioSummary = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, summary);
    }
}
