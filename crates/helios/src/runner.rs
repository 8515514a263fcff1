//! Batch Runner
//!
//! Drives every ticker through the stage machine in input order. A failing
//! ticker becomes a [`TickerFailure`] value and never stops the batch; the
//! portfolio summary is written once, after the last ticker.

use std::path::PathBuf;
use std::sync::Arc;

use agent_core::LlmProvider;
use chrono::Utc;
use serde::Serialize;
use tracing::Instrument;

use crate::config::HeliosConfig;
use crate::error::Result;
use crate::indicators::{compute_indicators, price_summary};
use crate::market::PriceFetcher;
use crate::pipeline::AnalysisCrew;
use crate::report::{PortfolioSummary, ReportBuilder, ReportParts, ReportWriter, SummaryEntry};
use crate::stage::{AtStage, StageError, TickerStage};

/// A report that made it to disk
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportRecord {
    pub ticker: String,
    pub report_file: PathBuf,
}

/// Why a ticker produced no report
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TickerFailure {
    pub ticker: String,
    pub stage: TickerStage,
    pub reason: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TickerOutcome {
    Success(ReportRecord),
    Failure(TickerFailure),
}

impl TickerOutcome {
    pub fn ticker(&self) -> &str {
        match self {
            Self::Success(record) => &record.ticker,
            Self::Failure(failure) => &failure.ticker,
        }
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn to_summary_entry(&self) -> SummaryEntry {
        match self {
            Self::Success(record) => SummaryEntry::Success {
                ticker: record.ticker.clone(),
                report_file: record.report_file.display().to_string(),
            },
            Self::Failure(failure) => SummaryEntry::Error {
                ticker: failure.ticker.clone(),
                error: failure.reason.clone(),
            },
        }
    }
}

/// Result of a whole batch
#[derive(Debug)]
pub struct BatchResult {
    pub outcomes: Vec<TickerOutcome>,
    pub summary: PortfolioSummary,
    pub summary_file: PathBuf,
}

pub struct Runner {
    config: HeliosConfig,
    fetcher: Arc<dyn PriceFetcher>,
    crew: AnalysisCrew,
    builder: ReportBuilder,
    writer: ReportWriter,
}

impl Runner {
    pub fn new(
        config: HeliosConfig,
        fetcher: Arc<dyn PriceFetcher>,
        provider: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        config.validate()?;
        let crew = AnalysisCrew::new(provider, &config)?;
        let builder = ReportBuilder::new(&config);
        let writer = ReportWriter::new(config.reports_dir.clone());

        Ok(Self {
            config,
            fetcher,
            crew,
            builder,
            writer,
        })
    }

    /// Process tickers in order, reporting each outcome as it lands
    pub async fn run_batch<F>(&self, tickers: &[String], mut on_outcome: F) -> Result<BatchResult>
    where
        F: FnMut(&TickerOutcome),
    {
        tracing::info!(
            run_id = %self.config.run_id,
            tickers = tickers.len(),
            source = self.fetcher.name(),
            "Starting batch"
        );

        let mut outcomes = Vec::with_capacity(tickers.len());
        let mut summary = PortfolioSummary::new();

        for ticker in tickers {
            let outcome = self.process_ticker(ticker).await;
            on_outcome(&outcome);
            summary.push(outcome.to_summary_entry());
            outcomes.push(outcome);
        }

        let summary_file = self
            .writer
            .write_summary(&summary, self.config.started_at)
            .await?;

        tracing::info!(
            run_id = %self.config.run_id,
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            summary = %summary_file.display(),
            "Batch complete"
        );

        Ok(BatchResult {
            outcomes,
            summary,
            summary_file,
        })
    }

    /// Run one ticker to completion; never returns an error
    pub async fn process_ticker(&self, ticker: &str) -> TickerOutcome {
        let span = tracing::info_span!("ticker", %ticker, run_id = %self.config.run_id);

        async {
            tracing::info!("Processing");
            match self.try_process(ticker).await {
                Ok(record) => {
                    tracing::info!(report = %record.report_file.display(), "Report saved");
                    TickerOutcome::Success(record)
                }
                Err(err) => {
                    tracing::error!(stage = %err.stage, error = %err.source, "Ticker failed");
                    TickerOutcome::Failure(TickerFailure {
                        ticker: ticker.to_string(),
                        stage: err.stage,
                        reason: err.to_string(),
                    })
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn try_process(&self, ticker: &str) -> std::result::Result<ReportRecord, StageError> {
        let timestamp = Utc::now();

        let prices = self
            .fetcher
            .fetch_history(ticker, self.config.lookback_days)
            .await
            .at_stage(TickerStage::Fetching)?;
        if prices.is_empty() {
            tracing::warn!("No price data; continuing with empty series");
        }

        let (indicators, indicator_summary) = compute_indicators(&prices);
        let price_summary = price_summary(&prices);
        tracing::debug!(points = prices.len(), "Indicators computed");

        let crew = self
            .crew
            .run(ticker, &price_summary, &indicator_summary)
            .await?;

        let report = self.builder.build(&ReportParts {
            ticker,
            timestamp,
            prices: &prices,
            indicators: &indicators,
            price_summary: &price_summary,
            indicator_summary: &indicator_summary,
            crew: &crew,
        });

        let report_file = self
            .writer
            .write_report(&report, timestamp)
            .await
            .at_stage(TickerStage::WritingReport)?;

        Ok(ReportRecord {
            ticker: ticker.to_string(),
            report_file,
        })
    }
}
