//! # helios
//!
//! Technical indicators, a three-agent analysis pipeline and JSON reports for
//! stock tickers.
//!
//! ## Per-ticker flow
//!
//! ```text
//! ┌─────────────┐   ┌────────────┐   ┌──────────────────────────┐   ┌──────────┐
//! │ PriceFetcher│──►│ Indicators │──►│ researcher ─┐            │──►│  Report  │
//! │ (Yahoo/mock)│   │ MA/RSI/vol │   │ analyst ────┴─► critic   │   │  (JSON)  │
//! └─────────────┘   └────────────┘   └──────────────────────────┘   └──────────┘
//! ```
//!
//! Tickers run one after another. A failing ticker is recorded in the
//! portfolio summary and the batch moves on; the summary is written last.
//!
//! The [`dashboard`] module is the read side: it lists, validates and shapes
//! persisted reports for display.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod indicators;
pub mod market;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod runner;
pub mod stage;

pub use config::{DEFAULT_TICKER, HeliosConfig};
pub use dashboard::{ChartData, MetricsTable, ReportCatalog, ReportEntry, ReportView, Validation};
pub use error::{HeliosError, Result};
pub use indicators::{IndicatorSet, Indicators, compute_indicators, price_summary};
pub use market::{MockPriceFetcher, PriceFetcher, YahooPriceFetcher};
pub use model::{PricePoint, PriceSeries};
pub use pipeline::{AgentResult, AgentRole, AnalysisCrew, Consistency, CrewOutput, Critique};
pub use report::{PortfolioSummary, Report, ReportWriter, SummaryEntry};
pub use runner::{BatchResult, ReportRecord, Runner, TickerFailure, TickerOutcome};
pub use stage::{StageError, TickerStage};
