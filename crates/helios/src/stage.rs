//! Per-ticker processing stages
//!
//! ```text
//! Fetching → ComputingIndicators → Stage1Running → Stage2Running
//!          → Stage3Running → WritingReport → Done
//! ```
//!
//! Any stage can fail; a failure is absorbing for that ticker and there is
//! no retry edge.

use serde::{Deserialize, Serialize};

use crate::error::HeliosError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickerStage {
    Fetching,
    ComputingIndicators,
    Stage1Running,
    Stage2Running,
    Stage3Running,
    WritingReport,
    Done,
}

impl TickerStage {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::ComputingIndicators => "computing indicators",
            Self::Stage1Running => "market research",
            Self::Stage2Running => "technical analysis",
            Self::Stage3Running => "critique",
            Self::WritingReport => "writing report",
            Self::Done => "done",
        }
    }
}

impl std::fmt::Display for TickerStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An error tagged with the stage that raised it
#[derive(Debug, thiserror::Error)]
#[error("{stage} failed: {source}")]
pub struct StageError {
    pub stage: TickerStage,
    #[source]
    pub source: HeliosError,
}

impl StageError {
    pub fn new(stage: TickerStage, source: impl Into<HeliosError>) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }
}

/// Attach a stage to any fallible result
pub trait AtStage<T> {
    fn at_stage(self, stage: TickerStage) -> Result<T, StageError>;
}

impl<T, E: Into<HeliosError>> AtStage<T> for Result<T, E> {
    fn at_stage(self, stage: TickerStage) -> Result<T, StageError> {
        self.map_err(|e| StageError::new(stage, e))
    }
}
