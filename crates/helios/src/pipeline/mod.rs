//! Agent Pipeline
//!
//! Three role-scoped stages, each a plain function of its input text:
//!
//! ```text
//!  price summary ──► researcher ──┐
//!                                 ├──► critic ──► Critique (+ consistency)
//!  indicator summary ► analyst ───┘
//! ```
//!
//! Researcher and analyst share nothing and run concurrently; the critic
//! sees both outputs and the ticker, nothing else.

mod consistency;

pub use consistency::Consistency;

use std::sync::Arc;

use agent_core::{Agent, AgentBuilder, LlmProvider, Persona, Task};
use serde::{Deserialize, Serialize};

use crate::config::HeliosConfig;
use crate::error::Result;
use crate::stage::{AtStage, StageError, TickerStage};

/// Which agent produced a result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentRole {
    Researcher,
    Analyst,
    Critic,
}

/// Free-text output of one agent
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResult {
    pub role: AgentRole,
    pub text: String,
}

/// Critic output with its consistency label
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Critique {
    pub text: String,
    pub consistency: Consistency,
}

impl Critique {
    pub fn from_text(text: String) -> Self {
        let consistency = Consistency::classify(&text);
        Self { text, consistency }
    }
}

/// Everything the three stages produced for one ticker
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrewOutput {
    pub research: AgentResult,
    pub analysis: AgentResult,
    pub critique: Critique,
}

pub fn researcher_persona() -> Persona {
    Persona::new(
        "Market Researcher",
        "Describe market tone using price data only",
        "Data-grounded analyst. No speculation.",
    )
}

pub fn analyst_persona() -> Persona {
    Persona::new(
        "Quantitative Analyst",
        "Interpret technical indicators strictly",
        "Technical analyst. No sentiment.",
    )
}

pub fn critic_persona() -> Persona {
    Persona::new(
        "Strategic Critic",
        "Evaluate consistency and reliability",
        "Reviewer focused on logical consistency.",
    )
}

pub fn research_task(price_summary: &str) -> Task {
    Task::new(
        format!("Using ONLY the price data below:\n{price_summary}\nReturn 3 bullet points."),
        "Three bullet points.",
    )
}

pub fn analysis_task(indicator_summary: &str) -> Task {
    Task::new(
        format!(
            "Using ONLY the technical indicators below:\n{indicator_summary}\nReturn 3 bullet points."
        ),
        "Three bullet points.",
    )
}

pub fn critique_task(ticker: &str, research: &AgentResult, analysis: &AgentResult) -> Task {
    Task::new(
        format!(
            "Review analysis for {ticker}:\nMarket Research:\n{}\nTechnical Analysis:\n{}",
            research.text, analysis.text
        ),
        "Critique report.",
    )
}

/// The three agents of a run
pub struct AnalysisCrew {
    researcher: Agent,
    analyst: Agent,
    critic: Agent,
}

impl AnalysisCrew {
    pub fn new(provider: Arc<dyn LlmProvider>, config: &HeliosConfig) -> Result<Self> {
        let build = |persona: Persona| {
            AgentBuilder::new()
                .provider(provider.clone())
                .persona(persona)
                .generation(config.generation_options())
                .build()
        };

        Ok(Self {
            researcher: build(researcher_persona())?,
            analyst: build(analyst_persona())?,
            critic: build(critic_persona())?,
        })
    }

    /// Stage 1: commentary on the price summary
    pub async fn research(&self, price_summary: &str) -> Result<AgentResult> {
        let text = self.researcher.perform(&research_task(price_summary)).await?;
        Ok(AgentResult {
            role: AgentRole::Researcher,
            text,
        })
    }

    /// Stage 2: commentary on the indicator summary
    pub async fn analyze(&self, indicator_summary: &str) -> Result<AgentResult> {
        let text = self.analyst.perform(&analysis_task(indicator_summary)).await?;
        Ok(AgentResult {
            role: AgentRole::Analyst,
            text,
        })
    }

    /// Stage 3: review of both commentaries
    pub async fn critique(
        &self,
        ticker: &str,
        research: &AgentResult,
        analysis: &AgentResult,
    ) -> Result<Critique> {
        let text = self
            .critic
            .perform(&critique_task(ticker, research, analysis))
            .await?;
        Ok(Critique::from_text(text))
    }

    /// Run all three stages; a failure names the stage that raised it
    pub async fn run(
        &self,
        ticker: &str,
        price_summary: &str,
        indicator_summary: &str,
    ) -> std::result::Result<CrewOutput, StageError> {
        let research = async {
            self.research(price_summary)
                .await
                .at_stage(TickerStage::Stage1Running)
        };
        let analysis = async {
            self.analyze(indicator_summary)
                .await
                .at_stage(TickerStage::Stage2Running)
        };
        let (research, analysis) = futures::try_join!(research, analysis)?;
        tracing::debug!(%ticker, "Research and analysis complete");

        let critique = self
            .critique(ticker, &research, &analysis)
            .await
            .at_stage(TickerStage::Stage3Running)?;
        tracing::debug!(%ticker, consistency = %critique.consistency, "Critique complete");

        Ok(CrewOutput {
            research,
            analysis,
            critique,
        })
    }
}
