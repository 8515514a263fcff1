//! Report assembly

use chrono::{DateTime, Utc};

use super::{Report, ReportAnalysis, ReportCritique, ReportInputs, ReportMeta, naming};
use crate::config::HeliosConfig;
use crate::indicators::IndicatorSet;
use crate::model::PriceSeries;
use crate::pipeline::CrewOutput;

/// Everything one ticker run produced
pub struct ReportParts<'a> {
    pub ticker: &'a str,
    pub timestamp: DateTime<Utc>,
    pub prices: &'a PriceSeries,
    pub indicators: &'a IndicatorSet,
    pub price_summary: &'a str,
    pub indicator_summary: &'a str,
    pub crew: &'a CrewOutput,
}

/// Stamps run metadata onto assembled reports
#[derive(Clone, Debug)]
pub struct ReportBuilder {
    project: String,
    version: String,
    model: String,
}

impl ReportBuilder {
    pub fn new(config: &HeliosConfig) -> Self {
        Self {
            project: config.project.clone(),
            version: config.version.clone(),
            model: config.model.clone(),
        }
    }

    pub fn build(&self, parts: &ReportParts<'_>) -> Report {
        Report {
            meta: ReportMeta {
                project: self.project.clone(),
                version: self.version.clone(),
                timestamp: naming::iso_timestamp(parts.timestamp),
                ticker: parts.ticker.to_string(),
                model: self.model.clone(),
            },
            inputs: Some(ReportInputs {
                price_summary: parts.price_summary.to_string(),
                technical_indicators: parts.indicator_summary.to_string(),
            }),
            metrics: parts.indicators.to_metrics(),
            analysis: ReportAnalysis {
                market_researcher: parts.crew.research.text.clone(),
                technical_analysis: parts.crew.analysis.text.clone(),
            },
            critique: ReportCritique {
                strategic_critic: parts.crew.critique.text.clone(),
                consistency: parts.crew.critique.consistency.clone(),
            },
            price_data: parts.prices.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::compute_indicators;
    use crate::pipeline::{AgentResult, AgentRole, Consistency, Critique};
    use chrono::TimeZone;

    fn crew() -> CrewOutput {
        CrewOutput {
            research: AgentResult {
                role: AgentRole::Researcher,
                text: "- r".into(),
            },
            analysis: AgentResult {
                role: AgentRole::Analyst,
                text: "- a".into(),
            },
            critique: Critique::from_text("Both analyses align well.".into()),
        }
    }

    #[test]
    fn test_empty_series_builds_degraded_report() {
        let prices = PriceSeries::empty();
        let (indicators, summary) = compute_indicators(&prices);
        let crew = crew();
        let parts = ReportParts {
            ticker: "NOTREAL",
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            prices: &prices,
            indicators: &indicators,
            price_summary: "No price data available.",
            indicator_summary: &summary,
            crew: &crew,
        };

        let report = ReportBuilder::new(&HeliosConfig::default()).build(&parts);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["meta"]["project"], "Helios AI");
        assert_eq!(json["meta"]["ticker"], "NOTREAL");
        assert_eq!(json["meta"]["timestamp"], "2024-01-02T03:04:05.000000");
        assert_eq!(json["metrics"], serde_json::json!({}));
        assert_eq!(json["price_data"], serde_json::json!([]));
        assert_eq!(json["critique"]["consistency"], "high");
        assert_eq!(
            json["inputs"]["technical_indicators"],
            "No technical data available."
        );
        assert_eq!(report.critique.consistency, Consistency::High);
    }
}
