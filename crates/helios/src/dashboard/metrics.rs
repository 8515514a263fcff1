//! Metrics table

use serde::Serialize;
use serde_json::Value;

pub const METRICS_COLUMNS: [&str; 2] = ["Metric", "Value"];

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricRow {
    #[serde(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Value")]
    pub value: Value,
}

/// Two-column view of a report's `metrics` object
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MetricsTable {
    pub columns: [&'static str; 2],
    pub rows: Vec<MetricRow>,
}

impl MetricsTable {
    /// Absent, empty or non-object metrics give an empty table
    pub fn from_report(report: &Value) -> Self {
        let rows = report
            .get("metrics")
            .and_then(Value::as_object)
            .map(|metrics| {
                metrics
                    .iter()
                    .map(|(metric, value)| MetricRow {
                        metric: metric.clone(),
                        value: value.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            columns: METRICS_COLUMNS,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

pub fn metrics_table(report: &Value) -> MetricsTable {
    MetricsTable::from_report(report)
}
