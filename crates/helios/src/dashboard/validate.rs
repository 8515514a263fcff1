//! Report validation
//!
//! Readers check the top-level shape before rendering anything.

use serde::Serialize;
use serde_json::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldRule {
    pub key: &'static str,
    pub required: bool,
}

impl FieldRule {
    const fn required(key: &'static str) -> Self {
        Self { key, required: true }
    }

    const fn optional(key: &'static str) -> Self {
        Self {
            key,
            required: false,
        }
    }
}

/// Top-level report fields, in the order they are checked
pub const REPORT_SCHEMA: &[FieldRule] = &[
    FieldRule::required("meta"),
    FieldRule::optional("inputs"),
    FieldRule::optional("metrics"),
    FieldRule::required("analysis"),
    FieldRule::required("critique"),
    FieldRule::required("price_data"),
];

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Validation {
    /// Document is not a JSON object at all
    pub not_object: bool,
    /// Required keys absent, in schema order
    pub missing: Vec<&'static str>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        !self.not_object && self.missing.is_empty()
    }

    /// First problem, phrased for display
    pub fn message(&self) -> Option<String> {
        if self.not_object {
            return Some("Report is not a JSON object".to_string());
        }
        self.missing.first().map(|key| format!("Missing key: {key}"))
    }
}

pub fn validate(report: &Value) -> Validation {
    let Some(object) = report.as_object() else {
        return Validation {
            not_object: true,
            missing: Vec::new(),
        };
    };

    let missing = REPORT_SCHEMA
        .iter()
        .filter(|rule| rule.required && !object.contains_key(rule.key))
        .map(|rule| rule.key)
        .collect();

    Validation {
        not_object: false,
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_report_is_valid() {
        let doc = json!({"meta": {}, "analysis": {}, "critique": {}, "price_data": []});
        let validation = validate(&doc);
        assert!(validation.is_valid());
        assert_eq!(validation.message(), None);
    }

    #[test]
    fn test_missing_key_is_named() {
        let doc = json!({"meta": {}, "analysis": {}, "price_data": []});
        let validation = validate(&doc);
        assert!(!validation.is_valid());
        assert_eq!(validation.message().as_deref(), Some("Missing key: critique"));
    }

    #[test]
    fn test_all_missing_keys_listed_in_order() {
        let validation = validate(&json!({"metrics": {}}));
        assert_eq!(
            validation.missing,
            ["meta", "analysis", "critique", "price_data"]
        );
        assert_eq!(validation.message().as_deref(), Some("Missing key: meta"));
    }

    #[test]
    fn test_non_object_is_invalid() {
        let validation = validate(&json!([1, 2, 3]));
        assert!(validation.not_object);
        assert!(!validation.is_valid());
    }
}
