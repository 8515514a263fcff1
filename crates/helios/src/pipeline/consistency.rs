//! Critic consistency label
//!
//! The critic answers in free text. The label is a keyword sniff: any
//! occurrence of "inconsistent" (case-insensitive) means `Low`, everything
//! else means `High`. Nothing produces `Medium`; it exists because readers
//! accept it from older or hand-edited reports.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const LOW_CONSISTENCY_KEYWORD: &str = "inconsistent";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Consistency {
    High,
    Medium,
    Low,
    /// Any label this version does not know
    Other(String),
}

impl Consistency {
    /// Classify critic text
    pub fn classify(critic_text: &str) -> Self {
        if critic_text.to_lowercase().contains(LOW_CONSISTENCY_KEYWORD) {
            Self::Low
        } else {
            Self::High
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Other(label) => label,
        }
    }

    pub fn parse(label: &str) -> Self {
        match label {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Consistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Consistency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Consistency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse(&label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inconsistent_means_low() {
        assert_eq!(
            Consistency::classify("The two analyses are inconsistent with each other."),
            Consistency::Low
        );
        assert_eq!(
            Consistency::classify("Findings look INCONSISTENT."),
            Consistency::Low
        );
    }

    #[test]
    fn test_everything_else_is_high() {
        assert_eq!(Consistency::classify("Both analyses align well."), Consistency::High);
        assert_eq!(Consistency::classify("The analyses are consistent."), Consistency::High);
        assert_eq!(Consistency::classify(""), Consistency::High);
    }

    #[test]
    fn test_labels_round_trip_through_json() {
        for label in ["high", "medium", "low", "mixed"] {
            let parsed: Consistency = serde_json::from_str(&format!("\"{label}\"")).unwrap();
            assert_eq!(serde_json::to_string(&parsed).unwrap(), format!("\"{label}\""));
        }
        assert_eq!(Consistency::parse("mixed"), Consistency::Other("mixed".into()));
    }
}
