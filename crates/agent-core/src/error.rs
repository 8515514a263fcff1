//! Error Types

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Agent error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// LLM provider returned an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unavailable or not responding
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider did not answer within the configured timeout
    #[error("Provider timed out after {0}s")]
    Timeout(u64),

    /// Provider answered with something we could not interpret
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_seconds() {
        assert_eq!(
            AgentError::Timeout(120).to_string(),
            "Provider timed out after 120s"
        );
    }

    #[test]
    fn test_unavailable_message_keeps_detail() {
        let err = AgentError::ProviderUnavailable("http://localhost:11434".into());
        assert!(err.to_string().contains("localhost:11434"));
    }
}
