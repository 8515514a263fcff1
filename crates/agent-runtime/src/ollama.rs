//! Ollama LLM Provider
//!
//! Implementation of `LlmProvider` for local Ollama inference via `ollama-rs`.
//! Requests are non-streaming; the underlying HTTP client carries the
//! configured timeout so a hung model surfaces as [`AgentError::Timeout`].

use std::error::Error as StdError;
use std::time::Duration;

use agent_core::{
    error::{AgentError, Result},
    message::{Message, Role},
    provider::{Completion, GenerationOptions, LlmProvider, ModelInfo, TokenUsage},
};
use async_trait::async_trait;
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, ChatMessageResponse, MessageRole, request::ChatMessageRequest},
    models::ModelOptions,
};
use reqwest::Url;

/// Ollama provider configuration
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    /// Ollama host URL
    pub host: String,

    /// Ollama port
    pub port: u16,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            host: "http://localhost".into(),
            port: 11434,
            timeout_secs: 120,
        }
    }
}

impl OllamaConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let host = std::env::var("OLLAMA_HOST").unwrap_or(defaults.host);
        let port = std::env::var("OLLAMA_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let timeout_secs = std::env::var("OLLAMA_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(defaults.timeout_secs);

        Self {
            host,
            port,
            timeout_secs,
        }
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> String {
        format!("{}:{}", self.host.trim_end_matches('/'), self.port)
    }

    /// `ollama-rs` panics on hosts it cannot turn into a base URL
    fn checked_host(&self) -> Result<Url> {
        let url = Url::parse(&self.host)
            .map_err(|e| AgentError::Config(format!("OLLAMA_HOST {:?}: {e}", self.host)))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            return Err(AgentError::Config(format!(
                "OLLAMA_HOST {:?} must be an http(s) URL",
                self.host
            )));
        }
        Ok(url)
    }
}

/// Ollama LLM provider
pub struct OllamaProvider {
    client: Ollama,
    config: OllamaConfig,
}

impl OllamaProvider {
    /// Create from configuration
    pub fn from_config(config: OllamaConfig) -> Result<Self> {
        let host = config.checked_host()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AgentError::Config(format!("HTTP client: {e}")))?;

        Ok(Self {
            client: Ollama::new_with_client(host, config.port, http),
            config,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(OllamaConfig::from_env())
    }

    /// Convert agent messages to Ollama format
    fn convert_messages(messages: &[Message]) -> Vec<ChatMessage> {
        messages
            .iter()
            .map(|m| {
                let role = match m.role {
                    Role::System => MessageRole::System,
                    Role::User => MessageRole::User,
                    Role::Assistant => MessageRole::Assistant,
                };
                ChatMessage::new(role, m.content.clone())
            })
            .collect()
    }

    /// Convert Ollama response to agent completion
    fn convert_completion(response: ChatMessageResponse, model: &str) -> Completion {
        Completion {
            content: response.message.content,
            model: model.to_string(),
            usage: response.final_data.as_ref().map(|d| TokenUsage {
                prompt_tokens: u64::from(d.prompt_eval_count),
                completion_tokens: u64::from(d.eval_count),
            }),
        }
    }

    /// Build Ollama model options
    fn build_options(opts: &GenerationOptions) -> ModelOptions {
        let options = ModelOptions::default()
            .temperature(opts.temperature)
            .top_p(opts.top_p)
            .num_predict(i32::try_from(opts.max_tokens).unwrap_or(i32::MAX));

        if opts.stop_sequences.is_empty() {
            options
        } else {
            options.stop(opts.stop_sequences.clone())
        }
    }

    /// Classify a client error by the transport failure underneath it
    fn map_error(&self, err: &(dyn StdError + 'static)) -> AgentError {
        let mut current = Some(err);
        while let Some(e) = current {
            if let Some(http) = e.downcast_ref::<reqwest::Error>() {
                if http.is_timeout() {
                    return AgentError::Timeout(self.config.timeout_secs);
                }
                if http.is_connect() {
                    return self.unavailable(err);
                }
            }
            if let Some(io) = e.downcast_ref::<std::io::Error>() {
                match io.kind() {
                    std::io::ErrorKind::TimedOut => {
                        return AgentError::Timeout(self.config.timeout_secs);
                    }
                    std::io::ErrorKind::ConnectionRefused
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::NotConnected => return self.unavailable(err),
                    _ => {}
                }
            }
            current = e.source();
        }
        AgentError::Provider(err.to_string())
    }

    fn unavailable(&self, err: &dyn StdError) -> AgentError {
        AgentError::ProviderUnavailable(format!("{}: {err}", self.config.base_url()))
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn health_check(&self) -> Result<bool> {
        match self.list_models().await {
            Ok(_) => Ok(true),
            Err(e) => {
                tracing::warn!("Ollama health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        let request =
            ChatMessageRequest::new(options.model.clone(), Self::convert_messages(messages))
                .options(Self::build_options(options));

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| self.map_error(&e))?;

        Ok(Self::convert_completion(response, &options.model))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let models = self
            .client
            .list_local_models()
            .await
            .map_err(|e| match self.map_error(&e) {
                AgentError::Provider(msg) => AgentError::ProviderUnavailable(msg),
                other => other,
            })?;

        Ok(models
            .into_iter()
            .map(|m| ModelInfo {
                name: m.name,
                size_bytes: Some(m.size),
            })
            .collect())
    }
}
