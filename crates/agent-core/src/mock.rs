//! Mock LLM Provider
//!
//! For testing and offline demos. Answers are produced by a closure over the
//! request messages; every request is recorded for later assertions.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::message::Message;
use crate::provider::{Completion, GenerationOptions, LlmProvider, ModelInfo};

type Responder = Box<dyn Fn(&[Message]) -> Result<String> + Send + Sync>;

/// Closure-driven provider
pub struct MockProvider {
    responder: Responder,
    calls: Mutex<Vec<Vec<Message>>>,
    options: Mutex<Vec<GenerationOptions>>,
}

impl MockProvider {
    /// Create with a responder closure
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&[Message]) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
            options: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with the same text
    pub fn fixed(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(move |_| Ok(text.clone()))
    }

    /// All recorded requests, oldest first
    pub async fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().await.clone()
    }

    /// Generation options of every request, oldest first
    pub async fn options(&self) -> Vec<GenerationOptions> {
        self.options.lock().await.clone()
    }

    /// Number of completions requested so far
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }

    async fn complete(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<Completion> {
        self.calls.lock().await.push(messages.to_vec());
        self.options.lock().await.push(options.clone());
        let content = (self.responder)(messages)?;

        Ok(Completion {
            content,
            model: options.model.clone(),
            usage: None,
        })
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        Ok(vec![ModelInfo {
            name: "mock".into(),
            size_bytes: None,
        }])
    }
}
