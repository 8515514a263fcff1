//! Role-Scoped Agents
//!
//! An agent is a persona (role, goal, backstory) bound to an LLM provider.
//! It performs one task at a time: the persona becomes the system prompt, the
//! task becomes the user message, and the completion text is the result.
//! Agents hold no state between tasks.

use std::sync::Arc;

use crate::error::{AgentError, Result};
use crate::message::{Conversation, Message};
use crate::provider::{GenerationOptions, LlmProvider};

/// Who the agent is and what it is for
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Persona {
    pub role: String,
    pub goal: String,
    pub backstory: String,
}

impl Persona {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
        }
    }

    /// Render as a system prompt
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.role, self.backstory, self.goal
        )
    }
}

/// A unit of work handed to an agent
#[derive(Clone, Debug)]
pub struct Task {
    /// Full instructions, including any input data
    pub description: String,

    /// What a good answer looks like
    pub expected_output: String,
}

impl Task {
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
        }
    }

    /// Render as the user message
    pub fn prompt(&self) -> String {
        format!(
            "{}\n\nThis is the expected criteria for your final answer: {}",
            self.description, self.expected_output
        )
    }
}

/// Agent configuration
#[derive(Clone, Debug, Default)]
pub struct AgentConfig {
    /// Generation options
    pub generation: GenerationOptions,
}

/// A persona bound to a provider
pub struct Agent {
    provider: Arc<dyn LlmProvider>,
    persona: Persona,
    config: AgentConfig,
}

impl Agent {
    pub fn new(provider: Arc<dyn LlmProvider>, persona: Persona, config: AgentConfig) -> Self {
        Self {
            provider,
            persona,
            config,
        }
    }

    /// Build the conversation sent for a task
    fn conversation_for(&self, task: &Task) -> Conversation {
        let mut conversation = Conversation::with_system_prompt(self.persona.system_prompt());
        conversation.push(Message::user(task.prompt()));
        conversation
    }

    /// Perform a task and return the raw completion text
    pub async fn perform(&self, task: &Task) -> Result<String> {
        let conversation = self.conversation_for(task);
        tracing::debug!(
            role = %self.persona.role,
            tokens = conversation.estimate_tokens(),
            "Sending task to provider"
        );

        let completion = self
            .provider
            .complete(conversation.messages(), &self.config.generation)
            .await?;

        if let Some(usage) = completion.usage {
            tracing::debug!(
                role = %self.persona.role,
                model = %completion.model,
                tokens = usage.total(),
                "Provider answered"
            );
        }
        if completion.content.trim().is_empty() {
            tracing::warn!(role = %self.persona.role, "Provider returned an empty completion");
        }

        Ok(completion.content)
    }
}

/// Builder for Agent configuration
#[derive(Default)]
pub struct AgentBuilder {
    provider: Option<Arc<dyn LlmProvider>>,
    persona: Option<Persona>,
    config: AgentConfig,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provider(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn persona(mut self, persona: Persona) -> Self {
        self.persona = Some(persona);
        self
    }

    /// Sampling options used for every task
    pub fn generation(mut self, options: GenerationOptions) -> Self {
        self.config.generation = options;
        self
    }

    pub fn build(self) -> Result<Agent> {
        let provider = self
            .provider
            .ok_or_else(|| AgentError::Config("Provider is required".into()))?;
        let persona = self
            .persona
            .ok_or_else(|| AgentError::Config("Persona is required".into()))?;

        Ok(Agent::new(provider, persona, self.config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;
    use crate::mock::MockProvider;

    fn critic() -> Persona {
        Persona::new(
            "Strategic Critic",
            "Evaluate consistency",
            "Reviewer focused on logic.",
        )
    }

    #[test]
    fn test_persona_prompt_mentions_all_fields() {
        let prompt = critic().system_prompt();
        assert!(prompt.contains("Strategic Critic"));
        assert!(prompt.contains("Evaluate consistency"));
        assert!(prompt.contains("Reviewer focused on logic."));
    }

    #[test]
    fn test_builder_requires_provider() {
        let result = AgentBuilder::new().persona(critic()).build();
        assert!(matches!(result, Err(AgentError::Config(_))));
    }

    #[tokio::test]
    async fn test_perform_sends_system_then_task() {
        let provider = Arc::new(MockProvider::fixed("All good."));
        let agent = AgentBuilder::new()
            .provider(provider.clone())
            .persona(critic())
            .generation(GenerationOptions {
                model: "mistral".into(),
                temperature: 0.2,
                ..Default::default()
            })
            .build()
            .unwrap();

        let answer = agent
            .perform(&Task::new("Review AAPL", "Critique report."))
            .await
            .unwrap();

        assert_eq!(answer, "All good.");
        let calls = provider.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][0].role, Role::System);
        assert_eq!(calls[0][1].role, Role::User);
        assert!(calls[0][1].content.starts_with("Review AAPL"));
        assert!(calls[0][1].content.contains("Critique report."));

        let options = provider.options().await;
        assert_eq!(options[0].model, "mistral");
        assert!((options[0].temperature - 0.2).abs() < f32::EPSILON);
    }
}
