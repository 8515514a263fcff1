//! # agent-core
//!
//! Role-scoped agents over a provider-agnostic LLM abstraction.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                        Agent                         │
//! │  ┌─────────────┐  ┌──────────┐  ┌─────────────────┐  │
//! │  │   Persona   │  │   Task   │──│   LlmProvider   │  │
//! │  │ role / goal │──│  prompt  │  │   (Strategy)    │  │
//! │  └─────────────┘  └──────────┘  └─────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The `LlmProvider` trait lets the same agents run against Ollama or any
//! other chat-completion backend without changing agent logic.

pub mod agent;
pub mod error;
pub mod message;
pub mod mock;
pub mod provider;

pub use agent::{Agent, AgentBuilder, AgentConfig, Persona, Task};
pub use error::{AgentError, Result};
pub use message::{Conversation, Message, Role};
pub use mock::MockProvider;
pub use provider::{GenerationOptions, LlmProvider};
