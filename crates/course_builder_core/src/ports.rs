//! crates/course_builder_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the course builder's core logic.
//! These traits form the boundary of the hexagonal architecture, keeping the
//! conversation and structure components independent of any HTTP client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// Classifies failures so callers can phrase them for the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("No API credential is configured")]
    MissingCredential,
    #[error("Could not reach the remote service: {0}")]
    Network(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Prompt Messages
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

/// One message as submitted to a chat-completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: PromptRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: PromptRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: PromptRole::Assistant, content: content.into() }
    }
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait ChatCompletionService: Send + Sync {
    /// Whether a credential is configured. Callers check this before
    /// attempting a request so they can degrade without touching the network.
    fn has_credential(&self) -> bool;

    /// Submits the messages as one non-streaming chat completion and returns
    /// the first choice's text. An empty string means the reply had no content.
    async fn complete(&self, messages: Vec<PromptMessage>) -> PortResult<String>;
}
