//! services/api/src/adapters/chat_llm.rs
//!
//! This module contains the adapter for the remote chat-completion endpoint.
//! It implements the `ChatCompletionService` port from the `core` crate
//! against any OpenAI-compatible API (Groq by default).

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use course_builder_core::ports::{
    ChatCompletionService, PortError, PortResult, PromptMessage, PromptRole,
};
use tracing::{info, warn};

use crate::config::Config;

/// Sampling parameters sent with every request.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl ChatSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.chat_model.clone(),
            temperature: config.chat_temperature,
            max_tokens: config.chat_max_tokens,
            top_p: config.chat_top_p,
        }
    }
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ChatCompletionService` using an OpenAI-compatible LLM.
///
/// Without an API key no client is built and every request fails fast with
/// `PortError::MissingCredential`.
#[derive(Clone)]
pub struct OpenAiChatAdapter {
    client: Option<Client<OpenAIConfig>>,
    settings: ChatSettings,
}

impl OpenAiChatAdapter {
    pub fn new(api_key: Option<&str>, api_base: &str, settings: ChatSettings) -> Self {
        let client = api_key.map(|key| {
            let openai_config = OpenAIConfig::new()
                .with_api_key(key)
                .with_api_base(api_base);
            Client::with_config(openai_config)
        });
        Self { client, settings }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.chat_api_key.as_deref(),
            &config.chat_api_base,
            ChatSettings::from_config(config),
        )
    }
}

fn to_request_message(message: PromptMessage) -> PortResult<ChatCompletionRequestMessage> {
    let built: ChatCompletionRequestMessage = match message.role {
        PromptRole::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into(),
        PromptRole::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.content)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into(),
        PromptRole::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
            .content(message.content)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into(),
    };
    Ok(built)
}

/// Sorts a client error into the port's failure classes.
fn classify_error(error: OpenAIError) -> PortError {
    match error {
        OpenAIError::Reqwest(e) => PortError::Network(e.to_string()),
        other => {
            let detail = other.to_string();
            if is_auth_failure(&detail) {
                PortError::Unauthorized
            } else {
                PortError::Unexpected(detail)
            }
        }
    }
}

fn is_auth_failure(detail: &str) -> bool {
    let detail = detail.to_lowercase();
    ["invalid_api_key", "invalid api key", "incorrect api key", "unauthorized", "401"]
        .iter()
        .any(|marker| detail.contains(marker))
}

//=========================================================================================
// `ChatCompletionService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ChatCompletionService for OpenAiChatAdapter {
    fn has_credential(&self) -> bool {
        self.client.is_some()
    }

    async fn complete(&self, messages: Vec<PromptMessage>) -> PortResult<String> {
        let client = self.client.as_ref().ok_or(PortError::MissingCredential)?;

        let message_count = messages.len();
        let messages = messages
            .into_iter()
            .map(to_request_message)
            .collect::<PortResult<Vec<_>>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.settings.model)
            .messages(messages)
            .temperature(self.settings.temperature)
            .top_p(self.settings.top_p)
            .max_completion_tokens(self.settings.max_tokens)
            .stream(false)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        info!(model = %self.settings.model, messages = message_count, "Sending chat completion request.");

        let response = client.chat().create(request).await.map_err(|e| {
            let classified = classify_error(e);
            warn!("Chat completion request failed: {}", classified);
            classified
        })?;

        Ok(response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .unwrap_or_default())
    }
}
