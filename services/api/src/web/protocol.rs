//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between a browser front end and the
//! API server. Course builder types appear as nested objects in their own
//! camelCase shape.

use chrono::{DateTime, Utc};
use course_builder_core::{ChatMessage, ChatRole, CourseInput, CourseStructure, GeneratedFile};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Conversation Payloads
//=========================================================================================

/// The response payload sent after successfully creating a session.
#[derive(Serialize, ToSchema)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Shown to the user as the assistant's opening turn. It is not part of
    /// the transcript sent to the model.
    pub greeting: String,
}

/// One turn of a session transcript.
#[derive(Serialize, ToSchema)]
pub struct TranscriptEntry {
    /// `user` or `assistant`.
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&ChatMessage> for TranscriptEntry {
    fn from(message: &ChatMessage) -> Self {
        let role = match message.role {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        };
        Self {
            role: role.to_string(),
            content: message.content.clone(),
            timestamp: message.timestamp,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct SessionTranscriptResponse {
    pub session_id: Uuid,
    pub greeting: String,
    pub messages: Vec<TranscriptEntry>,
}

#[derive(Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub text: String,
}

#[derive(Serialize, ToSchema)]
pub struct SendMessageResponse {
    pub reply: String,
    /// Present when the reply contained a complete course request.
    #[schema(value_type = Option<Object>)]
    pub course_input: Option<CourseInput>,
    pub message_count: usize,
}

#[derive(Serialize, ToSchema)]
pub struct ResetSessionResponse {
    pub session_id: Uuid,
    pub greeting: String,
}

//=========================================================================================
// Course Payloads
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct StructureRequest {
    #[schema(value_type = Object)]
    pub input: CourseInput,
}

#[derive(Serialize, ToSchema)]
pub struct StructureResponse {
    #[schema(value_type = Object)]
    pub structure: CourseStructure,
}

/// A reviewed course request together with its outline.
#[derive(Deserialize, ToSchema)]
pub struct GenerateCourseRequest {
    #[schema(value_type = Object)]
    pub structure: CourseStructure,
    #[schema(value_type = Object)]
    pub input: CourseInput,
}

#[derive(Serialize, ToSchema)]
pub struct PreviewFile {
    pub path: String,
    pub contents: String,
}

impl From<&GeneratedFile> for PreviewFile {
    fn from(file: &GeneratedFile) -> Self {
        Self {
            path: file.path.clone(),
            contents: file.contents.clone(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct CoursePreviewResponse {
    pub file_name: String,
    pub generated_at: DateTime<Utc>,
    pub files: Vec<PreviewFile>,
}
