//! crates/course_builder_core/src/conversation.rs
//!
//! The conversation client: keeps a linear chat with the remote course-design
//! model and opportunistically pulls a structured course request out of its
//! replies. Every upstream failure is turned into a user-facing reply string.

use crate::domain::{
    lenient_string, lenient_string_list, ChatMessage, ChatRole, CourseInput, SkillLevel,
};
use crate::error::{CourseError, CourseResult};
use crate::extract::first_json_object;
use crate::ports::{ChatCompletionService, PortError, PromptMessage};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// The first assistant message shown to a new or reset conversation.
/// It is presentation only and never sent to the model.
pub const GREETING: &str = "Hello! I'm your AI course designer. I'm here to help you create a personalized learning experience. What would you like to learn? You can tell me about any subject - from physics and chemistry to programming, history, or anything else that interests you!";

const SYSTEM_PROMPT: &str = r#"You are an expert educational course designer AI assistant for LEARN.EXE, a universal course learning app builder. Your role is to help users create comprehensive, interactive learning experiences.

CORE RESPONSIBILITIES:
1. Understand what the user wants to learn through natural conversation
2. Extract key course parameters from their input
3. Provide helpful suggestions and clarifications
4. Generate structured course analysis for the learning app builder

CONVERSATION GUIDELINES:
- Be friendly, encouraging, and educational
- Ask clarifying questions when needed
- Suggest realistic learning objectives and timelines
- Recommend appropriate skill levels based on user background
- Identify key focus areas that would enhance learning

COURSE ANALYSIS FORMAT:
When ready to analyze a course request, respond with a JSON object containing:
{
  "subject": "Clear subject name",
  "objectives": "Specific learning goals and outcomes",
  "skillLevel": "beginner|intermediate|advanced",
  "duration": "Realistic timeframe (e.g., '4 weeks', '2 months')",
  "focusAreas": ["specific", "focus", "areas"],
  "confidence": 0.8
}

IMPORTANT: Only provide the JSON analysis when you have enough information to create a meaningful course. Otherwise, continue the conversation to gather more details."#;

const MISSING_KEY_MESSAGE: &str = r#"🔑 **API Key Required**

To use the AI course designer, the server needs a Groq API key:

1. Create a `.env` file next to the service (or export the variable)
2. Add: `GROQ_API_KEY=your_actual_groq_api_key_here`
3. Restart the service

**Get your free API key:** [https://console.groq.com/](https://console.groq.com/)

Once configured, I'll be able to help you design amazing courses! 🚀"#;

const NETWORK_FAILURE_MESSAGE: &str =
    "I'm having trouble connecting to the AI service. Please check your network connection.";
const UNAUTHORIZED_MESSAGE: &str =
    "Invalid API key. Please check the GROQ_API_KEY setting of the service.";
const EMPTY_REPLY_MESSAGE: &str = "I apologize, but I encountered an error. Please try again.";

//=========================================================================================
// Session
//=========================================================================================

/// One user's conversation with the course designer.
///
/// The transcript only ever grows, except through [`ConversationSession::reset`].
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    transcript: Vec<ChatMessage>,
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            transcript: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn len(&self) -> usize {
        self.transcript.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    /// The most recent assistant turn, if any.
    pub fn latest_reply(&self) -> Option<&ChatMessage> {
        self.transcript.iter().rev().find(|m| m.role == ChatRole::Assistant)
    }

    /// Clears the transcript. Re-seeding the greeting is up to the caller.
    pub fn reset(&mut self) {
        self.transcript.clear();
    }

    fn prompt_messages(&self) -> Vec<PromptMessage> {
        let mut messages = Vec::with_capacity(self.transcript.len() + 1);
        messages.push(PromptMessage::system(SYSTEM_PROMPT));
        messages.extend(self.transcript.iter().map(|m| match m.role {
            ChatRole::User => PromptMessage::user(m.content.clone()),
            ChatRole::Assistant => PromptMessage::assistant(m.content.clone()),
        }));
        messages
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================================
// Client
//=========================================================================================

/// Sends conversation turns to the remote model. Holds no conversation state
/// of its own; every call works on the session it is handed.
#[derive(Clone)]
pub struct ConversationClient {
    service: Arc<dyn ChatCompletionService>,
}

impl ConversationClient {
    pub fn new(service: Arc<dyn ChatCompletionService>) -> Self {
        Self { service }
    }

    /// Records `user_text` in the session, submits the whole transcript and
    /// returns the assistant's reply.
    ///
    /// Only blank input is an error. A missing credential yields setup
    /// instructions (without recording the turn), and remote failures yield an
    /// apology describing the failure class.
    pub async fn send_message(
        &self,
        session: &mut ConversationSession,
        user_text: &str,
    ) -> CourseResult<String> {
        let user_text = user_text.trim();
        if user_text.is_empty() {
            return Err(CourseError::EmptyMessage);
        }

        if !self.service.has_credential() {
            warn!("Chat request skipped: no API credential configured.");
            return Ok(MISSING_KEY_MESSAGE.to_string());
        }

        session.transcript.push(ChatMessage::user(user_text));
        let messages = session.prompt_messages();
        info!(session_id = %session.id, messages = messages.len(), "Sending conversation turn.");

        match self.service.complete(messages).await {
            Ok(reply) => {
                let reply = if reply.trim().is_empty() {
                    warn!(session_id = %session.id, "Model reply had no content.");
                    EMPTY_REPLY_MESSAGE.to_string()
                } else {
                    reply
                };
                session.transcript.push(ChatMessage::assistant(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                error!(session_id = %session.id, "Chat completion failed: {}", e);
                Ok(failure_message(&e))
            }
        }
    }
}

fn failure_message(error: &PortError) -> String {
    match error {
        PortError::MissingCredential => MISSING_KEY_MESSAGE.to_string(),
        PortError::Network(_) => NETWORK_FAILURE_MESSAGE.to_string(),
        PortError::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
        PortError::Unexpected(detail) => {
            format!("I encountered an error: {}. Please try again.", detail)
        }
    }
}

//=========================================================================================
// Course Description Extraction
//=========================================================================================

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct CourseAnalysis {
    #[serde(deserialize_with = "lenient_string")]
    subject: String,
    #[serde(deserialize_with = "lenient_string")]
    objectives: String,
    #[serde(deserialize_with = "lenient_string")]
    skill_level: String,
    #[serde(deserialize_with = "lenient_string")]
    duration: String,
    #[serde(deserialize_with = "lenient_string_list")]
    focus_areas: Vec<String>,
}

/// Looks for a course request embedded in an assistant reply.
///
/// Accepts the first JSON object in the text only if `subject`, `objectives`
/// and `skillLevel` are present and non-empty. Anything else, including
/// malformed JSON, is treated as ordinary conversation and yields `None`.
pub fn extract_course_description(assistant_text: &str) -> Option<CourseInput> {
    let value = first_json_object(assistant_text)?;
    let analysis: CourseAnalysis = match serde_json::from_value(value) {
        Ok(analysis) => analysis,
        Err(e) => {
            debug!("Embedded JSON is not a course analysis: {}", e);
            return None;
        }
    };

    if analysis.subject.trim().is_empty()
        || analysis.objectives.trim().is_empty()
        || analysis.skill_level.trim().is_empty()
    {
        debug!("Embedded JSON lacks subject, objectives or skillLevel.");
        return None;
    }

    let skill_level = SkillLevel::from_label(&analysis.skill_level).unwrap_or_else(|| {
        warn!("Unrecognized skill level '{}', using beginner.", analysis.skill_level);
        SkillLevel::default()
    });

    let mut input = CourseInput {
        subject: analysis.subject.trim().to_string(),
        objectives: analysis.objectives.trim().to_string(),
        skill_level,
        duration: analysis.duration.trim().to_string(),
        focus_areas: Vec::new(),
    };
    for area in &analysis.focus_areas {
        input.add_focus_area(area);
    }
    info!(subject = %input.subject, "Extracted course description from reply.");
    Some(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::PromptRole;
    use crate::test_support::ScriptedChatService;

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let service = Arc::new(ScriptedChatService::new(vec![]));
        let client = ConversationClient::new(service.clone());
        let mut session = ConversationSession::new();

        let result = client.send_message(&mut session, "   ").await;
        assert!(matches!(result, Err(CourseError::EmptyMessage)));
        assert!(session.is_empty());
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_credential_returns_instructions_without_calling_out() {
        let service = Arc::new(ScriptedChatService::without_credential());
        let client = ConversationClient::new(service.clone());
        let mut session = ConversationSession::new();

        let reply = client.send_message(&mut session, "I want to learn Rust").await.unwrap();
        assert!(reply.contains("GROQ_API_KEY"));
        assert!(session.is_empty());
        assert_eq!(service.call_count(), 0);
    }

    #[tokio::test]
    async fn transcript_grows_and_is_sent_with_system_prompt() {
        let service = Arc::new(ScriptedChatService::new(vec![
            Ok("What is your background?".to_string()),
            Ok("Great, let's plan it.".to_string()),
        ]));
        let client = ConversationClient::new(service.clone());
        let mut session = ConversationSession::new();

        client.send_message(&mut session, "Teach me chemistry").await.unwrap();
        let reply = client.send_message(&mut session, "Total beginner").await.unwrap();

        assert_eq!(reply, "Great, let's plan it.");
        assert_eq!(session.len(), 4);
        assert_eq!(session.latest_reply().unwrap().content, "Great, let's plan it.");

        let second_call = service.call(1);
        assert_eq!(second_call.len(), 4);
        assert_eq!(second_call[0].role, PromptRole::System);
        assert_eq!(second_call[1].content, "Teach me chemistry");
        assert_eq!(second_call[2].role, PromptRole::Assistant);
        assert_eq!(second_call[3].content, "Total beginner");
    }

    #[tokio::test]
    async fn failures_become_apologies_by_class() {
        let service = Arc::new(ScriptedChatService::new(vec![
            Err(PortError::Network("connection refused".into())),
            Err(PortError::Unauthorized),
            Err(PortError::Unexpected("status 500".into())),
        ]));
        let client = ConversationClient::new(service);
        let mut session = ConversationSession::new();

        let network = client.send_message(&mut session, "one").await.unwrap();
        let auth = client.send_message(&mut session, "two").await.unwrap();
        let other = client.send_message(&mut session, "three").await.unwrap();

        assert!(network.contains("network connection"));
        assert!(auth.contains("Invalid API key"));
        assert_eq!(other, "I encountered an error: status 500. Please try again.");
        // User turns stay recorded; failed replies are not.
        assert_eq!(session.len(), 3);
        assert!(session.latest_reply().is_none());
    }

    #[tokio::test]
    async fn empty_reply_is_recorded_as_apology() {
        let service = Arc::new(ScriptedChatService::new(vec![Ok("  ".to_string())]));
        let client = ConversationClient::new(service);
        let mut session = ConversationSession::new();

        let reply = client.send_message(&mut session, "hello").await.unwrap();
        assert_eq!(reply, EMPTY_REPLY_MESSAGE);
        assert_eq!(session.latest_reply().unwrap().content, EMPTY_REPLY_MESSAGE);
    }

    #[tokio::test]
    async fn reset_starts_a_fresh_transcript() {
        let service = Arc::new(ScriptedChatService::new(vec![
            Ok("first".to_string()),
            Ok("second".to_string()),
        ]));
        let client = ConversationClient::new(service.clone());
        let mut session = ConversationSession::new();

        client.send_message(&mut session, "Teach me history").await.unwrap();
        session.reset();
        assert_eq!(session.len(), 0);

        client.send_message(&mut session, "Actually, biology").await.unwrap();
        let call = service.call(1);
        assert_eq!(call.len(), 2);
        assert_eq!(call[0].role, PromptRole::System);
        assert_eq!(call[1], PromptMessage::user("Actually, biology"));
    }

    #[test]
    fn extraction_accepts_complete_analysis_with_extra_fields() {
        let reply = r#"Sounds good! Here's the analysis:
{
  "subject": "Python",
  "objectives": "Write small scripts",
  "skillLevel": "Beginner",
  "duration": "4 weeks",
  "focusAreas": ["loops", "functions", "loops"],
  "confidence": 0.9,
  "notes": "extra"
}"#;
        let input = extract_course_description(reply).unwrap();
        assert_eq!(input.subject, "Python");
        assert_eq!(input.skill_level, SkillLevel::Beginner);
        assert_eq!(input.duration, "4 weeks");
        assert_eq!(input.focus_areas, vec!["loops", "functions"]);
    }

    #[test]
    fn extraction_ignores_null_optional_fields() {
        let input = extract_course_description(
            r#"{"subject":"Python","objectives":"basics","skillLevel":"beginner","duration":null,"focusAreas":null}"#,
        )
        .unwrap();
        assert_eq!(input.subject, "Python");
        assert!(input.duration.is_empty());
        assert!(input.focus_areas.is_empty());
    }

    #[test]
    fn extraction_splits_focus_areas_given_as_text() {
        let input = extract_course_description(
            r#"{"subject":"Python","objectives":"basics","skillLevel":"beginner","duration":6,"focusAreas":"loops, functions"}"#,
        )
        .unwrap();
        assert_eq!(input.duration, "6");
        assert_eq!(input.focus_areas, vec!["loops", "functions"]);
    }

    #[test]
    fn extraction_rejects_missing_required_fields() {
        for reply in [
            r#"{"objectives": "x", "skillLevel": "beginner"}"#,
            r#"{"subject": "Art", "skillLevel": "beginner"}"#,
            r#"{"subject": "Art", "objectives": "x"}"#,
            r#"{"subject": "", "objectives": "x", "skillLevel": "beginner"}"#,
            r#"{"subject": null, "objectives": "x", "skillLevel": "beginner"}"#,
            r#"{"subject": "Art", "objectives": "x", "skillLevel": null}"#,
        ] {
            assert!(extract_course_description(reply).is_none(), "accepted {}", reply);
        }
    }

    #[test]
    fn extraction_is_absent_for_plain_or_broken_text() {
        assert!(extract_course_description("What level are you at?").is_none());
        assert!(extract_course_description("{\"subject\": \"Art\",").is_none());
        assert!(extract_course_description("{\"subject\": 42}").is_none());
    }

    #[test]
    fn unknown_skill_level_falls_back_to_beginner() {
        let input = extract_course_description(
            r#"{"subject": "Chess", "objectives": "Openings", "skillLevel": "expert"}"#,
        )
        .unwrap();
        assert_eq!(input.skill_level, SkillLevel::Beginner);
        assert!(input.focus_areas.is_empty());
    }
}
