//! crates/course_builder_core/src/structure.rs
//!
//! The course structure requester: one single-turn request asking the remote
//! model for a complete course outline, parsed from the first JSON object of
//! the reply.

use crate::domain::{CourseInput, CourseStructure};
use crate::error::{CourseError, CourseResult};
use crate::extract::first_json_object;
use crate::generator::template::render;
use crate::ports::{ChatCompletionService, PromptMessage};
use std::sync::Arc;
use tracing::{error, info, warn};

const STRUCTURE_PROMPT_TEMPLATE: &str = r#"Generate a comprehensive course structure for: {{subject}}

Learning Objectives: {{objectives}}
Skill Level: {{skill_level}}
Duration: {{duration}}
Focus Areas: {{focus_areas}}

Create a detailed course with 6-8 chunks/modules, interactive visualizations, and an AI tutor prompt. Return as JSON with this structure:

{
  "title": "SUBJECT.EXE",
  "subtitle": "8-BIT LEARNING SYSTEM v1.0",
  "totalChunks": 8,
  "estimatedHours": 24,
  "difficulty": "BEGINNER",
  "chunks": [
    {
      "title": "CHUNK 1: TOPIC NAME",
      "topics": ["Topic 1", "Topic 2", "Topic 3"],
      "estimatedTime": "2-3 hours",
      "difficulty": "BEGINNER",
      "concepts": 5
    }
  ],
  "visualizations": ["Interactive Component 1", "Simulation 2"],
  "aiPrompt": "Specialized tutor system prompt for this subject"
}"#;

/// Builds the single user message sent for a structure request.
pub fn structure_prompt(input: &CourseInput) -> String {
    render(
        STRUCTURE_PROMPT_TEMPLATE,
        &[
            ("subject", input.subject.clone()),
            ("objectives", input.objectives.clone()),
            ("skill_level", input.skill_level.as_str().to_string()),
            ("duration", input.duration.clone()),
            ("focus_areas", input.focus_areas.join(", ")),
        ],
    )
}

/// Stateless requester for course outlines.
#[derive(Clone)]
pub struct StructureRequester {
    service: Arc<dyn ChatCompletionService>,
}

impl StructureRequester {
    pub fn new(service: Arc<dyn ChatCompletionService>) -> Self {
        Self { service }
    }

    /// Asks the model for an outline of `input`.
    ///
    /// Fails with [`CourseError::Configuration`] when no credential is set and
    /// with [`CourseError::Upstream`] when the call fails or the reply holds no
    /// usable outline. The returned structure always has
    /// `total_chunks == chunks.len()`.
    pub async fn request_structure(&self, input: &CourseInput) -> CourseResult<CourseStructure> {
        if !self.service.has_credential() {
            return Err(CourseError::Configuration(
                "API key not configured. Set GROQ_API_KEY in the service environment.".to_string(),
            ));
        }

        info!(subject = %input.subject, "Requesting course structure.");
        let reply = self
            .service
            .complete(vec![PromptMessage::user(structure_prompt(input))])
            .await
            .map_err(|e| {
                error!("Course structure request failed: {}", e);
                CourseError::Upstream(e.to_string())
            })?;

        let value = first_json_object(&reply)
            .ok_or_else(|| CourseError::Upstream("No valid JSON found in response".to_string()))?;

        let mut structure: CourseStructure = serde_json::from_value(value).map_err(|e| {
            CourseError::Upstream(format!("Response JSON is not a course structure: {}", e))
        })?;

        if let Some(reported) = structure.reconcile_chunk_count() {
            warn!(
                reported,
                actual = structure.total_chunks,
                "Model reported a different module count; using the actual chunk count."
            );
        }

        info!(
            title = %structure.title,
            modules = structure.chunks.len(),
            "Course structure received."
        );
        Ok(structure)
    }
}
