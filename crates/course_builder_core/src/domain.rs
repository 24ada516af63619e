//! crates/course_builder_core/src/domain.rs
//!
//! Defines the core data structures for the course builder: the user's course
//! request, the AI-produced course outline, and the conversation transcript.
//! Field names serialize in camelCase because the same shapes are written into
//! the generated `course-data.json` and exchanged with the language model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use tracing::warn;

//=========================================================================================
// Course Input
//=========================================================================================

/// The learner's self-reported level. Deserializes through
/// [`SkillLevel::from_label`]; unknown or missing labels become `Beginner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    /// Parses a level label case-insensitively. Returns `None` for unknown labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl<'de> Deserialize<'de> for SkillLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = lenient_string(deserializer)?;
        Ok(Self::from_label(&label).unwrap_or_else(|| {
            if !label.trim().is_empty() {
                warn!(label = %label, "Unknown skill level; using beginner.");
            }
            Self::default()
        }))
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parameters of a requested course, gathered by conversation and edited
/// on the review step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CourseInput {
    pub subject: String,
    pub objectives: String,
    pub skill_level: SkillLevel,
    pub duration: String,
    pub focus_areas: Vec<String>,
}

impl CourseInput {
    /// Appends a focus area unless it is blank or already present.
    /// Returns `true` when the list changed.
    pub fn add_focus_area(&mut self, area: &str) -> bool {
        let area = area.trim();
        if area.is_empty() || self.focus_areas.iter().any(|a| a == area) {
            return false;
        }
        self.focus_areas.push(area.to_string());
        true
    }

    /// Removes every occurrence of `area`. Returns `true` when the list changed.
    pub fn remove_focus_area(&mut self, area: &str) -> bool {
        let before = self.focus_areas.len();
        self.focus_areas.retain(|a| a != area);
        before != self.focus_areas.len()
    }

    /// Whether enough has been filled in to ask for a course outline.
    pub fn is_complete(&self) -> bool {
        !self.subject.trim().is_empty() && !self.objectives.trim().is_empty()
    }
}

//=========================================================================================
// Course Structure
//=========================================================================================

/// One module of a generated course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseChunk {
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub topics: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub estimated_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub difficulty: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub concepts: u32,
}

/// The course outline produced by the language model.
///
/// `total_chunks` is expected to match `chunks.len()`; call
/// [`CourseStructure::reconcile_chunk_count`] to enforce it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseStructure {
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subtitle: String,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total_chunks: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub estimated_hours: u32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub difficulty: String,
    pub chunks: Vec<CourseChunk>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub visualizations: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub ai_prompt: String,
}

impl CourseStructure {
    /// Number of modules as actually present in `chunks`.
    pub fn module_count(&self) -> usize {
        self.chunks.len()
    }

    /// Overwrites `total_chunks` with the real module count.
    /// Returns the previously reported value when it disagreed.
    pub fn reconcile_chunk_count(&mut self) -> Option<u32> {
        let actual = self.chunks.len() as u32;
        if self.total_chunks == actual {
            return None;
        }
        let reported = self.total_chunks;
        self.total_chunks = actual;
        Some(reported)
    }
}

/// Accepts integers, floats (rounded) and numeric strings; models are not
/// consistent about which they emit.
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0),
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(v.min(u32::MAX as u64) as u32)
            } else if let Some(f) = n.as_f64() {
                Ok(f.max(0.0).round().min(u32::MAX as f64) as u32)
            } else {
                Ok(0)
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(|f| f.max(0.0).round().min(u32::MAX as f64) as u32)
            .map_err(|_| D::Error::custom(format!("expected a number, found '{}'", s))),
        other => Err(D::Error::custom(format!("expected a number, found {}", other))),
    }
}

/// Strings may arrive as `null`, numbers or booleans. Anything else that is
/// not a string decodes as empty.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// Lists may arrive as `null` or as one comma-separated string. Blank and
/// non-scalar entries are dropped.
pub(crate) fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    let items: Vec<String> = match Value::deserialize(deserializer)? {
        Value::String(s) => s.split(',').map(|item| item.trim().to_string()).collect(),
        Value::Array(values) => values
            .into_iter()
            .filter_map(|value| match value {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(items.into_iter().filter(|item| !item.is_empty()).collect())
}

//=========================================================================================
// Conversation
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// A single turn of the course-design conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}
