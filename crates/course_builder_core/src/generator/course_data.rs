//! crates/course_builder_core/src/generator/course_data.rs
//!
//! Renders `data/course-data.json`, the only course content the browser app
//! reads at runtime.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::domain::{CourseChunk, CourseInput, CourseStructure, SkillLevel};
use crate::error::CourseResult;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CourseData<'a> {
    title: &'a str,
    subtitle: &'a str,
    subject: &'a str,
    objectives: &'a str,
    skill_level: SkillLevel,
    duration: &'a str,
    focus_areas: &'a [String],
    total_chunks: usize,
    estimated_hours: u32,
    difficulty: &'a str,
    chunks: &'a [CourseChunk],
    visualizations: &'a [String],
    ai_prompt: &'a str,
    generated_at: String,
}

/// Pretty-printed course data. `totalChunks` is always the length of
/// `chunks`, whatever the model reported.
pub fn render_course_data(
    structure: &CourseStructure,
    input: &CourseInput,
    generated_at: DateTime<Utc>,
) -> CourseResult<String> {
    let data = CourseData {
        title: &structure.title,
        subtitle: &structure.subtitle,
        subject: &input.subject,
        objectives: &input.objectives,
        skill_level: input.skill_level,
        duration: &input.duration,
        focus_areas: &input.focus_areas,
        total_chunks: structure.module_count(),
        estimated_hours: structure.estimated_hours,
        difficulty: &structure.difficulty,
        chunks: &structure.chunks,
        visualizations: &structure.visualizations,
        ai_prompt: &structure.ai_prompt,
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    Ok(serde_json::to_string_pretty(&data)?)
}
