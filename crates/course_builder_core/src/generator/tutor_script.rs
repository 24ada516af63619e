//! crates/course_builder_core/src/generator/tutor_script.rs
//!
//! Renders `js/ollama-service.js`, the client for a locally running Ollama
//! server. Course values are baked into the script as string literals.

use super::layout::{self, DEFAULT_LOCAL_MODEL, DEFAULT_TEMPERATURE, LOCAL_INFERENCE_URL};
use super::template::{js_string, render};
use crate::domain::{CourseInput, CourseStructure};

const TEMPLATE: &str = include_str!("../../templates/ollama-service.js");

/// The system prompt the local tutor starts every conversation with.
pub fn tutor_system_prompt(structure: &CourseStructure, input: &CourseInput) -> String {
    let subject = input.subject.as_str();
    let level = input.skill_level.as_str();
    let focus_areas = if input.focus_areas.is_empty() {
        "general topics".to_string()
    } else {
        input.focus_areas.join(", ")
    };

    let mut prompt = format!(
        "You are an expert {subject} tutor for a {level} student. You are part of an interactive learning course called \"{title}\".

Your role:
- Help students understand {subject} concepts clearly and thoroughly
- Provide practical examples and real-world applications
- Break down complex topics into digestible parts
- Encourage questions and curiosity
- Adapt explanations to the {level} level
- Be patient, encouraging, and supportive

Course Context:
- Subject: {subject}
- Level: {level}
- Focus Areas: {focus_areas}

Guidelines:
- Keep responses concise but comprehensive
- Use examples relevant to the course material
- Encourage hands-on practice when applicable
- If asked about topics outside {subject}, gently redirect to course content
- Use a friendly, encouraging tone
- Format code examples clearly when relevant",
        title = structure.title,
    );

    let guidance = structure.ai_prompt.trim();
    if !guidance.is_empty() {
        prompt.push_str("\n\nCourse-specific guidance:\n");
        prompt.push_str(guidance);
    }
    prompt
}

pub fn render_tutor_script(structure: &CourseStructure, input: &CourseInput) -> String {
    let mut params = vec![
        ("local_inference_url", js_string(LOCAL_INFERENCE_URL)),
        ("default_local_model", js_string(DEFAULT_LOCAL_MODEL)),
        ("default_temperature", DEFAULT_TEMPERATURE.to_string()),
        ("system_prompt", js_string(&tutor_system_prompt(structure, input))),
    ];
    params.extend(layout::id_params());
    render(TEMPLATE, &params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SkillLevel;

    fn structure(ai_prompt: &str) -> CourseStructure {
        CourseStructure {
            title: "CHEM.EXE".into(),
            subtitle: String::new(),
            total_chunks: 0,
            estimated_hours: 0,
            difficulty: String::new(),
            chunks: vec![],
            visualizations: vec![],
            ai_prompt: ai_prompt.into(),
        }
    }

    fn input() -> CourseInput {
        CourseInput {
            subject: "Chemistry \"101\"".into(),
            objectives: "Balance equations".into(),
            skill_level: SkillLevel::Intermediate,
            duration: "3 weeks".into(),
            focus_areas: vec!["stoichiometry".into(), "bonds".into()],
        }
    }

    #[test]
    fn prompt_embeds_course_context() {
        let prompt = tutor_system_prompt(&structure(""), &input());
        assert!(prompt.starts_with("You are an expert Chemistry \"101\" tutor for a intermediate student."));
        assert!(prompt.contains("- Focus Areas: stoichiometry, bonds"));
        assert!(prompt.contains("\"CHEM.EXE\""));
        assert!(!prompt.contains("Course-specific guidance"));

        let with_guidance = tutor_system_prompt(&structure("Use lab analogies."), &input());
        assert!(with_guidance.ends_with("Course-specific guidance:\nUse lab analogies."));
    }

    #[test]
    fn script_targets_local_server_with_literal_values() {
        let js = render_tutor_script(&structure(""), &input());
        assert!(js.contains(r#"const OLLAMA_BASE_URL = "http://localhost:11434";"#));
        assert!(js.contains(r#"const DEFAULT_MODEL = "llama3";"#));
        assert!(js.contains("const DEFAULT_TEMPERATURE = 0.7;"));
        assert!(js.contains(r#"Chemistry \"101\""#));
        assert!(js.contains("/api/version"));
        assert!(js.contains("/api/tags"));
        assert!(js.contains("/api/chat"));
        assert!(js.contains("showConnectionHelp()"));
        assert!(!js.contains("{{"));
    }
}
