//! crates/course_builder_core/src/generator/docs.rs
//!
//! The two markdown documents shipped with every course.

use super::layout::{
    self, COURSE_DATA_PATH, DEFAULT_LOCAL_MODEL, DEFAULT_TEMPERATURE, INDEX_PATH,
    LOCAL_INFERENCE_URL, PROGRESS_STORAGE_KEY,
};
use super::template::{bullet_list, render};
use crate::domain::{CourseInput, CourseStructure};

const README_TEMPLATE: &str = include_str!("../../templates/README.md");
const SETUP_GUIDE_TEMPLATE: &str = include_str!("../../templates/SETUP-GUIDE.md");

fn module_lines(structure: &CourseStructure) -> Vec<String> {
    structure
        .chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| {
            if chunk.estimated_time.is_empty() {
                format!("{}. {}", i + 1, chunk.title)
            } else {
                format!("{}. {} ({})", i + 1, chunk.title, chunk.estimated_time)
            }
        })
        .collect()
}

pub fn render_readme(structure: &CourseStructure, input: &CourseInput) -> String {
    let params = [
        ("title", structure.title.clone()),
        ("subtitle", structure.subtitle.clone()),
        ("subject", input.subject.clone()),
        ("skill_level", input.skill_level.to_string()),
        ("duration", input.duration.clone()),
        ("module_count", structure.module_count().to_string()),
        ("estimated_hours", structure.estimated_hours.to_string()),
        ("difficulty", structure.difficulty.clone()),
        ("focus_area_list", bullet_list(&input.focus_areas, "General coverage")),
        ("module_list", bullet_list(&module_lines(structure), "No modules yet")),
        ("index_path", INDEX_PATH.to_string()),
        ("local_model", DEFAULT_LOCAL_MODEL.to_string()),
        ("local_inference_url", LOCAL_INFERENCE_URL.to_string()),
        ("file_tree", layout::file_tree()),
        ("course_data_path", COURSE_DATA_PATH.to_string()),
    ];
    render(README_TEMPLATE, &params)
}

pub fn render_setup_guide(structure: &CourseStructure, input: &CourseInput) -> String {
    let params = [
        ("title", structure.title.clone()),
        ("subject", input.subject.clone()),
        ("skill_level", input.skill_level.to_string()),
        ("index_path", INDEX_PATH.to_string()),
        ("local_model", DEFAULT_LOCAL_MODEL.to_string()),
        ("local_inference_url", LOCAL_INFERENCE_URL.to_string()),
        ("course_data_path", COURSE_DATA_PATH.to_string()),
        ("progress_storage_key", PROGRESS_STORAGE_KEY.to_string()),
        ("module_count", structure.module_count().to_string()),
        ("default_temperature", DEFAULT_TEMPERATURE.to_string()),
    ];
    render(SETUP_GUIDE_TEMPLATE, &params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CourseChunk, SkillLevel};

    fn structure() -> CourseStructure {
        let chunk = |title: &str, time: &str| CourseChunk {
            title: title.into(),
            topics: vec![],
            estimated_time: time.into(),
            difficulty: String::new(),
            concepts: 0,
        };
        CourseStructure {
            title: "GUITAR.EXE".into(),
            subtitle: "8-BIT LEARNING SYSTEM".into(),
            total_chunks: 2,
            estimated_hours: 6,
            difficulty: "INTERMEDIATE".into(),
            chunks: vec![chunk("CHORDS", "2 hours"), chunk("SCALES", "")],
            visualizations: vec![],
            ai_prompt: String::new(),
        }
    }

    fn input(focus_areas: Vec<String>) -> CourseInput {
        CourseInput {
            subject: "Guitar".into(),
            objectives: "Play songs".into(),
            skill_level: SkillLevel::Intermediate,
            duration: "1 month".into(),
            focus_areas,
        }
    }

    #[test]
    fn readme_lists_course_facts_modules_and_focus_areas() {
        let readme = render_readme(&structure(), &input(vec!["strumming".into()]));
        assert!(readme.starts_with("# GUITAR.EXE"));
        assert!(readme.contains("- **Skill Level**: intermediate"));
        assert!(readme.contains("- **Duration**: 1 month"));
        assert!(readme.contains("- **Modules**: 2"));
        assert!(readme.contains("- strumming"));
        assert!(readme.contains("- 1. CHORDS (2 hours)\n- 2. SCALES"));
        assert!(readme.contains("ollama pull llama3"));
        assert!(readme.contains("course-data.json"));
        assert!(!readme.contains("{{"));
    }

    #[test]
    fn readme_without_focus_areas_says_so() {
        let readme = render_readme(&structure(), &input(vec![]));
        assert!(readme.contains("### Focus Areas\n- General coverage"));
    }

    #[test]
    fn setup_guide_points_at_local_server() {
        let guide = render_setup_guide(&structure(), &input(vec![]));
        assert!(guide.contains("# 📖 SETUP GUIDE: GUITAR.EXE"));
        assert!(guide.contains("curl http://localhost:11434/api/version"));
        assert!(guide.contains("python3 -m http.server 8000"));
        assert!(!guide.contains("{{"));
    }
}
