//! crates/course_builder_core/src/generator/app_script.rs
//!
//! Renders `js/main.js`, the application that loads the course data file,
//! draws the module cards and tracks progress in browser storage.

use super::layout::{self, COURSE_DATA_PATH, PROGRESS_STORAGE_KEY};
use super::subject::SubjectFamily;
use super::template::{js_string, render};
use crate::domain::CourseInput;

const TEMPLATE: &str = include_str!("../../templates/main.js");

pub fn render_app_script(input: &CourseInput) -> String {
    let family = SubjectFamily::classify(&input.subject);
    let mut params = vec![
        ("course_data_path", js_string(COURSE_DATA_PATH)),
        ("progress_storage_key", js_string(PROGRESS_STORAGE_KEY)),
        ("subject_family", js_string(family.label())),
    ];
    params.extend(layout::id_params());
    render(TEMPLATE, &params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(subject: &str) -> CourseInput {
        CourseInput {
            subject: subject.into(),
            ..CourseInput::default()
        }
    }

    #[test]
    fn embeds_data_path_storage_key_and_family() {
        let js = render_app_script(&input("Calculus"));
        assert!(js.contains(r#"const COURSE_DATA_URL = "data/course-data.json";"#));
        assert!(js.contains(r#"const PROGRESS_STORAGE_KEY = "course-progress";"#));
        assert!(js.contains(r#"const SUBJECT_FAMILY = "math-physics";"#));
        assert!(js.contains("document.getElementById('modulesGrid')"));
        assert!(!js.contains("{{"));
    }

    #[test]
    fn unrecognized_subject_selects_generic_content() {
        let js = render_app_script(&input("Medieval Poetry"));
        assert!(js.contains(r#"const SUBJECT_FAMILY = "general";"#));
        assert!(js.contains("default:"));
    }

    #[test]
    fn progress_percentage_guards_empty_course() {
        let js = render_app_script(&input("Python"));
        assert!(js.contains("return total > 0 ? Math.round((completed / total) * 100) : 0;"));
        assert!(js.contains("this.completedModules.add(this.currentModule);"));
    }
}
