//! crates/course_builder_core/src/generator/page.rs
//!
//! Renders `index.html`: static structure only. The scripts fill the module
//! grid and wire every control at runtime.

use super::layout::{self, DEFAULT_TEMPERATURE, STYLESHEET_PATH, TUTOR_SCRIPT_PATH, APP_SCRIPT_PATH};
use super::template::{escape_html, render};
use crate::domain::{CourseInput, CourseStructure};

const TEMPLATE: &str = include_str!("../../templates/index.html");

pub fn render_index(structure: &CourseStructure, input: &CourseInput) -> String {
    let mut params = vec![
        ("title", escape_html(&structure.title)),
        ("subtitle", escape_html(&structure.subtitle)),
        ("module_count", structure.module_count().to_string()),
        ("estimated_hours", structure.estimated_hours.to_string()),
        ("difficulty", escape_html(&structure.difficulty)),
        ("subject", escape_html(&input.subject)),
        ("default_temperature", DEFAULT_TEMPERATURE.to_string()),
        ("path_stylesheet", STYLESHEET_PATH.to_string()),
        ("path_tutor_script", TUTOR_SCRIPT_PATH.to_string()),
        ("path_app_script", APP_SCRIPT_PATH.to_string()),
    ];
    params.extend(layout::id_params());
    render(TEMPLATE, &params)
}
