//! crates/course_builder_core/src/generator/stylesheet.rs

const STYLESHEET: &str = include_str!("../../templates/main.css");

/// The course stylesheet. It does not depend on the course.
pub fn render_stylesheet() -> String {
    STYLESHEET.to_string()
}
