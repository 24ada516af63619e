//! crates/course_builder_core/src/error.rs
//!
//! Errors surfaced by the course builder's explicit, single-shot operations.

/// The error type for structure requests, conversation preconditions and
/// archive packaging.
#[derive(Debug, thiserror::Error)]
pub enum CourseError {
    /// No credential is configured, so generation cannot proceed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The remote model failed, answered with a non-success status, or
    /// replied with something that could not be parsed. Retrying may help.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// `send_message` was called with blank text.
    #[error("Message text must not be empty")]
    EmptyMessage,

    /// Writing the archive failed.
    #[error("Packaging error: {0}")]
    Packaging(String),
}

impl From<zip::result::ZipError> for CourseError {
    fn from(e: zip::result::ZipError) -> Self {
        CourseError::Packaging(e.to_string())
    }
}

impl From<std::io::Error> for CourseError {
    fn from(e: std::io::Error) -> Self {
        CourseError::Packaging(e.to_string())
    }
}

impl From<serde_json::Error> for CourseError {
    fn from(e: serde_json::Error) -> Self {
        CourseError::Packaging(e.to_string())
    }
}

pub type CourseResult<T> = Result<T, CourseError>;
