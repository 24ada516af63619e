//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service.

use crate::config::ConfigError;
use axum::http::StatusCode;
use course_builder_core::CourseError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a failure of one of the course builder operations.
    #[error("Course Error: {0}")]
    Course(#[from] CourseError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// Maps a course builder failure onto the HTTP status handlers report.
pub fn course_error_status(error: &CourseError) -> StatusCode {
    match error {
        CourseError::Configuration(_) => StatusCode::SERVICE_UNAVAILABLE,
        CourseError::Upstream(_) => StatusCode::BAD_GATEWAY,
        CourseError::EmptyMessage => StatusCode::BAD_REQUEST,
        CourseError::Packaging(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handler-ready form of a course builder failure.
pub fn course_rejection(error: CourseError) -> (StatusCode, String) {
    (course_error_status(&error), error.to_string())
}
