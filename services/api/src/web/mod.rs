pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub use rest::{
    archive_course_handler, create_session_handler, delete_session_handler, get_session_handler,
    preview_course_handler, request_structure_handler, reset_session_handler,
    send_message_handler, ApiDoc,
};
pub use state::AppState;

/// All API routes, bound to the shared state.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/sessions", post(create_session_handler))
        .route(
            "/sessions/{session_id}",
            get(get_session_handler).delete(delete_session_handler),
        )
        .route("/sessions/{session_id}/messages", post(send_message_handler))
        .route("/sessions/{session_id}/reset", post(reset_session_handler))
        .route("/courses/structure", post(request_structure_handler))
        .route("/courses/preview", post(preview_course_handler))
        .route("/courses/archive", post(archive_course_handler))
        .with_state(app_state)
}
