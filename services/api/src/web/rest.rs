//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::course_rejection;
use crate::web::protocol::{
    CoursePreviewResponse, CreateSessionResponse, GenerateCourseRequest, PreviewFile,
    ResetSessionResponse, SendMessageRequest, SendMessageResponse, SessionTranscriptResponse,
    StructureRequest, StructureResponse, TranscriptEntry,
};
use crate::web::state::{AppState, SessionHandle};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use course_builder_core::{extract_course_description, CourseArchive, CourseGenerator, GREETING};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::OpenApi;
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        create_session_handler,
        get_session_handler,
        send_message_handler,
        reset_session_handler,
        delete_session_handler,
        request_structure_handler,
        preview_course_handler,
        archive_course_handler,
    ),
    components(
        schemas(
            CreateSessionResponse,
            TranscriptEntry,
            SessionTranscriptResponse,
            SendMessageRequest,
            SendMessageResponse,
            ResetSessionResponse,
            StructureRequest,
            StructureResponse,
            GenerateCourseRequest,
            PreviewFile,
            CoursePreviewResponse,
        )
    ),
    tags(
        (name = "Course Builder API", description = "Conversational course design and course package generation.")
    )
)]
pub struct ApiDoc;

type Rejection = (StatusCode, String);

fn session_or_404(app_state: &AppState, session_id: Uuid) -> Result<SessionHandle, Rejection> {
    app_state.sessions.get(session_id).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("Session {} not found", session_id),
        )
    })
}

//=========================================================================================
// Conversation Handlers
//=========================================================================================

/// Start a new course-design conversation.
#[utoipa::path(
    post,
    path = "/sessions",
    responses(
        (status = 201, description = "Session created successfully", body = CreateSessionResponse)
    )
)]
pub async fn create_session_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, Rejection> {
    let (session_id, handle) = app_state.sessions.create();
    let created_at = handle.lock().await.created_at();
    info!(%session_id, "Conversation session created.");

    let response = CreateSessionResponse {
        session_id,
        created_at,
        greeting: GREETING.to_string(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// Fetch the transcript of a session.
#[utoipa::path(
    get,
    path = "/sessions/{session_id}",
    responses(
        (status = 200, description = "The session transcript", body = SessionTranscriptResponse),
        (status = 404, description = "Unknown session")
    ),
    params(
        ("session_id" = Uuid, Path, description = "The conversation session.")
    )
)]
pub async fn get_session_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, Rejection> {
    let handle = session_or_404(&app_state, session_id)?;
    let session = handle.lock().await;

    Ok(Json(SessionTranscriptResponse {
        session_id,
        greeting: GREETING.to_string(),
        messages: session.transcript().iter().map(TranscriptEntry::from).collect(),
    }))
}

/// Send one user message and receive the assistant's reply.
///
/// When the reply contains a complete course request it is returned parsed
/// in `course_input`, ready for the review step.
#[utoipa::path(
    post,
    path = "/sessions/{session_id}/messages",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "The assistant's reply", body = SendMessageResponse),
        (status = 400, description = "Empty message"),
        (status = 404, description = "Unknown session")
    ),
    params(
        ("session_id" = Uuid, Path, description = "The conversation session.")
    )
)]
pub async fn send_message_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, Rejection> {
    let handle = session_or_404(&app_state, session_id)?;
    let mut session = handle.lock().await;

    let reply = app_state
        .conversation
        .send_message(&mut session, &request.text)
        .await
        .map_err(course_rejection)?;

    let course_input = extract_course_description(&reply);
    Ok(Json(SendMessageResponse {
        reply,
        course_input,
        message_count: session.len(),
    }))
}

/// Clear a session's transcript and start the conversation over.
#[utoipa::path(
    post,
    path = "/sessions/{session_id}/reset",
    responses(
        (status = 200, description = "Conversation reset", body = ResetSessionResponse),
        (status = 404, description = "Unknown session")
    ),
    params(
        ("session_id" = Uuid, Path, description = "The conversation session.")
    )
)]
pub async fn reset_session_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, Rejection> {
    let handle = session_or_404(&app_state, session_id)?;
    handle.lock().await.reset();
    info!(%session_id, "Conversation reset.");

    Ok(Json(ResetSessionResponse {
        session_id,
        greeting: GREETING.to_string(),
    }))
}

/// Discard a session.
#[utoipa::path(
    delete,
    path = "/sessions/{session_id}",
    responses(
        (status = 204, description = "Session removed"),
        (status = 404, description = "Unknown session")
    ),
    params(
        ("session_id" = Uuid, Path, description = "The conversation session.")
    )
)]
pub async fn delete_session_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse, Rejection> {
    if app_state.sessions.remove(session_id) {
        info!(%session_id, "Conversation session removed.");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((
            StatusCode::NOT_FOUND,
            format!("Session {} not found", session_id),
        ))
    }
}

//=========================================================================================
// Course Handlers
//=========================================================================================

/// Ask the model for a course outline.
#[utoipa::path(
    post,
    path = "/courses/structure",
    request_body = StructureRequest,
    responses(
        (status = 200, description = "The course outline", body = StructureResponse),
        (status = 400, description = "Subject or objectives missing"),
        (status = 502, description = "The model failed or returned no usable outline"),
        (status = 503, description = "No API key configured")
    )
)]
pub async fn request_structure_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<StructureRequest>,
) -> Result<impl IntoResponse, Rejection> {
    if !request.input.is_complete() {
        return Err((
            StatusCode::BAD_REQUEST,
            "Subject and objectives are required".to_string(),
        ));
    }

    let structure = app_state
        .requester
        .request_structure(&request.input)
        .await
        .map_err(|e| {
            error!("Failed to generate course structure: {}", e);
            course_rejection(e)
        })?;

    Ok(Json(StructureResponse { structure }))
}

fn generate(request: &GenerateCourseRequest) -> Result<CourseArchive, Rejection> {
    CourseGenerator::new(&request.structure, &request.input)
        .generate()
        .map_err(course_rejection)
}

/// Generate the course files and return them for display.
#[utoipa::path(
    post,
    path = "/courses/preview",
    request_body = GenerateCourseRequest,
    responses(
        (status = 200, description = "The generated files", body = CoursePreviewResponse)
    )
)]
pub async fn preview_course_handler(
    Json(request): Json<GenerateCourseRequest>,
) -> Result<impl IntoResponse, Rejection> {
    let archive = generate(&request)?;

    Ok(Json(CoursePreviewResponse {
        file_name: archive.download_file_name(),
        generated_at: archive.generated_at(),
        files: archive.files().iter().map(PreviewFile::from).collect(),
    }))
}

/// Generate the course and download it as a zip archive.
#[utoipa::path(
    post,
    path = "/courses/archive",
    request_body = GenerateCourseRequest,
    responses(
        (status = 200, description = "The course package", content_type = "application/zip", body = Vec<u8>),
        (status = 500, description = "Packaging failed")
    )
)]
pub async fn archive_course_handler(
    Json(request): Json<GenerateCourseRequest>,
) -> Result<impl IntoResponse, Rejection> {
    let archive = generate(&request)?;
    let bytes = archive.to_zip_bytes().map_err(|e| {
        error!("Failed to package course: {}", e);
        course_rejection(e)
    })?;

    let file_name = archive.download_file_name();
    info!(file_name = %file_name, files = archive.files().len(), bytes = bytes.len(), "Course archive packaged.");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    ))
}
