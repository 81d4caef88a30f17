//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    ChatRequest, ChatResponse, ErrorResponse, ProjectsQuery, ProjectsResponse,
    SessionCreatedResponse, SuccessResponse, TechnologiesResponse,
};
use super::AppState;
use crate::projects::{all_technologies, filter_projects};
use crate::runtime::{SessionEvent, UiEvent};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Project showcase
        .route("/api/projects", get(list_projects))
        .route("/api/projects/technologies", get(list_technologies))
        // Session lifecycle
        .route("/api/session", post(create_session))
        .route("/api/session/:id/stream", get(stream_session))
        // Chat panel
        .route("/api/session/:id/chat/toggle", post(toggle_chat))
        .route("/api/session/:id/chat/message", post(send_chat_message))
        // Notification tray
        .route(
            "/api/session/:id/notifications/:nid/read",
            post(mark_notification_read),
        )
        .route(
            "/api/session/:id/notifications/:nid/dismiss",
            post(dismiss_notification),
        )
        // Welcome banner
        .route("/api/session/:id/welcome/dismiss", post(dismiss_welcome))
        .with_state(state)
}

// ============================================================
// Project Showcase
// ============================================================

async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectsQuery>,
) -> Result<Json<ProjectsResponse>, AppError> {
    let projects = state
        .projects
        .list()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let filtered = filter_projects(&projects, query.technology.as_deref(), query.featured);

    Ok(Json(ProjectsResponse {
        projects: filtered.into_iter().cloned().collect(),
    }))
}

async fn list_technologies(
    State(state): State<AppState>,
) -> Result<Json<TechnologiesResponse>, AppError> {
    let projects = state
        .projects
        .list()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(TechnologiesResponse {
        technologies: all_technologies(&projects),
    }))
}

// ============================================================
// Session Lifecycle
// ============================================================

async fn create_session(State(state): State<AppState>) -> Json<SessionCreatedResponse> {
    let id = state.sessions.create_session().await;
    Json(SessionCreatedResponse { id })
}

async fn stream_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session_id = parse_session_id(&id)?;

    // Subscribe to updates
    let broadcast_rx = state
        .sessions
        .subscribe(session_id)
        .await
        .map_err(AppError::NotFound)?;

    let snapshot = state
        .sessions
        .snapshot(session_id)
        .await
        .map_err(AppError::Internal)?;

    // Create init event
    let init_event = UiEvent::Init {
        snapshot: serde_json::to_value(&snapshot).unwrap_or(Value::Null),
    };

    Ok(sse_stream(init_event, broadcast_rx))
}

// ============================================================
// Chat Panel
// ============================================================

async fn toggle_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let session_id = parse_session_id(&id)?;

    state
        .sessions
        .send_event(session_id, SessionEvent::ToggleChat)
        .await
        .map_err(AppError::NotFound)?;

    Ok(Json(SuccessResponse { success: true }))
}

async fn send_chat_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let session_id = parse_session_id(&id)?;

    // A rejected submit surfaces as an error event on the session stream
    state
        .sessions
        .send_event(session_id, SessionEvent::SubmitChat { text: req.text })
        .await
        .map_err(AppError::NotFound)?;

    Ok(Json(ChatResponse { queued: true }))
}

// ============================================================
// Notification Tray
// ============================================================

async fn mark_notification_read(
    State(state): State<AppState>,
    Path((id, nid)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, AppError> {
    let session_id = parse_session_id(&id)?;
    let notification_id = parse_notification_id(&nid)?;

    state
        .sessions
        .send_event(
            session_id,
            SessionEvent::MarkNotificationRead {
                id: notification_id,
            },
        )
        .await
        .map_err(AppError::NotFound)?;

    Ok(Json(SuccessResponse { success: true }))
}

async fn dismiss_notification(
    State(state): State<AppState>,
    Path((id, nid)): Path<(String, String)>,
) -> Result<Json<SuccessResponse>, AppError> {
    let session_id = parse_session_id(&id)?;
    let notification_id = parse_notification_id(&nid)?;

    state
        .sessions
        .send_event(
            session_id,
            SessionEvent::DismissNotification {
                id: notification_id,
            },
        )
        .await
        .map_err(AppError::NotFound)?;

    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// Welcome Banner
// ============================================================

async fn dismiss_welcome(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let session_id = parse_session_id(&id)?;

    state
        .sessions
        .send_event(session_id, SessionEvent::DismissWelcome)
        .await
        .map_err(AppError::NotFound)?;

    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// Error Handling
// ============================================================

fn parse_session_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid session id: {raw}")))
}

fn parse_notification_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::BadRequest(format!("Invalid notification id: {raw}")))
}

enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
