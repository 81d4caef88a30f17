//! API request and response types

use crate::projects::Project;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Response for session creation
#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub id: Uuid,
}

/// Response for chat actions
///
/// A queued submit may still be rejected by the session runtime; the
/// rejection arrives as an `error` event on the session's stream.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub queued: bool,
}

/// Response for tray and banner actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Query parameters for project filtering
#[derive(Debug, Deserialize)]
pub struct ProjectsQuery {
    pub technology: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Response with the (possibly filtered) project list
#[derive(Debug, Serialize)]
pub struct ProjectsResponse {
    pub projects: Vec<Project>,
}

/// Response listing every technology used across the projects
#[derive(Debug, Serialize)]
pub struct TechnologiesResponse {
    pub technologies: Vec<String>,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
