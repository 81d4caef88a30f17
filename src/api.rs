//! HTTP API for the portfolio widgets

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::projects::ProjectSource;
use crate::runtime::{SessionConfig, SessionManager};
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub projects: Arc<dyn ProjectSource>,
}

impl AppState {
    pub fn new(config: SessionConfig, projects: Arc<dyn ProjectSource>) -> Self {
        Self {
            sessions: Arc::new(SessionManager::new(config)),
            projects,
        }
    }
}
