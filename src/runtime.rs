//! Session runtimes for the interactive widgets
//!
//! Every visitor gets a session: an in-memory actor owning the chat state
//! machine, the transcript, the notification store, and the timers that
//! drive the typing delay and the welcome banner. Clients mutate a session
//! by sending [`SessionEvent`]s and observe it by subscribing to the
//! session's [`UiEvent`] broadcast.

mod executor;
mod timer;


pub use executor::SessionRuntime;

use crate::chat::state::DEFAULT_REPLY_DELAY;
use crate::chat::Message;
use crate::matcher::ResponseMatcher;
use crate::notify::{NotificationView, WELCOME_AUTO_HIDE};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot, RwLock};
use uuid::Uuid;

// ============================================================================
// Shared Types
// ============================================================================

/// Tunables shared by every session a manager spawns
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Simulated typing delay before a bot reply is appended
    pub reply_delay: Duration,
    /// How long the welcome banner stays up before auto-hiding
    pub welcome_hide: Duration,
    /// Reply table; each session runtime gets its own clone
    pub matcher: ResponseMatcher,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            welcome_hide: WELCOME_AUTO_HIDE,
            matcher: ResponseMatcher::portfolio_rules(),
        }
    }
}

/// Events accepted by a session runtime
///
/// Timer variants are sent by the runtime's own timer tasks; everything
/// else comes from HTTP handlers.
#[derive(Debug)]
pub enum SessionEvent {
    ToggleChat,
    SubmitChat { text: String },
    ReplyTimerFired { seq: u64 },
    MarkNotificationRead { id: Uuid },
    DismissNotification { id: Uuid },
    DismissWelcome,
    WelcomeTimerFired { seq: u64 },
    Snapshot { reply: oneshot::Sender<SessionSnapshot> },
    /// Stop the runtime; dropping it cancels any pending timers
    Shutdown,
}

/// Events sent to SSE clients
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Full state for a client that just connected
    Init { snapshot: serde_json::Value },
    /// A transcript entry was appended
    Message { message: serde_json::Value },
    /// Panel visibility or typing indicator changed
    ChatStateChanged { open: bool, typing: bool },
    /// The tray contents or read flags changed
    NotificationsChanged {
        notifications: serde_json::Value,
        unread_count: usize,
    },
    /// Welcome banner visibility changed
    WelcomeChanged { visible: bool },
    /// The transcript view should scroll to the newest entry
    ScrollToLatest,
    /// A request was rejected (e.g. submit while a reply is pending)
    Error { message: String },
}

/// Full widget state, captured for a newly connected client
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub chat_open: bool,
    pub typing: bool,
    pub transcript: Vec<Message>,
    pub notifications: Vec<NotificationView>,
    pub unread_count: usize,
    pub welcome_visible: bool,
}

/// Handle to interact with a running session
pub struct SessionHandle {
    pub event_tx: mpsc::Sender<SessionEvent>,
    pub broadcast_tx: broadcast::Sender<UiEvent>,
}

// ============================================================================
// Session Manager
// ============================================================================

/// Manager for all session runtimes
pub struct SessionManager {
    config: SessionConfig,
    sessions: RwLock<HashMap<Uuid, SessionHandle>>,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Spawn a fresh session runtime and return its id
    pub async fn create_session(&self) -> Uuid {
        let session_id = Uuid::new_v4();
        let (event_tx, event_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);

        let runtime = SessionRuntime::new(
            session_id,
            self.config.clone(),
            event_rx,
            event_tx.clone(),
            broadcast_tx.clone(),
        );

        tokio::spawn(async move {
            runtime.run().await;
            tracing::info!(session_id = %session_id, "Session runtime finished");
        });

        self.sessions.write().await.insert(
            session_id,
            SessionHandle {
                event_tx,
                broadcast_tx,
            },
        );

        tracing::info!(session_id = %session_id, "Created session");
        session_id
    }

    async fn handle(&self, session_id: Uuid) -> Result<SessionHandle, String> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&session_id)
            .map(|handle| SessionHandle {
                event_tx: handle.event_tx.clone(),
                broadcast_tx: handle.broadcast_tx.clone(),
            })
            .ok_or_else(|| format!("Unknown session: {session_id}"))
    }

    /// Send an event to a session
    pub async fn send_event(&self, session_id: Uuid, event: SessionEvent) -> Result<(), String> {
        let handle = self.handle(session_id).await?;
        handle
            .event_tx
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {e}"))
    }

    /// Subscribe to session updates
    pub async fn subscribe(
        &self,
        session_id: Uuid,
    ) -> Result<broadcast::Receiver<UiEvent>, String> {
        let handle = self.handle(session_id).await?;
        Ok(handle.broadcast_tx.subscribe())
    }

    /// Ask the session runtime for its current state
    pub async fn snapshot(&self, session_id: Uuid) -> Result<SessionSnapshot, String> {
        let (reply, rx) = oneshot::channel();
        self.send_event(session_id, SessionEvent::Snapshot { reply })
            .await?;
        rx.await
            .map_err(|_| "Session stopped before replying".to_string())
    }

    /// Drop a session and stop its runtime
    pub async fn remove_session(&self, session_id: Uuid) -> bool {
        let Some(handle) = self.sessions.write().await.remove(&session_id) else {
            return false;
        };
        let _ = handle.event_tx.send(SessionEvent::Shutdown).await;
        tracing::info!(session_id = %session_id, "Removed session");
        true
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
