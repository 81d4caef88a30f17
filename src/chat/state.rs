//! Chat panel state types

use crate::matcher::ResponseMatcher;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

// ============================================================================
// Transcript
// ============================================================================

/// Who authored a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// A single transcript entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: Sender::User,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender: Sender::Bot,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Opening line seeded into every fresh transcript
pub const GREETING: &str = "Hi! I'm James's virtual assistant. Ask me about his availability, location, skills, or how to contact him!";

// ============================================================================
// Panel State
// ============================================================================

/// Chat panel state
///
/// The typing indicator is not stored anywhere; it is derived from the
/// state via [`ChatState::is_typing`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
#[derive(Default)]
pub enum ChatState {
    /// Panel hidden
    #[default]
    Closed,

    /// Panel open, ready for input
    Idle,

    /// Panel open, a bot reply timer is running
    AwaitingReply {
        /// The submission as typed; the matcher runs against this when the
        /// timer fires
        user_text: String,
        /// Identifies the live timer so a stale fire is ignored
        reply_seq: u64,
    },
}

impl ChatState {
    /// Check if the panel is visible
    pub fn is_open(&self) -> bool {
        !matches!(self, ChatState::Closed)
    }

    /// Typing indicator: shown exactly while a reply is pending
    pub fn is_typing(&self) -> bool {
        matches!(self, ChatState::AwaitingReply { .. })
    }
}

/// Default simulated typing delay before a bot reply is appended
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Context for a chat session (immutable configuration)
#[derive(Debug, Clone)]
pub struct ChatContext {
    /// Simulated typing delay before the bot reply is appended
    pub reply_delay: Duration,
    /// Reply table, owned per session
    pub matcher: ResponseMatcher,
}

impl ChatContext {
    pub fn new(reply_delay: Duration, matcher: ResponseMatcher) -> Self {
        Self {
            reply_delay,
            matcher,
        }
    }
}

impl Default for ChatContext {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_DELAY, ResponseMatcher::portfolio_rules())
    }
}
