//! Notification tray store
//!
//! Read/unread tracking over an in-memory list, plus the one-shot welcome
//! banner. The unread count is always derived from the read flags; there is
//! no separate counter to drift.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(test)]
mod proptests;

/// Default delay before the welcome banner hides itself
pub const WELCOME_AUTO_HIDE: std::time::Duration = std::time::Duration::from_millis(8000);

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
}

/// A tray entry. Only `read` ever changes after creation, and only from
/// false to true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        created_at: DateTime<Utc>,
        read: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
            kind,
            created_at,
            read,
        }
    }
}

/// Notification as sent to clients: the stored fields plus the rendered
/// relative age label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationView {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    pub relative_time: String,
}

impl NotificationView {
    fn render(notification: &Notification, now: DateTime<Utc>) -> Self {
        Self {
            id: notification.id,
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind,
            created_at: notification.created_at,
            read: notification.read,
            relative_time: format_relative_time(notification.created_at, now),
        }
    }
}

/// In-memory notification store, one per visitor session
#[derive(Debug, Clone)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
    welcome_visible: bool,
    /// Names the live auto-hide timer; manual dismissal bumps it so a stale
    /// fire cannot mutate the flag
    welcome_seq: u64,
}

impl NotificationStore {
    pub fn new() -> Self {
        Self {
            notifications: Vec::new(),
            welcome_visible: true,
            welcome_seq: 0,
        }
    }

    /// Store seeded with the portfolio's fixed notifications, newest first
    pub fn with_seed_data() -> Self {
        let now = Utc::now();
        let mut store = Self::new();
        store.push(Notification::new(
            "Portfolio Updated",
            "Welcome to my interactive portfolio! Feel free to explore and use the chatbot for any questions.",
            NotificationKind::Info,
            now - Duration::minutes(5),
            false,
        ));
        store.push(Notification::new(
            "New Project Added",
            "Check out my latest work in the projects section - Analytics Dashboard with interactive charts.",
            NotificationKind::Success,
            now - Duration::hours(2),
            false,
        ));
        store.push(Notification::new(
            "Available for Work",
            "I'm currently accepting new project opportunities. Let's discuss your next idea!",
            NotificationKind::Warning,
            now - Duration::days(1),
            true,
        ));
        store
    }

    pub fn push(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Wire views of the tray, with age labels computed against `now`
    pub fn views(&self, now: DateTime<Utc>) -> Vec<NotificationView> {
        self.notifications
            .iter()
            .map(|notification| NotificationView::render(notification, now))
            .collect()
    }

    /// Flip `read` to true. Idempotent; unknown ids are ignored.
    ///
    /// Returns whether anything changed.
    pub fn mark_read(&mut self, id: Uuid) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) if !notification.read => {
                notification.read = true;
                true
            }
            _ => false,
        }
    }

    /// Remove the notification with the given id. Unknown ids are ignored.
    ///
    /// Returns whether anything was removed.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    /// Count of unread notifications, recomputed on every call
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    pub fn welcome_visible(&self) -> bool {
        self.welcome_visible
    }

    /// Sequence the auto-hide timer must present when it fires
    pub fn welcome_seq(&self) -> u64 {
        self.welcome_seq
    }

    /// Manually hide the welcome banner and invalidate the pending
    /// auto-hide timer. Idempotent.
    pub fn dismiss_welcome(&mut self) -> bool {
        if self.welcome_visible {
            self.welcome_visible = false;
            self.welcome_seq += 1;
            true
        } else {
            false
        }
    }

    /// Auto-hide timer fired. Hides the banner only if `seq` still names
    /// the live timer; a stale fire changes nothing.
    pub fn welcome_timer_fired(&mut self, seq: u64) -> bool {
        if self.welcome_visible && seq == self.welcome_seq {
            self.welcome_visible = false;
            true
        } else {
            false
        }
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Relative age label: `"{m}m ago"` under an hour, `"{h}h ago"` under a
/// day, `"{d}d ago"` beyond that. Floor division, no rounding up.
pub fn format_relative_time(created_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = now.signed_duration_since(created_at).num_minutes().max(0);
    if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 60 * 24 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / (60 * 24))
    }
}
