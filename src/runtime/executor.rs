//! Session runtime executor

use super::timer::TimerHandle;
use super::{SessionConfig, SessionEvent, SessionSnapshot, UiEvent};

use crate::chat::{self, ChatContext, ChatState, Effect, Message, GREETING};
use crate::notify::NotificationStore;
use chrono::Utc;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use uuid::Uuid;

/// Runtime that drives one visitor's widgets
///
/// Owns the chat state machine, the transcript, the notification store,
/// and the live timers. All mutation happens on this task; clients talk
/// to it through the event channel and observe it through the broadcast
/// channel.
pub struct SessionRuntime {
    session_id: Uuid,
    chat_ctx: ChatContext,
    chat_state: ChatState,
    transcript: Vec<Message>,
    notifications: NotificationStore,
    /// How long the welcome banner stays up before auto-hiding
    welcome_hide: Duration,
    /// Allocator for reply timer sequence numbers
    next_reply_seq: u64,
    /// Handle for the pending bot reply timer, if any
    reply_timer: Option<TimerHandle>,
    /// Handle for the welcome banner auto-hide timer, if any
    welcome_timer: Option<TimerHandle>,
    event_rx: mpsc::Receiver<SessionEvent>,
    event_tx: mpsc::Sender<SessionEvent>,
    broadcast_tx: broadcast::Sender<UiEvent>,
}

impl SessionRuntime {
    pub fn new(
        session_id: Uuid,
        config: SessionConfig,
        event_rx: mpsc::Receiver<SessionEvent>,
        event_tx: mpsc::Sender<SessionEvent>,
        broadcast_tx: broadcast::Sender<UiEvent>,
    ) -> Self {
        Self {
            session_id,
            chat_ctx: ChatContext::new(config.reply_delay, config.matcher),
            chat_state: ChatState::default(),
            transcript: vec![Message::bot(GREETING)],
            notifications: NotificationStore::with_seed_data(),
            welcome_hide: config.welcome_hide,
            next_reply_seq: 0,
            reply_timer: None,
            welcome_timer: None,
            event_rx,
            event_tx,
            broadcast_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(session_id = %self.session_id, "Starting session runtime");

        self.arm_welcome_timer();

        // Process events in a loop - no recursion
        loop {
            tokio::select! {
                Some(event) = self.event_rx.recv() => {
                    if matches!(event, SessionEvent::Shutdown) {
                        break;
                    }
                    if let Err(e) = self.process_event(event) {
                        tracing::warn!(session_id = %self.session_id, error = %e, "Rejected session event");
                        let _ = self.broadcast_tx.send(UiEvent::Error { message: e });
                    }
                }
                else => break,
            }
        }

        tracing::info!(session_id = %self.session_id, "Session runtime stopped");
    }

    fn process_event(&mut self, event: SessionEvent) -> Result<(), String> {
        match event {
            SessionEvent::ToggleChat => self.process_chat_event(chat::Event::ToggleOpen),

            SessionEvent::SubmitChat { text } => {
                // The sequence number is allocated here, outside the pure
                // transition, so the scheduled timer and the eventual fire
                // carry the same identity.
                let seq = self.next_reply_seq;
                self.next_reply_seq += 1;
                self.process_chat_event(chat::Event::Submit { text, seq })
            }

            SessionEvent::ReplyTimerFired { seq } => {
                self.process_chat_event(chat::Event::ReplyTimerFired { seq })?;
                // The handle is spent once the reply landed
                if !self.chat_state.is_typing() {
                    self.reply_timer = None;
                }
                Ok(())
            }

            SessionEvent::MarkNotificationRead { id } => {
                if self.notifications.mark_read(id) {
                    self.publish_notifications();
                }
                Ok(())
            }

            SessionEvent::DismissNotification { id } => {
                if self.notifications.dismiss(id) {
                    self.publish_notifications();
                }
                Ok(())
            }

            SessionEvent::DismissWelcome => {
                if let Some(timer) = self.welcome_timer.take() {
                    timer.cancel();
                }
                if self.notifications.dismiss_welcome() {
                    let _ = self
                        .broadcast_tx
                        .send(UiEvent::WelcomeChanged { visible: false });
                }
                Ok(())
            }

            SessionEvent::WelcomeTimerFired { seq } => {
                if self.notifications.welcome_timer_fired(seq) {
                    let _ = self
                        .broadcast_tx
                        .send(UiEvent::WelcomeChanged { visible: false });
                }
                self.welcome_timer = None;
                Ok(())
            }

            SessionEvent::Snapshot { reply } => {
                // The requesting client may have disconnected already
                let _ = reply.send(self.snapshot());
                Ok(())
            }

            // Intercepted by the run loop
            SessionEvent::Shutdown => Ok(()),
        }
    }

    /// Run one event through the chat state machine and apply the result
    fn process_chat_event(&mut self, event: chat::Event) -> Result<(), String> {
        // Pure state transition
        let result = match chat::transition(&self.chat_state, &self.chat_ctx, event) {
            Ok(r) => r,
            Err(e) => {
                // Transition errors are user-facing (e.g. "reply pending")
                return Err(e.to_string());
            }
        };

        let old_state = std::mem::replace(&mut self.chat_state, result.new_state);

        if old_state != self.chat_state {
            let _ = self.broadcast_tx.send(UiEvent::ChatStateChanged {
                open: self.chat_state.is_open(),
                typing: self.chat_state.is_typing(),
            });
        }

        for effect in result.effects {
            self.execute_effect(effect);
        }

        Ok(())
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AppendUserMessage { text } => {
                self.append_message(Message::user(text));
            }

            Effect::AppendBotMessage { text } => {
                self.append_message(Message::bot(text));
            }

            Effect::ScheduleReply { seq, delay } => {
                let event_tx = self.event_tx.clone();
                self.reply_timer = Some(TimerHandle::spawn(delay, async move {
                    let _ = event_tx.send(SessionEvent::ReplyTimerFired { seq }).await;
                }));
            }

            Effect::CancelReply => {
                if let Some(timer) = self.reply_timer.take() {
                    timer.cancel();
                }
            }

            Effect::ScrollToLatest => {
                let _ = self.broadcast_tx.send(UiEvent::ScrollToLatest);
            }
        }
    }

    fn append_message(&mut self, message: Message) {
        let message_json = serde_json::to_value(&message).unwrap_or(Value::Null);
        self.transcript.push(message);
        let _ = self.broadcast_tx.send(UiEvent::Message {
            message: message_json,
        });
    }

    fn publish_notifications(&self) {
        let views = self.notifications.views(Utc::now());
        let notifications = serde_json::to_value(views).unwrap_or(Value::Null);
        let _ = self.broadcast_tx.send(UiEvent::NotificationsChanged {
            notifications,
            unread_count: self.notifications.unread_count(),
        });
    }

    /// Arm the welcome auto-hide timer with the store's current sequence
    fn arm_welcome_timer(&mut self) {
        let seq = self.notifications.welcome_seq();
        let event_tx = self.event_tx.clone();
        self.welcome_timer = Some(TimerHandle::spawn(self.welcome_hide, async move {
            let _ = event_tx.send(SessionEvent::WelcomeTimerFired { seq }).await;
        }));
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            chat_open: self.chat_state.is_open(),
            typing: self.chat_state.is_typing(),
            transcript: self.transcript.clone(),
            notifications: self.notifications.views(Utc::now()),
            unread_count: self.notifications.unread_count(),
            welcome_visible: self.notifications.welcome_visible(),
        }
    }
}
