//! Pure chat transition function

use super::{ChatContext, ChatState, Effect, Event};
use thiserror::Error;

/// Result of a chat transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ChatState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ChatState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during a chat transition
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("A reply is already pending, wait for the assistant to finish typing")]
    ReplyPending,
    #[error("Chat panel is closed")]
    PanelClosed,
}

/// Pure transition function
///
/// Given the same state, context, and event it always produces the same
/// result, with no I/O side effects. The session runtime interprets the
/// returned effects; the transcript itself lives there and is only ever
/// appended to.
pub fn transition(
    state: &ChatState,
    ctx: &ChatContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Panel visibility
        // ============================================================
        (ChatState::Closed, Event::ToggleOpen) => Ok(TransitionResult::new(ChatState::Idle)),

        (ChatState::Idle, Event::ToggleOpen) => Ok(TransitionResult::new(ChatState::Closed)),

        // Closing mid-reply abandons the pending bot message; the timer
        // must not outlive the state that scheduled it
        (ChatState::AwaitingReply { .. }, Event::ToggleOpen) => {
            Ok(TransitionResult::new(ChatState::Closed).with_effect(Effect::CancelReply))
        }

        // ============================================================
        // Submission
        // ============================================================
        (ChatState::Idle, Event::Submit { text, seq }) => {
            if text.trim().is_empty() {
                // Whitespace-only input appends nothing and stays idle
                Ok(TransitionResult::new(ChatState::Idle))
            } else {
                Ok(TransitionResult::new(ChatState::AwaitingReply {
                    user_text: text.clone(),
                    reply_seq: seq,
                })
                .with_effect(Effect::AppendUserMessage { text })
                .with_effect(Effect::ScrollToLatest)
                .with_effect(Effect::ScheduleReply {
                    seq,
                    delay: ctx.reply_delay,
                }))
            }
        }

        // One reply in flight at a time
        (ChatState::AwaitingReply { .. }, Event::Submit { .. }) => {
            Err(TransitionError::ReplyPending)
        }

        (ChatState::Closed, Event::Submit { .. }) => Err(TransitionError::PanelClosed),

        // ============================================================
        // Reply timer
        // ============================================================
        (
            ChatState::AwaitingReply {
                user_text,
                reply_seq,
            },
            Event::ReplyTimerFired { seq },
        ) if *reply_seq == seq => {
            let reply = ctx.matcher.respond(user_text).to_string();
            Ok(TransitionResult::new(ChatState::Idle)
                .with_effect(Effect::AppendBotMessage { text: reply })
                .with_effect(Effect::ScrollToLatest))
        }

        // Stale fire from a cancelled or superseded timer: nothing changes
        (state, Event::ReplyTimerFired { .. }) => Ok(TransitionResult::new(state.clone())),
    }
}
