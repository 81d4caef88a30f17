//! Chat assistant state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions: the
//! [`transition`] function maps (state, event) to a new state plus effects,
//! and the session runtime interprets the effects.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{ChatContext, ChatState, Message, Sender, GREETING};
pub use transition::transition;
