//! Effects produced by chat transitions

use std::time::Duration;

/// Effects to be executed after a chat transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a user message to the transcript
    AppendUserMessage { text: String },

    /// Append a bot message to the transcript
    AppendBotMessage { text: String },

    /// Start the simulated typing timer for reply `seq`
    ScheduleReply { seq: u64, delay: Duration },

    /// Cancel the pending reply timer
    CancelReply,

    /// Tell the UI to scroll the transcript to the newest entry
    ScrollToLatest,
}
