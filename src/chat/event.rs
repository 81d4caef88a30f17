//! Events that drive the chat panel

/// Events that trigger chat state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// Open/close flip from the panel toggle button
    ToggleOpen,

    /// User submitted the input buffer.
    ///
    /// `seq` is allocated by the session runtime and names the reply timer
    /// that will be scheduled if the submission is accepted.
    Submit { text: String, seq: u64 },

    /// The simulated typing delay elapsed
    ReplyTimerFired { seq: u64 },
}
