//! Cancellable one-shot timers
//!
//! Every scheduled fire in a session (bot reply, welcome banner auto-hide)
//! is owned by a [`TimerHandle`]. Cancelling the handle, or dropping it,
//! stops the timer before it fires; a fire that already went out is caught
//! by the sequence guard on the receiving side.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Handle to a pending one-shot timer task
pub struct TimerHandle {
    token: CancellationToken,
}

impl TimerHandle {
    /// Spawn a task that awaits `fire` after `delay` unless cancelled first
    pub fn spawn<F>(delay: Duration, fire: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        let task_token = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = tokio::time::sleep(delay) => fire.await,
                () = task_token.cancelled() => {}
            }
        });
        Self { token }
    }

    /// Stop the timer. A no-op if it already fired.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

// ============================================================================
// Tests
// ============================================================================
