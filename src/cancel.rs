//! Single-slot cancellation controller.
//!
//! One generation call is in flight at a time (the UI disables re-submission
//! while generating), so the controller tracks exactly one
//! [`CancellationToken`]. Tokens are explicit values threaded through every
//! suspension point; the controller only owns the slot the "stop generation"
//! button signals.

use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Owner of the current call's cancellation token.
#[derive(Debug, Default)]
pub struct CancelController {
    current: Mutex<Option<CancellationToken>>,
}

impl CancelController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint the token for a new call, replacing whatever the slot held.
    ///
    /// The previous token is dropped unsignalled; its call has already
    /// reached a terminal outcome by the time the UI lets a new one start.
    pub fn start_new_call(&self) -> CancellationToken {
        let token = CancellationToken::new();
        *self.current.lock().unwrap() = Some(token.clone());
        token
    }

    /// Signal the current call's token and clear the slot.
    ///
    /// Idempotent: with no call in flight this is a no-op.
    pub fn abort(&self) {
        if let Some(token) = self.current.lock().unwrap().take() {
            token.cancel();
        }
    }

    /// Whether a call's token currently occupies the slot.
    pub fn has_active_call(&self) -> bool {
        self.current.lock().unwrap().is_some()
    }
}
