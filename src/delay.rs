//! Cancellable wait primitive.
//!
//! Both suspension points of a generation call, the simulated inference
//! latency and the backoff pause between attempts, are a [`wait`] against
//! the call's cancellation token.

use crate::{GenerateError, Sleeper};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Wait for `duration`, or fail with [`GenerateError::Cancelled`] if `token`
/// fires first.
///
/// An already-signalled token fails without arming a timer. When both
/// branches are ready in the same poll, cancellation wins. The losing
/// branch is dropped, which releases its timer.
pub async fn wait(
    duration: Duration,
    token: &CancellationToken,
    sleeper: &dyn Sleeper,
) -> Result<(), GenerateError> {
    if token.is_cancelled() {
        return Err(GenerateError::Cancelled);
    }
    tokio::select! {
        biased;
        () = token.cancelled() => Err(GenerateError::Cancelled),
        () = sleeper.sleep(duration) => Ok(()),
    }
}
