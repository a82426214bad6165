//! Retry orchestrator for generation calls.
//!
//! Semantics:
//! - `max_retries` counts retries after the first attempt; the demo's 3
//!   retries mean 4 attempts total.
//! - Attempts run strictly sequentially; attempt `n + 1` never starts until
//!   attempt `n`'s outcome, including its backoff pause, is fully resolved.
//! - Only `ModelOverloaded` is retried. `Cancelled` propagates immediately,
//!   and the token is consulted before an attempt starts and before a
//!   successful result is committed, so no result is delivered after
//!   `abort()` returns.
//! - A final overloaded attempt surfaces `RetriesExhausted` with the total
//!   attempt count.

use crate::delay::wait;
use crate::{
    Backoff, GenerateError, GenerationBackend, GenerationRequest, GenerationResult,
    SimulatedModel, Sleeper, TokioSleeper,
};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Retries after the first attempt.
pub const MAX_RETRIES: usize = 3;

/// Single-flight generation client: drives a backend through attempts,
/// backoff pauses, and cancellation checkpoints.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    backend: Arc<dyn GenerationBackend>,
    max_retries: usize,
    backoff: Backoff,
    sleeper: Arc<dyn Sleeper>,
}

impl GenerationClient {
    pub fn builder() -> GenerationClientBuilder {
        GenerationClientBuilder::new()
    }

    /// Run one generation call to a terminal outcome.
    ///
    /// The token belongs to this call (see
    /// [`CancelController::start_new_call`](crate::CancelController::start_new_call));
    /// signalling it unwinds whichever wait is outstanding and fails the
    /// call with [`GenerateError::Cancelled`].
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        token: &CancellationToken,
    ) -> Result<GenerationResult, GenerateError> {
        let started = Instant::now();
        let attempts = self.max_retries + 1;

        for attempt in 0..attempts {
            if token.is_cancelled() {
                return Err(GenerateError::Cancelled);
            }

            match self.backend.attempt(request, attempt, token).await {
                Ok(result) => {
                    // Abort may have raced the tail of the attempt;
                    // cancellation wins over an uncommitted result.
                    if token.is_cancelled() {
                        return Err(GenerateError::Cancelled);
                    }
                    tracing::debug!(
                        id = result.id(),
                        attempt = attempt + 1,
                        "generation succeeded"
                    );
                    return Ok(result);
                }
                Err(GenerateError::ModelOverloaded) if attempt + 1 < attempts => {
                    let pause = self.backoff.delay_after(attempt);
                    tracing::info!(
                        attempt = attempt + 1,
                        attempts,
                        pause_ms = pause.as_millis() as u64,
                        "model overloaded; backing off before retry"
                    );
                    wait(pause, token, self.sleeper.as_ref()).await?;
                }
                Err(GenerateError::ModelOverloaded) => {
                    tracing::warn!(
                        attempts,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "model overloaded on the final attempt; giving up"
                    );
                    return Err(GenerateError::RetriesExhausted { attempts });
                }
                Err(other) => return Err(other),
            }
        }

        unreachable!("the attempt loop returns on every path")
    }
}

impl Default for GenerationClient {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`GenerationClient`].
#[derive(Debug)]
pub struct GenerationClientBuilder {
    backend: Arc<dyn GenerationBackend>,
    max_retries: usize,
    backoff: Backoff,
    sleeper: Arc<dyn Sleeper>,
}

impl GenerationClientBuilder {
    pub fn new() -> Self {
        Self {
            backend: Arc::new(SimulatedModel::default()),
            max_retries: MAX_RETRIES,
            backoff: Backoff::default(),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn backend<B>(mut self, backend: B) -> Self
    where
        B: GenerationBackend + 'static,
    {
        self.backend = Arc::new(backend);
        self
    }

    /// Retries after the first attempt. Zero disables retrying.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Sleeper used for backoff pauses between attempts.
    pub fn sleeper<S>(mut self, sleeper: S) -> Self
    where
        S: Sleeper + 'static,
    {
        self.sleeper = Arc::new(sleeper);
        self
    }

    pub fn build(self) -> GenerationClient {
        GenerationClient {
            backend: self.backend,
            max_retries: self.max_retries,
            backoff: self.backoff,
            sleeper: self.sleeper,
        }
    }
}

impl Default for GenerationClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
