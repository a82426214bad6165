//! Time seam for the simulated generation pipeline.
//!
//! Every wait in the crate (the fake inference latency and the backoff
//! pauses between retries) goes through a [`Sleeper`], so tests can assert
//! the exact wait schedule without touching wall-clock time.

use futures::future::BoxFuture;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Something that can wait for a duration.
pub trait Sleeper: Send + Sync + std::fmt::Debug {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Sleeper that resolves immediately. Collapses simulated latency and
/// backoff pauses so retry flows run in microseconds under test.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantSleeper;

impl Sleeper for InstantSleeper {
    fn sleep(&self, _duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(async {})
    }
}

/// Sleeper that records every requested duration and resolves immediately.
///
/// Clones share the recording, so a test can hand one clone to a client and
/// keep the other for assertions.
#[derive(Debug, Clone, Default)]
pub struct TrackingSleeper {
    recorded: Arc<Mutex<Vec<Duration>>>,
}

impl TrackingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every duration slept so far, in call order.
    pub fn recorded(&self) -> Vec<Duration> {
        self.recorded.lock().unwrap().clone()
    }

    /// Drop all recorded durations.
    pub fn reset(&self) {
        self.recorded.lock().unwrap().clear();
    }
}

impl Sleeper for TrackingSleeper {
    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        self.recorded.lock().unwrap().push(duration);
        Box::pin(async {})
    }
}
