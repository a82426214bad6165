//! Randomness seam for the simulated model.
//!
//! The latency draw and the overload roll both pull from an [`Entropy`]
//! source. Production uses the thread-local RNG; tests script the draws and
//! count them, which is how the "no draws happen after cancellation"
//! guarantee gets asserted.

use rand::Rng;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Source of uniform values in `[0, 1)`.
pub trait Entropy: Send + Sync + std::fmt::Debug {
    fn draw(&self) -> f64;
}

/// Production entropy backed by `rand`'s thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadEntropy;

impl Entropy for ThreadEntropy {
    fn draw(&self) -> f64 {
        rand::rng().random()
    }
}

/// Deterministic entropy for tests: hands out a scripted sequence of values,
/// then a fixed fallback once the script runs dry. Counts every draw.
///
/// Clones share the script and the counter.
#[derive(Debug, Clone)]
pub struct ScriptedEntropy {
    script: Arc<Mutex<VecDeque<f64>>>,
    draws: Arc<AtomicUsize>,
    fallback: f64,
}

impl ScriptedEntropy {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            script: Arc::new(Mutex::new(values.into_iter().collect())),
            draws: Arc::new(AtomicUsize::new(0)),
            fallback: 0.5,
        }
    }

    /// Entropy that returns `value` on every draw.
    pub fn constant(value: f64) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            draws: Arc::new(AtomicUsize::new(0)),
            fallback: value,
        }
    }

    /// Number of draws taken so far.
    pub fn draws(&self) -> usize {
        self.draws.load(Ordering::SeqCst)
    }
}

impl Entropy for ScriptedEntropy {
    fn draw(&self) -> f64 {
        self.draws.fetch_add(1, Ordering::SeqCst);
        self.script.lock().unwrap().pop_front().unwrap_or(self.fallback)
    }
}
