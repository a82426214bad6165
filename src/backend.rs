//! The simulated model behind the client.
//!
//! One attempt is: wait a randomized "inference" latency, roll against the
//! attempt's overload chance, then stamp a result. Both the wait and the
//! roll go through injected seams ([`Sleeper`], [`Entropy`]) so the whole
//! pipeline is deterministic under test.

use crate::delay::wait;
use crate::{Entropy, GenerateError, GenerationRequest, GenerationResult, Sleeper};
use crate::{InstantSleeper, ThreadEntropy, TokioSleeper};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// One generation attempt. The orchestrator drives this; implementations
/// must propagate [`GenerateError::Cancelled`] out of their suspension
/// points and never retry internally.
#[async_trait]
pub trait GenerationBackend: Send + Sync + std::fmt::Debug {
    async fn attempt(
        &self,
        request: &GenerationRequest,
        attempt: usize,
        token: &CancellationToken,
    ) -> Result<GenerationResult, GenerateError>;
}

/// Uniform latency window for the simulated inference call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyRange {
    floor: Duration,
    ceiling: Duration,
}

/// Errors returned by latency configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("latency ceiling ({ceiling:?}) must be >= floor ({floor:?})")]
pub struct LatencyRangeError {
    floor: Duration,
    ceiling: Duration,
}

impl LatencyRange {
    /// Window `[floor, ceiling)`. Rejects a ceiling below the floor.
    pub fn new(floor: Duration, ceiling: Duration) -> Result<Self, LatencyRangeError> {
        if ceiling < floor {
            return Err(LatencyRangeError { floor, ceiling });
        }
        Ok(Self { floor, ceiling })
    }

    /// Degenerate window: every sample is `latency`, and no entropy is
    /// drawn for it.
    pub fn fixed(latency: Duration) -> Self {
        Self { floor: latency, ceiling: latency }
    }

    pub fn floor(&self) -> Duration {
        self.floor
    }

    pub fn ceiling(&self) -> Duration {
        self.ceiling
    }

    fn sample(&self, entropy: &dyn Entropy) -> Duration {
        let spread = self.ceiling - self.floor;
        if spread.is_zero() {
            return self.floor;
        }
        self.floor + spread.mul_f64(entropy.draw())
    }
}

impl Default for LatencyRange {
    /// The demo's window: 1500–2500 ms of pretend inference.
    fn default() -> Self {
        Self { floor: Duration::from_millis(1500), ceiling: Duration::from_millis(2500) }
    }
}

/// Per-attempt overload probability: `max(floor, base − step × attempt)`.
/// The chance eases with each retry until it hits the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverloadCurve {
    base: f64,
    step: f64,
    floor: f64,
}

impl OverloadCurve {
    /// Probabilities are clamped into `[0, 1]`.
    pub fn new(base: f64, step: f64, floor: f64) -> Self {
        Self { base: base.clamp(0.0, 1.0), step: step.max(0.0), floor: floor.clamp(0.0, 1.0) }
    }

    /// Curve that fails every attempt.
    pub fn always() -> Self {
        Self::new(1.0, 0.0, 1.0)
    }

    /// Curve that never fails.
    pub fn never() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Overload chance for a 0-based attempt index.
    pub fn chance(&self, attempt: usize) -> f64 {
        (self.base - self.step * attempt as f64).max(self.floor)
    }
}

impl Default for OverloadCurve {
    /// The demo's curve: 20% on the first attempt, easing 5 points per
    /// retry down to a 5% floor.
    fn default() -> Self {
        Self { base: 0.20, step: 0.05, floor: 0.05 }
    }
}

/// The canned-response model: no inference, just latency, failure
/// injection, and a style-table lookup.
#[derive(Debug, Clone)]
pub struct SimulatedModel {
    latency: LatencyRange,
    overload: OverloadCurve,
    sleeper: Arc<dyn Sleeper>,
    entropy: Arc<dyn Entropy>,
}

impl SimulatedModel {
    pub fn builder() -> SimulatedModelBuilder {
        SimulatedModelBuilder::new()
    }
}

impl Default for SimulatedModel {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[async_trait]
impl GenerationBackend for SimulatedModel {
    async fn attempt(
        &self,
        request: &GenerationRequest,
        attempt: usize,
        token: &CancellationToken,
    ) -> Result<GenerationResult, GenerateError> {
        let latency = self.latency.sample(self.entropy.as_ref());
        wait(latency, token, self.sleeper.as_ref()).await?;

        let chance = self.overload.chance(attempt);
        if self.entropy.draw() < chance {
            tracing::debug!(attempt, chance, "simulated model overload");
            return Err(GenerateError::ModelOverloaded);
        }

        Ok(GenerationResult::for_request(request))
    }
}

/// Builder for [`SimulatedModel`].
#[derive(Debug)]
pub struct SimulatedModelBuilder {
    latency: LatencyRange,
    overload: OverloadCurve,
    sleeper: Arc<dyn Sleeper>,
    entropy: Arc<dyn Entropy>,
}

impl SimulatedModelBuilder {
    pub fn new() -> Self {
        Self {
            latency: LatencyRange::default(),
            overload: OverloadCurve::default(),
            sleeper: Arc::new(TokioSleeper),
            entropy: Arc::new(ThreadEntropy),
        }
    }

    pub fn latency(mut self, latency: LatencyRange) -> Self {
        self.latency = latency;
        self
    }

    pub fn overload(mut self, overload: OverloadCurve) -> Self {
        self.overload = overload;
        self
    }

    pub fn sleeper<S>(mut self, sleeper: S) -> Self
    where
        S: Sleeper + 'static,
    {
        self.sleeper = Arc::new(sleeper);
        self
    }

    pub fn entropy<E>(mut self, entropy: E) -> Self
    where
        E: Entropy + 'static,
    {
        self.entropy = Arc::new(entropy);
        self
    }

    /// A model that answers instantly and never fails. The usual base for
    /// deterministic tests.
    pub fn instant(self) -> Self {
        self.latency(LatencyRange::fixed(Duration::ZERO))
            .overload(OverloadCurve::never())
            .sleeper(InstantSleeper)
    }

    pub fn build(self) -> SimulatedModel {
        SimulatedModel {
            latency: self.latency,
            overload: self.overload,
            sleeper: self.sleeper,
            entropy: self.entropy,
        }
    }
}

impl Default for SimulatedModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{ImageFormat, ImagePayload};
    use crate::{ScriptedEntropy, TrackingSleeper};

    fn request() -> GenerationRequest {
        let image = ImagePayload::from_bytes(ImageFormat::Png, vec![7]).unwrap();
        GenerationRequest::new(image, "a lighthouse in fog", "minimalist").unwrap()
    }

    #[test]
    fn overload_curve_matches_the_demo_schedule() {
        let curve = OverloadCurve::default();
        assert!((curve.chance(0) - 0.20).abs() < 1e-12);
        assert!((curve.chance(1) - 0.15).abs() < 1e-12);
        assert!((curve.chance(2) - 0.10).abs() < 1e-12);
        assert!((curve.chance(3) - 0.05).abs() < 1e-12);
        // Past the floor the chance stops decaying.
        assert!((curve.chance(10) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn overload_curve_clamps_probabilities() {
        let curve = OverloadCurve::new(1.5, -0.2, -1.0);
        assert_eq!(curve.chance(0), 1.0);
        assert_eq!(curve.chance(50), 1.0);
    }

    #[test]
    fn latency_samples_stay_in_the_window() {
        let range = LatencyRange::default();
        let entropy = ThreadEntropy;
        for _ in 0..1000 {
            let sample = range.sample(&entropy);
            assert!(sample >= Duration::from_millis(1500));
            assert!(sample < Duration::from_millis(2500));
        }
    }

    #[test]
    fn fixed_latency_draws_no_entropy() {
        let entropy = ScriptedEntropy::constant(0.3);
        let sample = LatencyRange::fixed(Duration::from_millis(80)).sample(&entropy);
        assert_eq!(sample, Duration::from_millis(80));
        assert_eq!(entropy.draws(), 0);
    }

    #[test]
    fn inverted_latency_window_is_rejected() {
        let err = LatencyRange::new(Duration::from_millis(100), Duration::from_millis(50));
        assert!(err.is_err());
    }

    #[tokio::test]
    async fn attempt_waits_the_sampled_latency() {
        let sleeper = TrackingSleeper::new();
        let model = SimulatedModel::builder()
            .latency(LatencyRange::fixed(Duration::from_millis(1750)))
            .overload(OverloadCurve::never())
            .sleeper(sleeper.clone())
            .entropy(ScriptedEntropy::constant(0.9))
            .build();

        let token = CancellationToken::new();
        let result = model.attempt(&request(), 0, &token).await.unwrap();
        assert_eq!(sleeper.recorded(), vec![Duration::from_millis(1750)]);
        assert_eq!(result.prompt(), "a lighthouse in fog");
        assert_eq!(result.style(), "minimalist");
    }

    #[tokio::test]
    async fn attempt_fails_when_the_roll_lands_under_the_chance() {
        let model = SimulatedModel::builder()
            .instant()
            .overload(OverloadCurve::default())
            .entropy(ScriptedEntropy::constant(0.05))
            .build();

        let token = CancellationToken::new();
        // Attempt 0 carries a 20% chance; a 0.05 roll is under it.
        let err = model.attempt(&request(), 0, &token).await.unwrap_err();
        assert!(err.is_overloaded());
        // Attempt 3 is down to the 5% floor; the same roll now succeeds.
        assert!(model.attempt(&request(), 3, &token).await.is_ok());
    }

    #[tokio::test]
    async fn forced_overload_fails_every_attempt() {
        let model = SimulatedModel::builder()
            .instant()
            .overload(OverloadCurve::always())
            .entropy(ScriptedEntropy::constant(0.999))
            .build();

        let token = CancellationToken::new();
        for attempt in 0..8 {
            let err = model.attempt(&request(), attempt, &token).await.unwrap_err();
            assert!(err.is_overloaded());
        }
    }

    #[tokio::test]
    async fn cancelled_token_stops_the_attempt_before_any_roll() {
        let entropy = ScriptedEntropy::constant(0.9);
        let model = SimulatedModel::builder()
            .latency(LatencyRange::fixed(Duration::from_secs(2)))
            .sleeper(InstantSleeper)
            .entropy(entropy.clone())
            .build();

        let token = CancellationToken::new();
        token.cancel();
        let err = model.attempt(&request(), 0, &token).await.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(entropy.draws(), 0);
    }
}
