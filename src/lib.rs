#![forbid(unsafe_code)]

//! # Atelier
//!
//! The core of an image-restyling demo: a simulated generation client with
//! cancellable single-flight calls, randomized latency and failure
//! injection, exponential-backoff retry, and a bounded most-recent-first
//! history of results.
//!
//! ## Features
//!
//! - **Retry orchestration** over a pluggable [`GenerationBackend`], with
//!   exponential backoff between overloaded attempts
//! - **Cancellation** via explicit tokens: aborting unwinds whichever wait
//!   is in flight and no result is delivered after the abort returns
//! - **Deterministic testing** through injected [`Sleeper`] and [`Entropy`]
//!   seams: no wall-clock time or thread-local randomness in tests
//! - **Bounded history** policy plus a best-effort JSON cache
//!
//! ## Quick Start
//!
//! ```rust
//! use atelier::{
//!     CancelController, GenerationClient, GenerationRequest, ImageFormat, ImagePayload,
//!     InstantSleeper, SimulatedModel,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Instant model so the example finishes immediately; drop the
//!     // `instant()` call to get the demo's 1.5–2.5s latency window.
//!     let model = SimulatedModel::builder().instant().build();
//!     let client = GenerationClient::builder()
//!         .backend(model)
//!         .sleeper(InstantSleeper)
//!         .build();
//!     let controller = CancelController::new();
//!
//!     let image = ImagePayload::from_bytes(ImageFormat::Png, vec![0x89, 0x50, 0x4e, 0x47])?;
//!     let request = GenerationRequest::new(image, "a quiet harbor at dawn", "editorial")?;
//!
//!     let token = controller.start_new_call();
//!     let result = client.generate(&request, &token).await?;
//!     assert_eq!(result.style(), "editorial");
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod backoff;
pub mod cancel;
pub mod client;
pub mod delay;
pub mod entropy;
pub mod error;
pub mod history;
pub mod image;
pub mod model;
pub mod sleeper;
pub mod store;
pub mod styles;

// Re-exports
pub use backend::{
    GenerationBackend, LatencyRange, LatencyRangeError, OverloadCurve, SimulatedModel,
    SimulatedModelBuilder,
};
pub use backoff::{Backoff, BackoffError, MAX_BACKOFF};
pub use cancel::CancelController;
pub use client::{GenerationClient, GenerationClientBuilder, MAX_RETRIES};
pub use delay::wait;
pub use entropy::{Entropy, ScriptedEntropy, ThreadEntropy};
pub use error::{GenerateError, ValidationError};
pub use history::{clear_history, record_result, MAX_HISTORY};
pub use image::{ImageFormat, ImagePayload, MAX_IMAGE_BYTES};
pub use model::{GenerationOutcome, GenerationRequest, GenerationResult};
pub use sleeper::{InstantSleeper, Sleeper, TokioSleeper, TrackingSleeper};
pub use store::HistoryStore;
pub use styles::{image_url_for, Style, FALLBACK_IMAGE_URL};
pub use tokio_util::sync::CancellationToken;
