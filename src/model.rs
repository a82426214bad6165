//! Request/response contract for one generation call.

use crate::{styles, GenerateError, ImagePayload, ValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What the caller submits: a validated source image, a trimmed non-empty
/// prompt, and a style tag. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    image: ImagePayload,
    prompt: String,
    style: String,
}

impl GenerationRequest {
    /// Build a request, trimming the prompt and rejecting an empty one.
    ///
    /// The style tag is open: unknown tags are legal and resolve to the
    /// fallback image (see [`styles::image_url_for`]).
    pub fn new(
        image: ImagePayload,
        prompt: impl Into<String>,
        style: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let prompt = prompt.into().trim().to_owned();
        if prompt.is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }
        Ok(Self { image, prompt, style: style.into() })
    }

    pub fn image(&self) -> &ImagePayload {
        &self.image
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn style(&self) -> &str {
        &self.style
    }
}

/// One successful generation. Built only by a succeeding attempt and never
/// mutated afterwards.
///
/// Serializes with the history cache's camelCase field names
/// (`imageUrl`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    id: String,
    image_url: String,
    prompt: String,
    style: String,
    created_at: DateTime<Utc>,
}

impl GenerationResult {
    /// Stamp a result for `request`: fresh id, style-resolved image URL,
    /// prompt and style copied verbatim, creation time now.
    pub(crate) fn for_request(request: &GenerationRequest) -> Self {
        Self {
            id: fresh_id(),
            image_url: styles::image_url_for(request.style()).to_owned(),
            prompt: request.prompt().to_owned(),
            style: request.style().to_owned(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Unique result id: UUIDv7, a millisecond timestamp plus random bits, so
/// ids sort by creation time and collisions are negligible.
fn fresh_id() -> String {
    Uuid::now_v7().to_string()
}

/// Tagged outcome of a call, for notification and rendering collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success(GenerationResult),
    Cancelled,
    Failed(GenerateError),
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The result, if the call succeeded.
    pub fn result(&self) -> Option<&GenerationResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }
}

impl From<Result<GenerationResult, GenerateError>> for GenerationOutcome {
    fn from(outcome: Result<GenerationResult, GenerateError>) -> Self {
        match outcome {
            Ok(result) => Self::Success(result),
            Err(GenerateError::Cancelled) => Self::Cancelled,
            Err(error) => Self::Failed(error),
        }
    }
}
