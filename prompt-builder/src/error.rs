//! Error types for prompt generation.

use thiserror::Error;

/// Message shown when the credential is missing.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "API Key is missing.";

/// Message shown for every other generation failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate prompts. Please try again.";

/// Message shown when the scene description is blank.
pub const EMPTY_INPUT_MESSAGE: &str = "Scene description is empty.";

/// Result alias for prompt generation.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// The model reply failed validation.
#[derive(Debug, Error)]
#[error("malformed model response: {reason}")]
pub struct MalformedResponseError {
    reason: String,
}

impl MalformedResponseError {
    /// Creates the error from a human-readable reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the validation failure.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Failures surfaced by [`PromptRequestBuilder::generate`](crate::PromptRequestBuilder::generate).
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The scene description was blank; no request was issued.
    #[error("scene description is empty")]
    EmptyInput,

    /// No credential is configured; no request was issued.
    #[error("generator credential is missing")]
    MissingCredential,

    /// The request could not be assembled.
    #[error("invalid generation request: {reason}")]
    InvalidRequest {
        /// Underlying cause, for logs only.
        reason: String,
    },

    /// Network or API failure.
    #[error("content generation transport failed: {reason}")]
    Transport {
        /// Underlying cause, for logs only.
        reason: String,
    },

    /// The API answered without any payload.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// The payload failed required-field validation.
    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponseError),
}

impl GenerationError {
    /// Convenience constructor for request assembly failures.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    /// Text safe to show the user. Underlying causes are never included.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyInput => EMPTY_INPUT_MESSAGE,
            Self::MissingCredential => MISSING_CREDENTIAL_MESSAGE,
            Self::InvalidRequest { .. }
            | Self::Transport { .. }
            | Self::EmptyResponse
            | Self::MalformedResponse(_) => GENERIC_FAILURE_MESSAGE,
        }
    }
}
