//! Shared content generator trait and data structures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result alias used by content generators.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// MIME type requested when the reply must be JSON.
pub const JSON_MIME_TYPE: &str = "application/json";

/// Error type shared by generator implementations.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Generator is misconfigured.
    #[error("adapter not configured: {reason}")]
    Configuration {
        /// Additional context for the failure.
        reason: String,
    },

    /// No API key or credential was supplied.
    #[error("adapter credential missing")]
    MissingCredential,

    /// The supplied request was invalid for the target model.
    #[error("invalid content request: {reason}")]
    InvalidRequest {
        /// Reason describing why the request could not be processed.
        reason: String,
    },

    /// Transport-level failures (network, protocol, non-success status).
    #[error("adapter transport error: {reason}")]
    Transport {
        /// Additional context about the error.
        reason: String,
    },

    /// The provider returned a reply that could not be decoded.
    #[error("adapter response error: {reason}")]
    Response {
        /// Additional context about the response failure.
        reason: String,
    },
}

impl AdapterError {
    /// Convenience constructor for invalid requests.
    #[must_use]
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for configuration issues.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
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

    /// Convenience constructor for undecodable replies.
    #[must_use]
    pub fn response(reason: impl Into<String>) -> Self {
        Self::Response {
            reason: reason.into(),
        }
    }
}

/// Minimal metadata describing a generator instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterMetadata {
    provider: &'static str,
    model: String,
}

impl AdapterMetadata {
    /// Creates metadata for the supplied provider and model identifier.
    #[must_use]
    pub fn new(provider: &'static str, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Returns the provider identifier (e.g., "gemini").
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        self.provider
    }

    /// Returns the configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Single-turn request whose reply is constrained to a JSON schema.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct StructuredRequest {
    instruction: String,
    response_schema: Value,
    response_mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl StructuredRequest {
    /// Creates a request asking for JSON matching `response_schema`.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::InvalidRequest`] if the instruction is blank or
    /// the schema is not a JSON object.
    pub fn new(instruction: impl Into<String>, response_schema: Value) -> AdapterResult<Self> {
        let instruction = instruction.into();
        if instruction.trim().is_empty() {
            return Err(AdapterError::invalid_request(
                "structured request requires an instruction",
            ));
        }
        if !response_schema.is_object() {
            return Err(AdapterError::invalid_request(
                "response schema must be a JSON object",
            ));
        }

        Ok(Self {
            instruction,
            response_schema,
            response_mime_type: JSON_MIME_TYPE.to_owned(),
            temperature: None,
        })
    }

    /// Sets the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Returns the natural-language instruction.
    #[must_use]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Returns the schema the reply must satisfy.
    #[must_use]
    pub fn response_schema(&self) -> &Value {
        &self.response_schema
    }

    /// Returns the requested reply MIME type.
    #[must_use]
    pub fn response_mime_type(&self) -> &str {
        &self.response_mime_type
    }

    /// Returns the configured sampling temperature.
    #[must_use]
    pub const fn temperature(&self) -> Option<f32> {
        self.temperature
    }
}

/// Trait implemented by all content generators.
///
/// Implementations are shared behind an `Arc` and issue exactly one
/// round-trip per call, without retries.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Returns basic metadata describing the generator instance.
    fn metadata(&self) -> &AdapterMetadata;

    /// Returns `false` when no credential is configured. Callers check this
    /// before issuing a request.
    fn is_configured(&self) -> bool;

    /// Executes the request and returns the raw reply text.
    async fn generate_content(&self, request: StructuredRequest) -> AdapterResult<String>;
}
