//! Shared error definitions for the prompt data model.

use thiserror::Error;
use uuid::Error as UuidError;

/// Result alias used throughout the data model.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing data model values.
#[derive(Debug, Error)]
pub enum Error {
    /// The provided request identifier could not be parsed.
    #[error("invalid request id: {source}")]
    InvalidRequestId {
        /// Source parsing error from the UUID library.
        #[from]
        source: UuidError,
    },

    /// Tag identifier failed validation.
    #[error("invalid tag id `{id}`: {reason}")]
    InvalidTagId {
        /// The offending identifier string.
        id: String,
        /// Human-readable reason for rejection.
        reason: String,
    },
}
