//! Scene-prompt request construction and reply mapping.
//!
//! [`PromptRequestBuilder`] turns a scene description plus selected tags into a
//! single schema-constrained request; [`ResponseMapper`] validates the reply
//! and assigns tag identifiers.

#![warn(missing_docs, clippy::pedantic)]

mod builder;
mod error;
pub mod instruction;
mod mapper;
pub mod schema;
pub mod template;

pub use builder::{DEFAULT_TEMPERATURE, PromptRequestBuilder};
pub use error::{
    EMPTY_INPUT_MESSAGE, GENERIC_FAILURE_MESSAGE, GenerationError, GenerationResult,
    MISSING_CREDENTIAL_MESSAGE, MalformedResponseError,
};
pub use mapper::ResponseMapper;
