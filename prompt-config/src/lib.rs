//! Configuration management for the scene-prompt generator.
//!
//! Settings come from the process environment. A missing credential is not a
//! configuration error: generation reports it to the user instead.

#![warn(missing_docs, clippy::pedantic)]

pub mod loader;
pub mod schema;

pub use loader::{
    API_KEY_ENV, BASE_URL_ENV, FALLBACK_API_KEY_ENV, MODEL_ENV, TEMPERATURE_ENV, TIMEOUT_ENV,
};
pub use schema::{ApiKey, ConfigError, ConfigResult, GeneratorSettings};
