//! Moying scene-prompt generator facade.
//!
//! Depend on this crate to get the whole stack behind feature flags: the data
//! model, the Gemini adapter, the request builder, the presentation
//! controller, configuration, and the tracing bootstrap.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use prompt_primitives as primitives;

/// Content generators (enabled by `adapters` feature).
#[cfg(feature = "adapters")]
pub use prompt_adapters as adapters;

/// Request builder and response mapper (enabled by `builder` feature).
#[cfg(feature = "builder")]
pub use prompt_builder as builder;

/// Presentation state controller (enabled by `kernel` feature).
#[cfg(feature = "kernel")]
pub use prompt_kernel as kernel;

/// Configuration management (enabled by `config` feature).
#[cfg(feature = "config")]
pub use prompt_config as config;

/// Tracing bootstrap (enabled by `telemetry` feature).
#[cfg(feature = "telemetry")]
pub use prompt_telemetry as telemetry;

#[cfg(all(feature = "kernel", feature = "config"))]
pub mod app;
