//! Content generators used to produce scene prompts.
//!
//! The [`traits::ContentGenerator`] seam lets callers inject the hosted Gemini
//! adapter or a test double.

#![warn(missing_docs, clippy::pedantic)]

pub mod gemini;
pub mod traits;

mod http_client;
