//! Presentation state for the scene-prompt generator.
//!
//! This crate owns the view state a UI renders (input, selected tags, result,
//! status, error) and drives generations through a
//! [`PromptRequestBuilder`](prompt_builder::PromptRequestBuilder), applying only
//! the latest completion.

#![warn(missing_docs, clippy::pedantic)]

mod controller;
mod transitions;

pub use controller::{GenerateOutcome, GenerationTicket, PresentationController, ViewState};
pub use transitions::{StatusEvent, StatusMachine, TransitionError, TransitionResult};
