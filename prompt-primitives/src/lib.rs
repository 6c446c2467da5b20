//! Core shared types for the Moying scene-prompt generator.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod ids;
mod result;
mod tag;

/// Error type and result alias shared across the data model.
pub use error::{Error, Result};
/// Identifiers for tags and generation requests.
pub use ids::{GENERATED_TAG_PREFIX, RequestId, TagId};
/// Generated prompts and the status of the latest generation.
pub use result::{GeneratedResult, GenerationStatus};
/// Style tags, their grouping, and the user's selection.
pub use tag::{SelectedTags, TagCategory, TagOption, group_by_category};
