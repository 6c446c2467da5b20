//! Generated prompts and generation status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{TagCategory, TagOption, group_by_category};

/// Prompts and tag suggestions produced by one generation.
///
/// Built atomically from one reply and replaced wholesale on the next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResult {
    image_prompt: String,
    video_prompt: String,
    explanation: String,
    suggested_tags: Vec<TagOption>,
}

impl GeneratedResult {
    /// Creates a result.
    #[must_use]
    pub fn new(
        image_prompt: impl Into<String>,
        video_prompt: impl Into<String>,
        explanation: impl Into<String>,
        suggested_tags: Vec<TagOption>,
    ) -> Self {
        Self {
            image_prompt: image_prompt.into(),
            video_prompt: video_prompt.into(),
            explanation: explanation.into(),
            suggested_tags,
        }
    }

    /// Bilingual still-image prompt.
    #[must_use]
    pub fn image_prompt(&self) -> &str {
        &self.image_prompt
    }

    /// Bilingual video-motion prompt.
    #[must_use]
    pub fn video_prompt(&self) -> &str {
        &self.video_prompt
    }

    /// Short explanation of the scene design.
    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Suggested tags in reply order.
    #[must_use]
    pub fn suggested_tags(&self) -> &[TagOption] {
        &self.suggested_tags
    }

    /// Suggested tags grouped by category.
    #[must_use]
    pub fn suggested_categories(&self) -> Vec<TagCategory> {
        group_by_category(&self.suggested_tags)
    }
}

/// Status driving which part of the view is visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    /// Nothing requested yet, or reset.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request produced a result.
    Success,
    /// The latest request failed.
    Error,
}

impl GenerationStatus {
    /// Returns `true` while a request is in flight.
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        })
    }
}
