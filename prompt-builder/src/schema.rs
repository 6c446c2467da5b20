//! JSON schema the model reply must satisfy.

use serde_json::{Value, json};

/// Top-level fields every reply must carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["imagePrompt", "videoPrompt", "explanation", "suggestedTags"];

/// Fields every suggested tag must carry.
pub const REQUIRED_TAG_FIELDS: [&str; 3] = ["label", "value", "category"];

/// Builds the Gemini response schema for a scene-prompt reply.
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "imagePrompt": {
                "type": "STRING",
                "description": "Detailed prompt for image generation. Must provide BOTH English and Chinese versions. Format:\n[English Prompt]\n\n[Chinese Translation]"
            },
            "videoPrompt": {
                "type": "STRING",
                "description": "Prompt for video generation. Must provide BOTH English and Chinese versions. Format:\n[English Prompt]\n\n[Chinese Translation]"
            },
            "explanation": {
                "type": "STRING",
                "description": "A brief explanation in Chinese of how this prompt captures the Gufeng aesthetic."
            },
            "suggestedTags": {
                "type": "ARRAY",
                "description": "A list of suggested modification tags categorized by type (e.g. Lighting, Camera, Atmosphere).",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": {"type": "STRING", "description": "Display label in Chinese (e.g. '侧逆光')"},
                        "value": {"type": "STRING", "description": "Prompt keyword in English (e.g. 'rim lighting')"},
                        "category": {"type": "STRING", "description": "Category in Chinese (e.g. '光影')"}
                    },
                    "required": REQUIRED_TAG_FIELDS
                }
            }
        },
        "required": REQUIRED_FIELDS
    })
}
