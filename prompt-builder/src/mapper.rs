//! Validating boundary between the untyped model reply and [`GeneratedResult`].

use chrono::{DateTime, Utc};
use prompt_primitives::{GeneratedResult, TagId, TagOption};
use serde::Deserialize;
use serde_json::Value;

use crate::error::MalformedResponseError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResult {
    image_prompt: String,
    video_prompt: String,
    explanation: String,
    suggested_tags: Vec<RawTag>,
}

#[derive(Debug, Deserialize)]
struct RawTag {
    label: String,
    value: String,
    category: String,
}

/// Maps model replies into [`GeneratedResult`] values.
///
/// Either every required field is present with the right type, or mapping
/// fails; a partially populated result is never produced.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResponseMapper;

impl ResponseMapper {
    /// Parses reply text as JSON and maps it, stamping tag ids with the
    /// current time.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedResponseError`] if the text is not JSON or fails
    /// validation.
    pub fn parse(text: &str) -> Result<GeneratedResult, MalformedResponseError> {
        let raw: Value = serde_json::from_str(text)
            .map_err(|err| MalformedResponseError::new(format!("reply is not JSON: {err}")))?;
        Self::map(&raw)
    }

    /// Maps a raw reply, stamping tag ids with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedResponseError`] if a required field is absent or has
    /// the wrong type.
    pub fn map(raw: &Value) -> Result<GeneratedResult, MalformedResponseError> {
        Self::map_at(raw, Utc::now())
    }

    /// Maps a raw reply produced at `generated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedResponseError`] if a required field is absent or has
    /// the wrong type.
    pub fn map_at(
        raw: &Value,
        generated_at: DateTime<Utc>,
    ) -> Result<GeneratedResult, MalformedResponseError> {
        if !raw.is_object() {
            return Err(MalformedResponseError::new("reply is not a JSON object"));
        }
        // derived visitors also accept arrays by position
        if let Some(tags) = raw.get("suggestedTags").and_then(Value::as_array) {
            if let Some(index) = tags.iter().position(|tag| !tag.is_object()) {
                return Err(MalformedResponseError::new(format!(
                    "suggestedTags[{index}] is not an object"
                )));
            }
        }
        let parsed = RawResult::deserialize(raw)
            .map_err(|err| MalformedResponseError::new(err.to_string()))?;

        let suggested_tags = parsed
            .suggested_tags
            .into_iter()
            .enumerate()
            .map(|(index, tag)| {
                TagOption::new(
                    TagId::synthesized(index, generated_at),
                    tag.label,
                    tag.value,
                    tag.category,
                )
            })
            .collect();

        Ok(GeneratedResult::new(
            parsed.image_prompt,
            parsed.video_prompt,
            parsed.explanation,
            suggested_tags,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::TimeZone;
    use serde_json::json;

    use super::*;

    fn payload(tags: usize) -> Value {
        let tags: Vec<Value> = (0..tags)
            .map(|i| json!({"label": format!("标签{i}"), "value": format!("value {i}"), "category": "光影"}))
            .collect();
        json!({
            "imagePrompt": "A swordswoman in red\n\n红衣女侠",
            "videoPrompt": "slow motion, leaves falling\n\n慢动作，落叶",
            "explanation": "留白构图",
            "suggestedTags": tags
        })
    }

    #[test]
    fn maps_fields_and_assigns_unique_ids() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let result = ResponseMapper::map_at(&payload(6), at).expect("valid payload");

        assert_eq!(result.image_prompt(), "A swordswoman in red\n\n红衣女侠");
        assert_eq!(result.explanation(), "留白构图");
        assert_eq!(result.suggested_tags().len(), 6);

        let ids: HashSet<_> = result.suggested_tags().iter().map(|t| t.id().clone()).collect();
        assert_eq!(ids.len(), 6);
        assert!(result.suggested_tags().iter().all(|t| !t.id().as_str().is_empty()));

        let third = &result.suggested_tags()[2];
        assert_eq!(third.label(), "标签2");
        assert_eq!(third.value(), "value 2");
        assert_eq!(third.category(), "光影");
        assert_eq!(third.id().as_str(), "gen-tag-2-1700000000000");
    }

    #[test]
    fn empty_tag_list_is_valid() {
        let result = ResponseMapper::map(&payload(0)).unwrap();
        assert!(result.suggested_tags().is_empty());
    }

    #[test]
    fn missing_suggested_tags_is_malformed() {
        let mut raw = payload(3);
        raw.as_object_mut().unwrap().remove("suggestedTags");

        let err = ResponseMapper::map(&raw).expect_err("missing tags");
        assert!(err.reason().contains("suggestedTags"));
    }

    #[test]
    fn tag_missing_category_is_malformed() {
        let mut raw = payload(2);
        raw["suggestedTags"][1].as_object_mut().unwrap().remove("category");
        assert!(ResponseMapper::map(&raw).is_err());
    }

    #[test]
    fn non_object_tag_is_malformed() {
        let mut raw = payload(0);
        raw["suggestedTags"] = json!(["rim lighting"]);
        assert!(ResponseMapper::map(&raw).is_err());
    }

    #[test]
    fn positional_tag_array_is_malformed() {
        let mut raw = payload(1);
        raw["suggestedTags"] = json!([
            {"label": "薄雾", "value": "light mist", "category": "氛围"},
            ["侧逆光", "rim lighting", "光影"]
        ]);

        let err = ResponseMapper::map(&raw).expect_err("array element");
        assert_eq!(err.reason(), "suggestedTags[1] is not an object");
    }

    #[test]
    fn positional_result_array_is_malformed() {
        let raw = json!(["a", "b", "c", []]);
        assert!(ResponseMapper::map(&raw).is_err());
    }

    #[test]
    fn wrong_field_type_is_malformed() {
        let mut raw = payload(1);
        raw["imagePrompt"] = json!(42);
        assert!(ResponseMapper::map(&raw).is_err());
    }

    #[test]
    fn non_object_reply_is_malformed() {
        let err = ResponseMapper::map(&json!([1, 2])).expect_err("array");
        assert_eq!(err.reason(), "reply is not a JSON object");
    }

    #[test]
    fn parse_rejects_invalid_json() {
        let err = ResponseMapper::parse("{\"imagePrompt\": ").expect_err("truncated");
        assert!(err.reason().starts_with("reply is not JSON"));
    }

    #[test]
    fn parse_ignores_unknown_fields() {
        let mut raw = payload(1);
        raw["mood"] = json!("melancholy");
        let result = ResponseMapper::parse(&raw.to_string()).unwrap();
        assert_eq!(result.suggested_tags().len(), 1);
    }
}
