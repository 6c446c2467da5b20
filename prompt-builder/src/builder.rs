//! Request construction and the single outbound call.

use std::fmt;
use std::sync::Arc;

use prompt_adapters::traits::{AdapterError, ContentGenerator, StructuredRequest};
use prompt_primitives::{GeneratedResult, RequestId, TagOption};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::error::{GenerationError, GenerationResult};
use crate::instruction::build_instruction;
use crate::mapper::ResponseMapper;
use crate::schema::response_schema;

/// Sampling temperature used unless overridden.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Turns a scene description and selected tags into one schema-constrained
/// request and maps the reply.
///
/// The builder holds no request state; clone the `Arc` it wraps to share the
/// underlying generator.
#[derive(Clone)]
pub struct PromptRequestBuilder {
    generator: Arc<dyn ContentGenerator>,
    temperature: f32,
}

impl fmt::Debug for PromptRequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PromptRequestBuilder")
            .field("provider", &self.generator.metadata().provider())
            .field("model", &self.generator.metadata().model())
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl PromptRequestBuilder {
    /// Creates a builder that sends requests through `generator`.
    #[must_use]
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            generator,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Overrides the sampling temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Returns the configured sampling temperature.
    #[must_use]
    pub const fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Builds the request that [`generate`](Self::generate) would send.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptyInput`] for a blank description.
    pub fn prepare(
        &self,
        user_input: &str,
        selected_tags: &[TagOption],
    ) -> GenerationResult<StructuredRequest> {
        if user_input.trim().is_empty() {
            return Err(GenerationError::EmptyInput);
        }

        let instruction = build_instruction(user_input, selected_tags)
            .map_err(|err| GenerationError::invalid_request(err.to_string()))?;

        StructuredRequest::new(instruction, response_schema())
            .map(|request| request.with_temperature(self.temperature))
            .map_err(map_adapter_error)
    }

    /// Generates prompts for one scene.
    ///
    /// Issues at most one request and never retries.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::EmptyInput`] for a blank description.
    /// - [`GenerationError::MissingCredential`] when the generator has no
    ///   credential; nothing is sent.
    /// - [`GenerationError::Transport`], [`GenerationError::EmptyResponse`], or
    ///   [`GenerationError::MalformedResponse`] when the call or reply fails.
    pub async fn generate(
        &self,
        user_input: &str,
        selected_tags: &[TagOption],
    ) -> GenerationResult<GeneratedResult> {
        let request_id = RequestId::random();
        let span = info_span!(
            "generate_prompts",
            %request_id,
            model = self.generator.metadata().model(),
            selected_tags = selected_tags.len(),
        );

        self.generate_inner(user_input, selected_tags)
            .instrument(span)
            .await
            .inspect_err(|err| match err {
                GenerationError::EmptyInput => debug!("blank scene description ignored"),
                other => warn!(error = %other, "scene prompt generation failed"),
            })
    }

    async fn generate_inner(
        &self,
        user_input: &str,
        selected_tags: &[TagOption],
    ) -> GenerationResult<GeneratedResult> {
        if user_input.trim().is_empty() {
            return Err(GenerationError::EmptyInput);
        }
        if !self.generator.is_configured() {
            return Err(GenerationError::MissingCredential);
        }

        let request = self.prepare(user_input, selected_tags)?;
        let text = self
            .generator
            .generate_content(request)
            .await
            .map_err(map_adapter_error)?;

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        let result = ResponseMapper::parse(&text)?;
        info!(
            suggested_tags = result.suggested_tags().len(),
            "scene prompts generated"
        );
        Ok(result)
    }
}

fn map_adapter_error(err: AdapterError) -> GenerationError {
    match err {
        AdapterError::MissingCredential => GenerationError::MissingCredential,
        AdapterError::InvalidRequest { reason } => GenerationError::invalid_request(reason),
        other @ (AdapterError::Configuration { .. }
        | AdapterError::Transport { .. }
        | AdapterError::Response { .. }) => GenerationError::transport(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use prompt_adapters::traits::{AdapterMetadata, AdapterResult};
    use prompt_primitives::TagId;
    use serde_json::json;

    use super::*;
    use crate::error::GENERIC_FAILURE_MESSAGE;

    enum Reply {
        Text(String),
        Fail(fn() -> AdapterError),
    }

    struct ScriptedGenerator {
        metadata: AdapterMetadata,
        configured: bool,
        reply: Reply,
        calls: AtomicUsize,
        last_request: Mutex<Option<StructuredRequest>>,
    }

    impl ScriptedGenerator {
        fn with_credential(reply: Reply, configured: bool) -> Arc<Self> {
            Arc::new(Self {
                metadata: AdapterMetadata::new("test", "scripted"),
                configured,
                reply,
                calls: AtomicUsize::new(0),
                last_request: Mutex::new(None),
            })
        }

        fn new(reply: Reply) -> Arc<Self> {
            Self::with_credential(reply, true)
        }

        fn unconfigured() -> Arc<Self> {
            Self::with_credential(Reply::Text(valid_reply(1)), false)
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ContentGenerator for ScriptedGenerator {
        fn metadata(&self) -> &AdapterMetadata {
            &self.metadata
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn generate_content(&self, request: StructuredRequest) -> AdapterResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_request.lock().unwrap() = Some(request);
            match &self.reply {
                Reply::Text(text) => Ok(text.clone()),
                Reply::Fail(make) => Err(make()),
            }
        }
    }

    fn valid_reply(tags: usize) -> String {
        let tags: Vec<_> = (0..tags)
            .map(|i| json!({"label": format!("l{i}"), "value": format!("v{i}"), "category": "镜头"}))
            .collect();
        json!({
            "imagePrompt": "image",
            "videoPrompt": "video",
            "explanation": "why",
            "suggestedTags": tags
        })
        .to_string()
    }

    #[tokio::test]
    async fn sends_one_request_with_schema_and_temperature() {
        let generator = ScriptedGenerator::new(Reply::Text(valid_reply(5)));
        let builder = PromptRequestBuilder::new(generator.clone());
        let tags = [TagOption::new(TagId::new("t").unwrap(), "雨天", "rainy", "天气")];

        let result = builder.generate("竹林中的女侠", &tags).await.expect("success");

        assert_eq!(result.suggested_tags().len(), 5);
        assert_eq!(generator.calls(), 1);
        let request = generator.last_request.lock().unwrap().take().unwrap();
        assert_eq!(request.temperature(), Some(DEFAULT_TEMPERATURE));
        assert_eq!(request.response_mime_type(), "application/json");
        assert!(request.instruction().contains("天气:rainy"));
        assert_eq!(request.response_schema()["required"][3], "suggestedTags");
    }

    #[tokio::test]
    async fn blank_input_sends_nothing() {
        let generator = ScriptedGenerator::new(Reply::Text(valid_reply(1)));
        let builder = PromptRequestBuilder::new(generator.clone());

        let err = builder.generate(" \t\n", &[]).await.expect_err("blank");
        assert!(matches!(err, GenerationError::EmptyInput));
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn missing_credential_fails_before_network() {
        let generator = ScriptedGenerator::unconfigured();
        let builder = PromptRequestBuilder::new(generator.clone());

        let err = builder.generate("女侠", &[]).await.expect_err("no key");
        assert!(matches!(err, GenerationError::MissingCredential));
        assert_eq!(err.user_message(), "API Key is missing.");
        assert_eq!(generator.calls(), 0);
    }

    #[tokio::test]
    async fn transport_failure_maps_to_generic_error() {
        let generator = ScriptedGenerator::new(Reply::Fail(|| {
            AdapterError::transport("dns lookup failed")
        }));
        let builder = PromptRequestBuilder::new(generator);

        let err = builder.generate("女侠", &[]).await.expect_err("transport");
        assert!(matches!(err, GenerationError::Transport { .. }));
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn blank_reply_is_empty_response() {
        let generator = ScriptedGenerator::new(Reply::Text("  ".to_owned()));
        let builder = PromptRequestBuilder::new(generator);

        let err = builder.generate("女侠", &[]).await.expect_err("empty");
        assert!(matches!(err, GenerationError::EmptyResponse));
    }

    #[tokio::test]
    async fn reply_missing_fields_is_malformed() {
        let generator = ScriptedGenerator::new(Reply::Text(
            json!({"imagePrompt": "a", "videoPrompt": "b", "explanation": "c"}).to_string(),
        ));
        let builder = PromptRequestBuilder::new(generator);

        let err = builder.generate("女侠", &[]).await.expect_err("malformed");
        assert!(matches!(err, GenerationError::MalformedResponse(_)));
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn prepare_honours_temperature_override() {
        let builder = PromptRequestBuilder::new(ScriptedGenerator::new(Reply::Text(String::new())))
            .with_temperature(0.2);
        let request = builder.prepare("山水", &[]).unwrap();
        assert_eq!(request.temperature(), Some(0.2));
        assert!(request.instruction().contains("无附加选项"));
    }
}
