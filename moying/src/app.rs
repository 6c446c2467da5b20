//! Wiring from settings to a ready controller.

use std::sync::Arc;

use prompt_adapters::gemini::{GeminiAdapter, GeminiConfig};
use prompt_adapters::traits::{AdapterResult, ContentGenerator};
use prompt_builder::PromptRequestBuilder;
use prompt_config::GeneratorSettings;
use prompt_kernel::PresentationController;

/// Builds the Gemini adapter described by `settings`.
///
/// A missing credential is not an error here; the adapter reports itself as
/// unconfigured and generation fails with the credential message.
///
/// # Errors
///
/// Returns [`AdapterError::Configuration`](prompt_adapters::traits::AdapterError::Configuration)
/// if the base URL or model is invalid.
pub fn gemini_adapter(settings: &GeneratorSettings) -> AdapterResult<GeminiAdapter> {
    let mut config = GeminiConfig::new(settings.model.clone())
        .with_base_url(&settings.base_url)?
        .with_timeout(settings.timeout)
        .with_default_temperature(settings.temperature);
    if let Some(key) = &settings.api_key {
        config = config.with_api_key(key.expose());
    }
    GeminiAdapter::new(config)
}

/// Builds a controller around an arbitrary generator, using the configured
/// temperature.
#[must_use]
pub fn controller_with(
    generator: Arc<dyn ContentGenerator>,
    settings: &GeneratorSettings,
) -> PresentationController {
    let builder = PromptRequestBuilder::new(generator).with_temperature(settings.temperature);
    PresentationController::new(builder)
}

/// Builds a controller backed by the Gemini adapter.
///
/// # Errors
///
/// Propagates configuration errors from [`gemini_adapter`].
pub fn gemini_controller(settings: &GeneratorSettings) -> AdapterResult<PresentationController> {
    let adapter = gemini_adapter(settings)?;
    Ok(controller_with(Arc::new(adapter), settings))
}
