//! Environment-backed settings loader.

use std::env;
use std::time::Duration;

use tracing::debug;

use crate::schema::{ApiKey, ConfigError, ConfigResult, GeneratorSettings};

/// Primary credential variable.
pub const API_KEY_ENV: &str = "API_KEY";
/// Credential variable consulted when [`API_KEY_ENV`] is unset.
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Model identifier override.
pub const MODEL_ENV: &str = "MOYING_MODEL";
/// Base URL override.
pub const BASE_URL_ENV: &str = "MOYING_BASE_URL";
/// Sampling temperature override.
pub const TEMPERATURE_ENV: &str = "MOYING_TEMPERATURE";
/// Transport timeout override, in whole seconds.
pub const TIMEOUT_ENV: &str = "MOYING_TIMEOUT_SECS";

impl GeneratorSettings {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if an override cannot be parsed.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads settings through `lookup`, which maps variable names to values.
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if an override cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut settings = Self::default();

        settings.api_key = get(API_KEY_ENV)
            .or_else(|| get(FALLBACK_API_KEY_ENV))
            .and_then(ApiKey::new);

        if let Some(model) = get(MODEL_ENV) {
            settings.model = model.trim().to_owned();
        }
        if let Some(base_url) = get(BASE_URL_ENV) {
            settings.base_url = base_url.trim().to_owned();
        }
        if let Some(raw) = get(TEMPERATURE_ENV) {
            settings.temperature = parse_temperature(&raw)?;
        }
        if let Some(raw) = get(TIMEOUT_ENV) {
            settings.timeout = parse_timeout(&raw)?;
        }

        debug!(
            model = %settings.model,
            base_url = %settings.base_url,
            temperature = settings.temperature,
            timeout_secs = settings.timeout.as_secs(),
            credential = settings.has_credential(),
            "generator settings loaded"
        );

        Ok(settings)
    }
}

fn parse_temperature(raw: &str) -> ConfigResult<f32> {
    let value = raw
        .trim()
        .parse::<f32>()
        .map_err(|err| ConfigError::InvalidValue {
            key: TEMPERATURE_ENV,
            reason: err.to_string(),
        })?;
    if !(0.0..=2.0).contains(&value) {
        return Err(ConfigError::InvalidValue {
            key: TEMPERATURE_ENV,
            reason: format!("{value} is outside 0.0..=2.0"),
        });
    }
    Ok(value)
}

fn parse_timeout(raw: &str) -> ConfigResult<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            key: TIMEOUT_ENV,
            reason: "timeout must be at least one second".to_owned(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(err) => Err(ConfigError::InvalidValue {
            key: TIMEOUT_ENV,
            reason: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::schema::{DEFAULT_MODEL, DEFAULT_TEMPERATURE};

    fn load(vars: &[(&str, &str)]) -> ConfigResult<GeneratorSettings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        GeneratorSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let settings = load(&[]).unwrap();
        assert!(!settings.has_credential());
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert!((settings.temperature - DEFAULT_TEMPERATURE).abs() < f32::EPSILON);
        assert_eq!(settings.timeout, Duration::from_secs(60));
    }

    #[test]
    fn primary_key_wins_over_fallback() {
        let settings = load(&[(API_KEY_ENV, "primary"), (FALLBACK_API_KEY_ENV, "fallback")]).unwrap();
        assert_eq!(settings.api_key.unwrap().expose(), "primary");

        let settings = load(&[(API_KEY_ENV, "  "), (FALLBACK_API_KEY_ENV, "fallback")]).unwrap();
        assert_eq!(settings.api_key.unwrap().expose(), "fallback");
    }

    #[test]
    fn overrides_are_applied() {
        let settings = load(&[
            (MODEL_ENV, "gemini-2.5-pro"),
            (BASE_URL_ENV, "http://127.0.0.1:8080/"),
            (TEMPERATURE_ENV, "1.1"),
            (TIMEOUT_ENV, "15"),
        ])
        .unwrap();

        assert_eq!(settings.model, "gemini-2.5-pro");
        assert_eq!(settings.base_url, "http://127.0.0.1:8080/");
        assert!((settings.temperature - 1.1).abs() < 1e-6);
        assert_eq!(settings.timeout, Duration::from_secs(15));
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let err = load(&[(TEMPERATURE_ENV, "3.5")]).expect_err("too hot");
        assert!(matches!(err, ConfigError::InvalidValue { key: TEMPERATURE_ENV, .. }));
    }

    #[test]
    fn rejects_zero_or_garbage_timeout() {
        assert!(load(&[(TIMEOUT_ENV, "0")]).is_err());
        assert!(load(&[(TIMEOUT_ENV, "soon")]).is_err());
    }
}
