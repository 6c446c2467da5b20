//! Strongly typed generator settings.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// API base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Transport timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable was set to a value that could not be used.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue {
        /// Name of the offending variable.
        key: &'static str,
        /// Human-readable reason for rejection.
        reason: String,
    },
}

/// API credential. Never printed by `Debug` or `Display`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a credential, returning `None` for blank input.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into();
        (!key.trim().is_empty()).then_some(Self(key))
    }

    /// Exposes the secret for the single place that sends it.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Settings for the hosted content generator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratorSettings {
    /// Credential; `None` means every generation fails with the credential
    /// error.
    #[serde(default, skip_serializing)]
    pub api_key: Option<ApiKey>,
    /// Model identifier.
    pub model: String,
    /// API base URL.
    pub base_url: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Transport timeout.
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeneratorSettings {
    /// Returns `true` when a credential is present.
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_absent() {
        assert!(ApiKey::new("").is_none());
        assert!(ApiKey::new(" \n").is_none());
        assert_eq!(ApiKey::new("abc").unwrap().expose(), "abc");
    }

    #[test]
    fn key_never_rendered() {
        let settings = GeneratorSettings {
            api_key: ApiKey::new("super-secret"),
            ..GeneratorSettings::default()
        };
        assert!(!format!("{settings:?}").contains("super-secret"));

        let json = serde_json::to_string(&settings).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(json.contains("\"timeout\":60"));
    }
}
