//! Identifier types.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::Error;

/// Prefix carried by every identifier synthesized from a model reply.
pub const GENERATED_TAG_PREFIX: &str = "gen-tag";

/// Identifier of a [`TagOption`](crate::TagOption).
///
/// Identity only matters within the lifetime of one result, so synthesized
/// identifiers are unique per reply but not stable across replies.
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TagId(String);

impl TagId {
    /// Creates an identifier from a caller-chosen string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTagId`] if the identifier is blank.
    pub fn new(id: impl Into<String>) -> crate::Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(Error::InvalidTagId {
                id,
                reason: "identifier must not be blank".to_owned(),
            });
        }
        Ok(Self(id))
    }

    /// Synthesizes the identifier of the tag at `index` in a reply produced at
    /// `generated_at`.
    #[must_use]
    pub fn synthesized(index: usize, generated_at: DateTime<Utc>) -> Self {
        Self(format!(
            "{GENERATED_TAG_PREFIX}-{index}-{}",
            generated_at.timestamp_millis()
        ))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TagId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TagId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TagId> for String {
    fn from(id: TagId) -> Self {
        id.0
    }
}

impl FromStr for TagId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Correlates the log lines emitted for one generation request.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a random request identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::random()
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for RequestId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::parse_str(s).map_err(Error::from)?;
        Ok(Self(uuid))
    }
}
