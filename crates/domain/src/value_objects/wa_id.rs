//! WhatsApp conversation identifier value object

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Identifier the webhook backend keys conversations on.
///
/// Operators address real contacts by whatever ID the backend assigned
/// (usually derived from a phone number). Anonymous widget visitors get
/// a generated `widget-user-*` identity instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaId {
    value: String,
}

impl WaId {
    /// Prefix marking identities minted by the widget itself
    pub const ANONYMOUS_PREFIX: &'static str = "widget-user-";

    /// Create from a known identifier
    ///
    /// Leading and trailing whitespace is stripped. The identifier must
    /// be non-empty, at most 128 characters, and free of inner
    /// whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let value = id.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::InvalidWaId("must not be empty".to_string()));
        }

        if value.len() > 128 {
            return Err(DomainError::InvalidWaId(
                "must be at most 128 characters".to_string(),
            ));
        }

        if value.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidWaId(
                "must not contain whitespace".to_string(),
            ));
        }

        Ok(Self { value })
    }

    /// Mint a fresh anonymous visitor identity
    #[must_use]
    pub fn generate() -> Self {
        Self {
            value: format!("{}{}", Self::ANONYMOUS_PREFIX, Uuid::new_v4()),
        }
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume the value object, returning the inner string
    pub fn into_inner(self) -> String {
        self.value
    }

    /// Whether this identity was minted by [`WaId::generate`]
    pub fn is_anonymous(&self) -> bool {
        self.value.starts_with(Self::ANONYMOUS_PREFIX)
    }
}

impl fmt::Display for WaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for WaId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for WaId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
