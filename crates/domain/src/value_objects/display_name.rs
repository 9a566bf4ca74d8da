//! Visitor display name value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Name attached to outbound messages so operators see who is chatting
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName {
    value: String,
}

impl DisplayName {
    /// Name used when the host supplies none
    pub const DEFAULT: &'static str = "Website Visitor";

    /// Create a display name, trimming surrounding whitespace
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let value = name.into().trim().to_string();

        if value.is_empty() {
            return Err(DomainError::InvalidDisplayName(
                "must not be empty".to_string(),
            ));
        }

        if value.chars().count() > 64 {
            return Err(DomainError::InvalidDisplayName(
                "must be at most 64 characters".to_string(),
            ));
        }

        Ok(Self { value })
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Consume the value object, returning the inner string
    pub fn into_inner(self) -> String {
        self.value
    }
}

impl Default for DisplayName {
    fn default() -> Self {
        Self {
            value: Self::DEFAULT.to_string(),
        }
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for DisplayName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for DisplayName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
