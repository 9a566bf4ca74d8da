//! Widget anchor position value object

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Where the widget anchors inside its host surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetPosition {
    /// Lower-right corner, the conventional spot for chat launchers
    #[default]
    BottomRight,
    /// Lower-left corner
    BottomLeft,
    /// Upper-right corner
    TopRight,
    /// Upper-left corner
    TopLeft,
    /// Centered overlay, used for full-page chat surfaces
    Center,
}

impl WidgetPosition {
    /// Every supported anchor, in display order
    pub const ALL: [Self; 5] = [
        Self::BottomRight,
        Self::BottomLeft,
        Self::TopRight,
        Self::TopLeft,
        Self::Center,
    ];

    /// Kebab-case name as used in configuration
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
            Self::TopRight => "top-right",
            Self::TopLeft => "top-left",
            Self::Center => "center",
        }
    }

    /// Anchored to the top edge
    #[must_use]
    pub const fn is_top(self) -> bool {
        matches!(self, Self::TopRight | Self::TopLeft)
    }

    /// Anchored to the left edge
    #[must_use]
    pub const fn is_left(self) -> bool {
        matches!(self, Self::BottomLeft | Self::TopLeft)
    }

    /// Centered rather than corner-anchored
    #[must_use]
    pub const fn is_center(self) -> bool {
        matches!(self, Self::Center)
    }
}

impl fmt::Display for WidgetPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for WidgetPosition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bottom-right" => Ok(Self::BottomRight),
            "bottom-left" => Ok(Self::BottomLeft),
            "top-right" => Ok(Self::TopRight),
            "top-left" => Ok(Self::TopLeft),
            "center" => Ok(Self::Center),
            other => Err(DomainError::UnknownPosition(other.to_string())),
        }
    }
}
