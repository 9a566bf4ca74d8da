//! Widget chrome state machine

use serde::{Deserialize, Serialize};

/// Visibility state of the widget chrome
///
/// Transitions only change what is drawn; the transcript persists
/// across all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetState {
    /// Only the launcher affordance is drawn
    #[default]
    Closed,
    /// Full panel: header, transcript and input
    Open,
    /// Header-only bar; transcript and input are hidden
    Minimized,
}

impl WidgetState {
    /// Launcher affordance activated
    ///
    /// Opens a closed widget; anything visible collapses back to the
    /// launcher.
    #[must_use]
    pub const fn toggle_launcher(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open | Self::Minimized => Self::Closed,
        }
    }

    /// Minimize control activated
    #[must_use]
    pub const fn toggle_minimize(self) -> Self {
        match self {
            Self::Open => Self::Minimized,
            Self::Minimized => Self::Open,
            Self::Closed => Self::Closed,
        }
    }

    /// Close control activated
    #[must_use]
    pub const fn close(self) -> Self {
        Self::Closed
    }

    /// Full panel is visible
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Some panel chrome is visible (full or header-only)
    #[must_use]
    pub const fn shows_panel(self) -> bool {
        matches!(self, Self::Open | Self::Minimized)
    }

    /// Transcript and input line are visible
    #[must_use]
    pub const fn shows_transcript(self) -> bool {
        matches!(self, Self::Open)
    }
}
