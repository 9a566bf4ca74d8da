//! Per-instance widget configuration

use serde::{Deserialize, Serialize};

use crate::value_objects::{DisplayName, WaId, WidgetPosition};

/// Immutable configuration captured when a widget instance is created
///
/// Hosts either pass a known visitor identity or let [`WidgetConfig::new`]
/// mint an anonymous one. Changing any of this after construction is not
/// supported; embed a new instance instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetConfig {
    wa_id: WaId,
    name: DisplayName,
    position: WidgetPosition,
    title: String,
}

impl WidgetConfig {
    /// Header title used when the host supplies none
    pub const DEFAULT_TITLE: &'static str = "AI Assistant";

    /// Configuration for an anonymous visitor with default chrome
    #[must_use]
    pub fn new() -> Self {
        Self {
            wa_id: WaId::generate(),
            name: DisplayName::default(),
            position: WidgetPosition::default(),
            title: Self::DEFAULT_TITLE.to_string(),
        }
    }

    /// Use a known visitor identity
    #[must_use]
    pub fn with_wa_id(mut self, wa_id: WaId) -> Self {
        self.wa_id = wa_id;
        self
    }

    /// Use a known visitor name
    #[must_use]
    pub fn with_name(mut self, name: DisplayName) -> Self {
        self.name = name;
        self
    }

    /// Anchor the widget somewhere other than the default corner
    #[must_use]
    pub fn with_position(mut self, position: WidgetPosition) -> Self {
        self.position = position;
        self
    }

    /// Override the panel header title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Visitor identity sent with every message
    pub const fn wa_id(&self) -> &WaId {
        &self.wa_id
    }

    /// Visitor name sent with every message
    pub const fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Anchor position inside the host surface
    pub const fn position(&self) -> WidgetPosition {
        self.position
    }

    /// Panel header title
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self::new()
    }
}
