//! Application configuration

use domain::{DisplayName, DomainError, WaId, WidgetConfig, WidgetPosition};
use integration_webhook::WebhookConfig;
use serde::{Deserialize, Serialize};

/// Main application configuration
///
/// Loaded from `waconsole.toml` and `WACONSOLE_*` environment
/// variables; every field falls back to a sensible default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Webhook backend connection
    #[serde(default)]
    pub api: WebhookConfig,

    /// Widget appearance and identity
    #[serde(default)]
    pub widget: WidgetSettings,
}

/// Widget appearance and identity settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetSettings {
    /// Fixed conversation identity; omit to mint a fresh anonymous one
    /// per run
    #[serde(default)]
    pub wa_id: Option<String>,

    /// Visitor name attached to outbound messages
    #[serde(default = "default_name")]
    pub name: String,

    /// Anchor position inside the terminal
    #[serde(default)]
    pub position: WidgetPosition,

    /// Panel header title
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_name() -> String {
    DisplayName::DEFAULT.to_string()
}

fn default_title() -> String {
    WidgetConfig::DEFAULT_TITLE.to_string()
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            wa_id: None,
            name: default_name(),
            position: WidgetPosition::default(),
            title: default_title(),
        }
    }
}

impl WidgetSettings {
    /// Turn the loose settings into a validated widget configuration
    pub fn to_widget_config(&self) -> Result<WidgetConfig, DomainError> {
        let wa_id = match &self.wa_id {
            Some(id) => WaId::new(id.as_str())?,
            None => WaId::generate(),
        };

        Ok(WidgetConfig::new()
            .with_wa_id(wa_id)
            .with_name(DisplayName::new(self.name.as_str())?)
            .with_position(self.position)
            .with_title(self.title.as_str()))
    }
}

impl AppConfig {
    /// Load configuration from environment and optional file
    ///
    /// `WACONSOLE_*` variables override `waconsole.toml`; nested keys
    /// use a double underscore (e.g. `WACONSOLE_API__BASE_URL`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("api.base_url", "http://localhost:8000")?
            .set_default("widget.name", DisplayName::DEFAULT)?
            // Load from file if exists
            .add_source(config::File::with_name("waconsole").required(false))
            // Override with environment variables
            .add_source(
                config::Environment::with_prefix("WACONSOLE")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
