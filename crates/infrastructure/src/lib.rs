//! Infrastructure layer - Configuration and process-level wiring
//!
//! Config loading (file + environment) and tracing setup shared by the
//! presentation crates.

pub mod config;
pub mod telemetry;

pub use config::{AppConfig, WidgetSettings};
pub use telemetry::{init_tracing, log_filter_from_verbosity};
