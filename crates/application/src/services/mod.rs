//! Application services

mod console_service;
mod widget_session;

pub use console_service::ConsoleService;
pub use widget_session::{PendingSend, WidgetSession};
