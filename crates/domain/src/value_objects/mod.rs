//! Value Objects - Immutable, identity-less domain primitives

mod display_name;
mod wa_id;
mod widget_id;
mod widget_position;

pub use display_name::DisplayName;
pub use wa_id::WaId;
pub use widget_id::WidgetId;
pub use widget_position::WidgetPosition;
