//! Domain entities - Objects with identity and lifecycle

mod transcript;
mod widget_state;

pub use transcript::{Sender, Transcript, TranscriptEntry};
pub use widget_state::WidgetState;
