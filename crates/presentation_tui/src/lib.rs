//! Embeddable terminal chat widget.
//!
//! Renders the assistant widget into a ratatui frame and drives its
//! send lifecycle. The widget anchors to a corner (or the center) of
//! the host surface, mirrors every transcript change on the next draw,
//! and keeps the surface responsive while a reply is pending.
//!
//! Assistant replies are rendered as styled markdown when the
//! `markdown` feature (on by default) is enabled; visitor messages are
//! always shown verbatim.

pub mod app;
pub mod layout;
pub mod markdown;
pub mod render;

pub use app::{WidgetApp, run};
