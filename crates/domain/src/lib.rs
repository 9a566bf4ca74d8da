//! Domain layer for waconsole
//!
//! Core model of an embeddable WhatsApp chat widget: the transcript,
//! the chrome state machine, and the value objects shared by every
//! other layer. This layer has no I/O and defines the ubiquitous
//! language.

pub mod config;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use config::WidgetConfig;
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
