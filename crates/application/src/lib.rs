//! Application layer - Use cases and orchestration
//!
//! Widget session lifecycle, operator console operations, and the
//! gateway port the integration layer implements.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
