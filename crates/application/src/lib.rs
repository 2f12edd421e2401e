//! Application layer - use cases and orchestration
//!
//! Owns the in-memory portal state and defines the ports the infrastructure
//! adapters implement: key-value persistence, document encoding, and the
//! streaming assistant.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
