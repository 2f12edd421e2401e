//! Adapters for external systems
//!
//! Implements ports defined in the application layer.

mod assistant;
mod document_encoder;

pub use assistant::HttpAssistant;
pub use document_encoder::DataUrlEncoder;
