//! Ports - interfaces the application core consumes

mod assistant;
mod document_encoder;
mod key_value_store;

pub use assistant::{Assistant, DeltaStream, TextDelta};
pub use document_encoder::DocumentEncoder;
pub use key_value_store::{ADMIN_SLOT, APPLICANTS_SLOT, KeyValueStore, LOGO_SLOT};

#[cfg(test)]
pub use assistant::MockAssistant;
#[cfg(test)]
pub use document_encoder::MockDocumentEncoder;
#[cfg(test)]
pub use key_value_store::MockKeyValueStore;
