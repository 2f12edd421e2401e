//! Key-value storage port
//!
//! The portal persists everything in three independent slots of a flat
//! key-value store: the applicant collection (JSON array), the logo asset
//! (string), and the administrator account (JSON object).

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::error::ApplicationError;

/// Slot holding the full applicant collection as a JSON array
pub const APPLICANTS_SLOT: &str = "lekgotla-applicants";

/// Slot holding the uploaded logo as an encoded image string
pub const LOGO_SLOT: &str = "lekgotla-logo";

/// Slot holding the administrator account record
pub const ADMIN_SLOT: &str = "lekgotla-admin-user";

/// Port for flat key-value persistence of JSON-serializable values
#[cfg_attr(test, automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under a key, if any
    async fn get(&self, key: &str) -> Result<Option<Value>, ApplicationError>;

    /// Write a value under a key, replacing any previous value
    async fn set(&self, key: &str, value: Value) -> Result<(), ApplicationError>;

    /// Remove a key
    ///
    /// Returns true if the key existed.
    async fn remove(&self, key: &str) -> Result<bool, ApplicationError>;
}
