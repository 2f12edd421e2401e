//! Document encoding port
//!
//! Turns an uploaded file into a portable attachment whose payload can live
//! inside the key-value store alongside the record it belongs to.

use std::path::Path;

use async_trait::async_trait;
use domain::DocumentAttachment;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for converting files into encoded document attachments
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DocumentEncoder: Send + Sync {
    /// Read the file and produce an attachment with an encoded payload
    async fn encode(&self, path: &Path) -> Result<DocumentAttachment, ApplicationError>;
}
