//! File-based document encoder
//!
//! Reads a document from disk and encodes it as a `data:` URL so it can be
//! embedded directly in an applicant record.

use std::path::Path;

use application::{error::ApplicationError, ports::DocumentEncoder};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use domain::DocumentAttachment;
use tracing::{debug, instrument};

/// Encoder that inlines files as base64 data URLs
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlEncoder;

impl DataUrlEncoder {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentEncoder for DataUrlEncoder {
    #[instrument(skip(self))]
    async fn encode(&self, path: &Path) -> Result<DocumentAttachment, ApplicationError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApplicationError::Encoding(format!("{}: {e}", path.display())))?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ApplicationError::Encoding(format!("{}: not a file path", path.display()))
            })?;

        let mime = mime_for(path);
        let data_url = format!("data:{mime};base64,{}", STANDARD.encode(&bytes));

        debug!(size = bytes.len(), mime, "Encoded document");
        Ok(DocumentAttachment { name, data_url })
    }
}

/// Guess a MIME type from the file extension, defaulting to a binary stream
fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}
