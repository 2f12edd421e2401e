//! Branding service - the organization logo slot
//!
//! The logo is a single encoded image string in its own key-value slot; a
//! built-in placeholder is served until one is uploaded.

use std::{path::Path, sync::Arc};

use tracing::{info, instrument};

use crate::{
    error::ApplicationError,
    ports::{DocumentEncoder, KeyValueStore, LOGO_SLOT},
};

/// Placeholder logo served before any upload
pub const DEFAULT_LOGO: &str = "data:image/svg+xml;base64,PHN2ZyB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHZpZXdCb3g9IjAgMCA2NCA2NCI+PGNpcmNsZSBjeD0iMzIiIGN5PSIzMiIgcj0iMzAiIGZpbGw9IiNiOTFjMWMiLz48dGV4dCB4PSIzMiIgeT0iNDAiIGZvbnQtc2l6ZT0iMjIiIHRleHQtYW5jaG9yPSJtaWRkbGUiIGZpbGw9IiNmZmYiPkw8L3RleHQ+PC9zdmc+";

/// Service for reading and replacing the stored logo
pub struct BrandingService {
    store: Arc<dyn KeyValueStore>,
    encoder: Arc<dyn DocumentEncoder>,
}

impl std::fmt::Debug for BrandingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrandingService").finish_non_exhaustive()
    }
}

impl BrandingService {
    /// Create the service over a store and an encoder
    pub fn new(store: Arc<dyn KeyValueStore>, encoder: Arc<dyn DocumentEncoder>) -> Self {
        Self { store, encoder }
    }

    /// The stored logo, or the built-in default when none was uploaded
    pub async fn logo(&self) -> Result<String, ApplicationError> {
        let stored = self.store.get(LOGO_SLOT).await?;
        Ok(stored
            .and_then(|value| value.as_str().map(ToString::to_string))
            .unwrap_or_else(|| DEFAULT_LOGO.to_string()))
    }

    /// Encode an image file and store it as the new logo
    ///
    /// Unlike applicant persistence this write is not fire-and-forget: a
    /// failed upload is reported to the caller, since nothing else holds the
    /// new image.
    #[instrument(skip(self))]
    pub async fn set_logo(&self, path: &Path) -> Result<(), ApplicationError> {
        let attachment = self.encoder.encode(path).await?;
        self.store
            .set(LOGO_SLOT, serde_json::Value::String(attachment.data_url))
            .await?;
        info!(name = %attachment.name, "Logo replaced");
        Ok(())
    }
}
