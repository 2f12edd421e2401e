//! Administrator authentication and the password-reset mini-protocol
//!
//! Credentials live in the admin slot of the key-value store. Comparison is
//! plaintext equality, matching the stored record format; the reset token is
//! 8 random hex characters valid for 15 minutes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::AdminAccount;
use parking_lot::RwLock;
use rand::Rng;
use tracing::{info, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{ADMIN_SLOT, KeyValueStore},
};

/// Service owning the administrator account
pub struct AdminAuthService {
    store: Arc<dyn KeyValueStore>,
    account: RwLock<AdminAccount>,
}

impl std::fmt::Debug for AdminAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuthService").finish_non_exhaustive()
    }
}

impl AdminAuthService {
    /// Load the admin account, seeding the defaults when the slot is empty
    pub async fn load(
        store: Arc<dyn KeyValueStore>,
        default_username: &str,
        default_password: &str,
    ) -> Result<Self, ApplicationError> {
        let account = match store.get(ADMIN_SLOT).await? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| ApplicationError::Persistence(format!("corrupt admin slot: {e}")))?,
            None => {
                info!("No admin account stored; seeding default credentials");
                let account = AdminAccount::new(default_username, default_password);
                let service = Self {
                    store: Arc::clone(&store),
                    account: RwLock::new(account.clone()),
                };
                service.persist().await;
                return Ok(service);
            },
        };

        Ok(Self {
            store,
            account: RwLock::new(account),
        })
    }

    /// Check a login attempt
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> bool {
        self.account.read().verify_login(username, password)
    }

    /// Issue a password reset token for the named account
    ///
    /// Returns the token so the caller can deliver it; fails with `NotFound`
    /// when the username does not match the stored account.
    #[instrument(skip(self))]
    pub async fn request_password_reset(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<String, ApplicationError> {
        let token = generate_token();
        {
            let mut account = self.account.write();
            if !account.matches_username(username) {
                return Err(ApplicationError::NotFound(format!(
                    "admin account {username}"
                )));
            }
            account.issue_reset_token(token.clone(), now);
        }

        info!("Password reset token issued");
        self.persist().await;
        Ok(token)
    }

    /// Complete a password reset with a previously issued token
    #[instrument(skip(self, token, new_password))]
    pub async fn complete_password_reset(
        &self,
        token: &str,
        new_password: &str,
        now: DateTime<Utc>,
    ) -> Result<(), ApplicationError> {
        self.account.write().complete_reset(token, new_password, now)?;
        info!("Password reset completed");
        self.persist().await;
        Ok(())
    }

    /// Persist the account to its slot, fire-and-forget
    async fn persist(&self) {
        let snapshot = self.account.read().clone();
        match serde_json::to_value(&snapshot) {
            Ok(value) => {
                if let Err(e) = self.store.set(ADMIN_SLOT, value).await {
                    warn!(error = %e, "Failed to persist admin account; in-memory state kept");
                }
            },
            Err(e) => warn!(error = %e, "Failed to serialize admin account"),
        }
    }
}

/// Eight random lowercase hex characters
fn generate_token() -> String {
    let bytes: [u8; 4] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
