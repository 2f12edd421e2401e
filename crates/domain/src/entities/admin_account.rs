//! Administrator account entity
//!
//! Holds the single admin credential pair and the password-reset token
//! lifecycle. Passwords and tokens are compared as plaintext to stay
//! compatible with existing stored records; the comparison itself is the
//! recorded security gap, not a contract to extend.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// How long a password reset token stays valid
const RESET_TOKEN_TTL_MINUTES: i64 = 15;

/// An issued password reset token with its expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// The administrator account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminAccount {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_token: Option<ResetToken>,
}

impl AdminAccount {
    /// Create an account with the given credentials
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            reset_token: None,
        }
    }

    /// Check a login attempt
    ///
    /// Usernames compare case-insensitively; passwords compare exactly.
    pub fn verify_login(&self, username: &str, password: &str) -> bool {
        username.eq_ignore_ascii_case(&self.username) && password == self.password
    }

    /// Whether the given username names this account (case-insensitive)
    pub fn matches_username(&self, username: &str) -> bool {
        username.eq_ignore_ascii_case(&self.username)
    }

    /// Record a freshly issued reset token, valid for 15 minutes
    pub fn issue_reset_token(&mut self, token: impl Into<String>, now: DateTime<Utc>) {
        self.reset_token = Some(ResetToken {
            token: token.into(),
            expires_at: now + Duration::minutes(RESET_TOKEN_TTL_MINUTES),
        });
    }

    /// Complete a password reset
    ///
    /// Requires a matching, unexpired token; on success the password is
    /// replaced and the token cleared.
    pub fn complete_reset(
        &mut self,
        token: &str,
        new_password: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let valid = self
            .reset_token
            .as_ref()
            .is_some_and(|reset| reset.token == token && now < reset.expires_at);
        if !valid {
            return Err(DomainError::InvalidResetToken);
        }

        self.password = new_password.into();
        self.reset_token = None;
        Ok(())
    }
}
