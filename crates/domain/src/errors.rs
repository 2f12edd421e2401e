//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Identity number is not 13 decimal digits
    #[error("Identity number must be 13 digits")]
    IdentityFormat,

    /// Identity number fails the checksum
    #[error("Invalid identity number checksum")]
    IdentityChecksum,

    /// Identity number encodes an impossible date of birth
    #[error("Invalid date of birth in identity number")]
    IdentityDate,

    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),

    /// Invalid phone number format
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    /// A contact field failed its shape check
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Submission attempted without both required documents
    #[error("Missing required document: {0}")]
    MissingDocuments(String),

    /// The requested status change is not a legal transition
    #[error("Illegal transition: cannot {action} an applicant in status {status}")]
    InvalidTransition { status: String, action: String },

    /// Password reset token missing, mismatched, or expired
    #[error("Invalid or expired password reset token")]
    InvalidResetToken,

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }

    /// Create an illegal transition error
    pub fn invalid_transition(status: impl Into<String>, action: impl Into<String>) -> Self {
        Self::InvalidTransition {
            status: status.into(),
            action: action.into(),
        }
    }
}
