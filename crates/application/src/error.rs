//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Lookup miss
    #[error("Not found: {0}")]
    NotFound(String),

    /// Key-value store failure
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Document encoding failure
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Assistant backend failure
    #[error("Assistant error: {0}")]
    Assistant(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_pass_through_transparently() {
        let err: ApplicationError = DomainError::IdentityChecksum.into();
        assert_eq!(err.to_string(), "Invalid identity number checksum");
    }

    #[test]
    fn persistence_error_message() {
        let err = ApplicationError::Persistence("disk full".to_string());
        assert_eq!(err.to_string(), "Persistence error: disk full");
    }

    #[test]
    fn not_found_error_message() {
        let err = ApplicationError::NotFound("applicant 9202204720083".to_string());
        assert_eq!(err.to_string(), "Not found: applicant 9202204720083");
    }
}
