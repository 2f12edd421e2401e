//! Phone number value object
//!
//! The portal accepts local numbers: 10 to 15 digits after stripping common
//! separators, no country prefix required.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A validated phone number of 10-15 digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber {
    value: String,
}

impl PhoneNumber {
    /// Create a new phone number
    ///
    /// Spaces, dashes, and parentheses are stripped before validation; the
    /// remainder must be 10-15 ASCII digits.
    pub fn new(number: impl Into<String>) -> Result<Self, DomainError> {
        let value = number.into().trim().replace([' ', '-', '(', ')'], "");

        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidPhoneNumber(
                "Phone number must contain only digits".to_string(),
            ));
        }

        if value.len() < 10 || value.len() > 15 {
            return Err(DomainError::InvalidPhoneNumber(
                "Phone number must have 10-15 digits".to_string(),
            ));
        }

        Ok(Self { value })
    }

    /// Get the phone number as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PhoneNumber {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_number_is_accepted() {
        let phone = PhoneNumber::new("0821234567").unwrap();
        assert_eq!(phone.as_str(), "0821234567");
    }

    #[test]
    fn number_with_separators_is_normalized() {
        let phone = PhoneNumber::new("082 123-4567").unwrap();
        assert_eq!(phone.as_str(), "0821234567");
    }

    #[test]
    fn nine_digits_is_rejected() {
        assert!(PhoneNumber::new("082123456").is_err());
    }

    #[test]
    fn sixteen_digits_is_rejected() {
        assert!(PhoneNumber::new("0821234567890123").is_err());
    }

    #[test]
    fn letters_are_rejected() {
        assert!(PhoneNumber::new("08212345ab").is_err());
    }

    #[test]
    fn plus_prefix_is_rejected() {
        assert!(PhoneNumber::new("+2782123456").is_err());
    }

    #[test]
    fn fifteen_digits_is_accepted() {
        let phone = PhoneNumber::new("082123456789012").unwrap();
        assert_eq!(phone.as_str().len(), 15);
    }

    #[test]
    fn serialization() {
        let phone = PhoneNumber::new("0821234567").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        let parsed: PhoneNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(phone, parsed);
    }
}
