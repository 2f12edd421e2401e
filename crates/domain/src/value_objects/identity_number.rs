//! National identity number value object
//!
//! A 13-digit identity number carrying the holder's date of birth in its
//! first six digits (`YYMMDD`). Construction verifies the format, the
//! embedded checksum, and that the encoded date is a real calendar date.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use domain::IdentityNumber;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! let id = IdentityNumber::parse_with_today("9202204720083", today).unwrap();
//! assert_eq!(id.as_str(), "9202204720083");
//! assert_eq!(
//!     id.date_of_birth_with_today(today).unwrap(),
//!     NaiveDate::from_ymd_opt(1992, 2, 20).unwrap()
//! );
//!
//! // A checksum failure never yields a date
//! assert!(IdentityNumber::parse_with_today("1234567890123", today).is_err());
//! ```

use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A validated 13-digit national identity number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityNumber {
    value: String,
}

impl IdentityNumber {
    /// Parse and validate an identity number against the current system date
    ///
    /// The system date is used only to resolve the century of the embedded
    /// two-digit birth year.
    ///
    /// # Errors
    ///
    /// Returns `IdentityFormat` if the input is not exactly 13 decimal
    /// digits, `IdentityChecksum` if the check digit does not verify, and
    /// `IdentityDate` if the encoded date is not a real calendar date.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        Self::parse_with_today(input, Utc::now().date_naive())
    }

    /// Parse and validate with an explicit pivot date
    ///
    /// Pure function of the input string and `today`; used directly in tests
    /// where the century pivot must be deterministic.
    pub fn parse_with_today(input: &str, today: NaiveDate) -> Result<Self, DomainError> {
        let value = input.trim().to_string();

        if value.len() != 13 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::IdentityFormat);
        }

        if !checksum_is_valid(&value) {
            return Err(DomainError::IdentityChecksum);
        }

        let candidate = Self { value };
        candidate.date_of_birth_with_today(today)?;
        Ok(candidate)
    }

    /// Get the identity number as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Derive the date of birth using the current system date for the pivot
    pub fn date_of_birth(&self) -> Result<NaiveDate, DomainError> {
        self.date_of_birth_with_today(Utc::now().date_naive())
    }

    /// Derive the date of birth with an explicit pivot date
    ///
    /// Century resolution: a two-digit year numerically less than or equal
    /// to the current two-digit year is taken as 2000s, otherwise 1900s.
    pub fn date_of_birth_with_today(&self, today: NaiveDate) -> Result<NaiveDate, DomainError> {
        let yy = digits_to_u32(&self.value[0..2]) as i32;
        let month = digits_to_u32(&self.value[2..4]);
        let day = digits_to_u32(&self.value[4..6]);

        let current_yy = today.year() % 100;
        let year = if yy <= current_yy { 2000 + yy } else { 1900 + yy };

        NaiveDate::from_ymd_opt(year, month, day).ok_or(DomainError::IdentityDate)
    }
}

impl fmt::Display for IdentityNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<&str> for IdentityNumber {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// Positional checksum over all 13 digits
///
/// Digits at even 0-based positions are summed directly; digits at odd
/// positions are doubled, with 9 subtracted when the doubled value exceeds
/// 9. The total must be divisible by 10.
fn checksum_is_valid(digits: &str) -> bool {
    let sum: u32 = digits
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 0 {
                d
            } else {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            }
        })
        .sum();
    sum % 10 == 0
}

/// Convert a short run of ASCII digits to a number
///
/// Callers guarantee the slice contains only ASCII digits.
fn digits_to_u32(s: &str) -> u32 {
    s.bytes().fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
}
