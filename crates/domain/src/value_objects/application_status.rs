//! Application lifecycle status

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a membership application
///
/// Mutually exclusive; a record is in exactly one status at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    /// In-progress, unsubmitted record
    Draft,
    /// Submitted, awaiting an admin decision
    Pending,
    /// Accepted as a member
    Approved,
    /// Declined, with a recorded reason
    Rejected,
}

impl ApplicationStatus {
    /// Whether the record has been submitted for review
    pub const fn is_submitted(&self) -> bool {
        !matches!(self, Self::Draft)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "Draft",
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        };
        write!(f, "{s}")
    }
}
