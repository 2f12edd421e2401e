//! Membership role assigned to approved members

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role a member holds within the organization
///
/// Serde labels match the stored record format ("Committee Member", "N/A").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MembershipRole {
    /// Ordinary member, the default assigned on first approval
    Member,
    /// Serves on the organizing committee
    #[serde(rename = "Committee Member")]
    Committee,
    /// Registered volunteer
    Volunteer,
    /// Not yet a member (unapproved records)
    #[default]
    #[serde(rename = "N/A")]
    None,
}

impl fmt::Display for MembershipRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Member => "Member",
            Self::Committee => "Committee Member",
            Self::Volunteer => "Volunteer",
            Self::None => "N/A",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_role_is_none() {
        assert_eq!(MembershipRole::default(), MembershipRole::None);
    }

    #[test]
    fn committee_uses_legacy_label() {
        let json = serde_json::to_string(&MembershipRole::Committee).unwrap();
        assert_eq!(json, "\"Committee Member\"");
        let parsed: MembershipRole = serde_json::from_str("\"Committee Member\"").unwrap();
        assert_eq!(parsed, MembershipRole::Committee);
    }

    #[test]
    fn none_uses_legacy_label() {
        let json = serde_json::to_string(&MembershipRole::None).unwrap();
        assert_eq!(json, "\"N/A\"");
    }

    #[test]
    fn display_matches_stored_labels() {
        assert_eq!(MembershipRole::Member.to_string(), "Member");
        assert_eq!(MembershipRole::Committee.to_string(), "Committee Member");
        assert_eq!(MembershipRole::None.to_string(), "N/A");
    }
}
