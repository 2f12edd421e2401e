//! Applicant entity and lifecycle state machine
//!
//! An applicant record moves Draft -> Pending -> Approved/Rejected, with
//! admins allowed to re-decide between Approved and Rejected. Status changes
//! go through [`Applicant::transition`], which returns the changed record
//! together with any lifecycle stamp it applied, so callers see the derived
//! fields explicitly instead of as hidden mutations.

use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    errors::DomainError,
    value_objects::{
        ApplicantId, ApplicationStatus, EmailAddress, IdentityNumber, MembershipRole, PhoneNumber,
    },
};

/// Days before expiry at which a membership counts as expiring soon
const EXPIRY_WARNING_DAYS: i64 = 30;

/// An uploaded document kept as a portable encoded payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentAttachment {
    /// Original filename as uploaded
    pub name: String,
    /// Encoded payload (`data:` URL)
    pub data_url: String,
}

impl DocumentAttachment {
    /// Create an attachment from a filename and encoded payload
    pub fn new(name: impl Into<String>, data_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_url: data_url.into(),
        }
    }
}

/// Contact fields captured on the application form
///
/// The region pair (province, municipality) is kept as plain strings; the
/// form constrains the choices, the domain records them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub full_name: String,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub address: String,
    pub province: String,
    pub municipality: String,
}

/// A membership application record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    /// Unique record identifier
    pub id: ApplicantId,
    /// Validated national identity number, the natural external key
    pub identity_number: IdentityNumber,
    /// Date of birth derived from the identity number at capture time
    pub date_of_birth: NaiveDate,
    #[serde(flatten)]
    pub contact: ContactDetails,
    /// Identity document photo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_photo: Option<DocumentAttachment>,
    /// Proof of membership-fee payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_proof: Option<DocumentAttachment>,
    /// Current lifecycle status
    pub status: ApplicationStatus,
    /// Present only while the record is Rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Set once, at the first non-draft submission
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    /// Set once, at the first approval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    /// Membership expiry, one year after the first approval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Role held within the organization
    #[serde(default)]
    pub membership_role: MembershipRole,
}

/// Status change requested against an applicant record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Submit a draft for review; requires both documents
    Submit,
    /// Admin accepts the application
    Approve,
    /// Admin declines the application with a reason
    Reject { reason: String },
}

impl LifecycleAction {
    fn verb(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Reject { .. } => "reject",
        }
    }
}

/// Fields stamped automatically on the first approval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleStamp {
    pub approved_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub role: MembershipRole,
}

/// Result of a lifecycle transition: the changed record plus any stamp
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionOutcome {
    pub applicant: Applicant,
    /// Present only when this transition performed the first approval
    pub stamp: Option<LifecycleStamp>,
}

impl Applicant {
    /// Create a new draft record
    pub fn draft(
        identity_number: IdentityNumber,
        date_of_birth: NaiveDate,
        contact: ContactDetails,
    ) -> Self {
        Self {
            id: ApplicantId::new(),
            identity_number,
            date_of_birth,
            contact,
            id_photo: None,
            payment_proof: None,
            status: ApplicationStatus::Draft,
            rejection_reason: None,
            submitted_at: None,
            approved_at: None,
            expires_at: None,
            membership_role: MembershipRole::None,
        }
    }

    /// Attach the identity document photo
    #[must_use]
    pub fn with_id_photo(mut self, document: DocumentAttachment) -> Self {
        self.id_photo = Some(document);
        self
    }

    /// Attach the proof of payment
    #[must_use]
    pub fn with_payment_proof(mut self, document: DocumentAttachment) -> Self {
        self.payment_proof = Some(document);
        self
    }

    /// Apply a lifecycle action, returning the changed record and any stamp
    ///
    /// # Errors
    ///
    /// `MissingDocuments` when submitting without both attachments,
    /// `ValidationError` when rejecting without a reason, and
    /// `InvalidTransition` for any (status, action) pair outside the state
    /// machine.
    pub fn transition(
        mut self,
        action: LifecycleAction,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome, DomainError> {
        match (self.status, &action) {
            (ApplicationStatus::Draft, LifecycleAction::Submit) => {
                if self.id_photo.is_none() {
                    return Err(DomainError::MissingDocuments("ID photo".to_string()));
                }
                if self.payment_proof.is_none() {
                    return Err(DomainError::MissingDocuments(
                        "proof of payment".to_string(),
                    ));
                }
                self.status = ApplicationStatus::Pending;
                if self.submitted_at.is_none() {
                    self.submitted_at = Some(now);
                }
                Ok(TransitionOutcome {
                    applicant: self,
                    stamp: None,
                })
            },
            (
                ApplicationStatus::Pending | ApplicationStatus::Rejected,
                LifecycleAction::Approve,
            ) => {
                self.status = ApplicationStatus::Approved;
                self.rejection_reason = None;
                let stamp = self.stamp_first_approval(now);

                Ok(TransitionOutcome {
                    applicant: self,
                    stamp,
                })
            },
            (
                ApplicationStatus::Pending | ApplicationStatus::Approved,
                LifecycleAction::Reject { reason },
            ) => {
                if reason.trim().is_empty() {
                    return Err(DomainError::ValidationError(
                        "A rejection reason is required".to_string(),
                    ));
                }
                self.status = ApplicationStatus::Rejected;
                self.rejection_reason = Some(reason.clone());
                Ok(TransitionOutcome {
                    applicant: self,
                    stamp: None,
                })
            },
            (status, action) => Err(DomainError::invalid_transition(
                status.to_string(),
                action.verb(),
            )),
        }
    }

    /// Stamp the membership fields if this is the first approval ever
    ///
    /// No-op when `approved_at` is already set, so a re-approval after a
    /// rejection never moves the dates. A role assigned by an admin before
    /// approval is preserved; only N/A is upgraded to Member.
    pub fn stamp_first_approval(&mut self, now: DateTime<Utc>) -> Option<LifecycleStamp> {
        if self.approved_at.is_some() {
            return None;
        }
        let stamp = LifecycleStamp {
            approved_at: now,
            expires_at: add_one_year(now),
            role: if self.membership_role == MembershipRole::None {
                MembershipRole::Member
            } else {
                self.membership_role
            },
        };
        self.approved_at = Some(stamp.approved_at);
        self.expires_at = Some(stamp.expires_at);
        self.membership_role = stamp.role;
        Some(stamp)
    }

    /// Whether the membership expires within the warning window
    ///
    /// True only when the expiry lies strictly between now and 30 days from
    /// now; false at exactly 30 days, for past dates, and when unset.
    pub fn is_expiring_soon(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| {
            let remaining = expires_at - now;
            remaining > Duration::zero() && remaining < Duration::days(EXPIRY_WARNING_DAYS)
        })
    }
}

/// Expiry arithmetic: twelve calendar months ahead
fn add_one_year(from: DateTime<Utc>) -> DateTime<Utc> {
    from.checked_add_months(Months::new(12)).unwrap_or(from)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn attachment() -> DocumentAttachment {
        DocumentAttachment::new("scan.jpg", "data:image/jpeg;base64,aGVsbG8=")
    }

    fn draft() -> Applicant {
        let today = fixed_now().date_naive();
        let identity = IdentityNumber::parse_with_today("9202204720083", today).unwrap();
        let dob = identity.date_of_birth_with_today(today).unwrap();
        Applicant::draft(
            identity,
            dob,
            ContactDetails {
                full_name: "Thandi Mokoena".to_string(),
                email: EmailAddress::new("thandi@example.com").unwrap(),
                phone: PhoneNumber::new("0821234567").unwrap(),
                address: "12 Main Rd".to_string(),
                province: "Eastern Cape".to_string(),
                municipality: "Enoch Mgijima".to_string(),
            },
        )
    }

    fn pending() -> Applicant {
        draft()
            .with_id_photo(attachment())
            .with_payment_proof(attachment())
            .transition(LifecycleAction::Submit, fixed_now())
            .unwrap()
            .applicant
    }

    #[test]
    fn submit_moves_draft_to_pending_and_stamps_submission() {
        let applicant = pending();
        assert_eq!(applicant.status, ApplicationStatus::Pending);
        assert_eq!(applicant.submitted_at, Some(fixed_now()));
    }

    #[test]
    fn submit_without_id_photo_fails() {
        let err = draft()
            .with_payment_proof(attachment())
            .transition(LifecycleAction::Submit, fixed_now())
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingDocuments(ref doc) if doc == "ID photo"));
    }

    #[test]
    fn submit_without_payment_proof_fails() {
        let err = draft()
            .with_id_photo(attachment())
            .transition(LifecycleAction::Submit, fixed_now())
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingDocuments(_)));
    }

    #[test]
    fn first_approval_stamps_expiry_one_year_out() {
        let outcome = pending()
            .transition(LifecycleAction::Approve, fixed_now())
            .unwrap();

        let stamp = outcome.stamp.unwrap();
        assert_eq!(stamp.approved_at, fixed_now());
        assert_eq!(
            stamp.expires_at,
            Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
        );
        assert_eq!(stamp.role, MembershipRole::Member);

        let applicant = outcome.applicant;
        assert_eq!(applicant.status, ApplicationStatus::Approved);
        assert_eq!(applicant.approved_at, Some(stamp.approved_at));
        assert_eq!(applicant.expires_at, Some(stamp.expires_at));
        assert_eq!(applicant.membership_role, MembershipRole::Member);
    }

    #[test]
    fn reapproval_after_rejection_does_not_restamp() {
        let now = fixed_now();
        let approved = pending()
            .transition(LifecycleAction::Approve, now)
            .unwrap()
            .applicant;
        let original_approved_at = approved.approved_at;
        let original_expires_at = approved.expires_at;

        let later = now + Duration::days(90);
        let rejected = approved
            .transition(
                LifecycleAction::Reject {
                    reason: "Lapsed payment".to_string(),
                },
                later,
            )
            .unwrap()
            .applicant;

        let even_later = later + Duration::days(5);
        let outcome = rejected
            .transition(LifecycleAction::Approve, even_later)
            .unwrap();

        assert!(outcome.stamp.is_none());
        assert_eq!(outcome.applicant.approved_at, original_approved_at);
        assert_eq!(outcome.applicant.expires_at, original_expires_at);
    }

    #[test]
    fn approval_preserves_an_admin_assigned_role() {
        let mut applicant = pending();
        applicant.membership_role = MembershipRole::Volunteer;
        let outcome = applicant
            .transition(LifecycleAction::Approve, fixed_now())
            .unwrap();
        assert_eq!(outcome.applicant.membership_role, MembershipRole::Volunteer);
        assert_eq!(outcome.stamp.unwrap().role, MembershipRole::Volunteer);
    }

    #[test]
    fn rejection_records_the_reason() {
        let applicant = pending()
            .transition(
                LifecycleAction::Reject {
                    reason: "Illegible documents".to_string(),
                },
                fixed_now(),
            )
            .unwrap()
            .applicant;
        assert_eq!(applicant.status, ApplicationStatus::Rejected);
        assert_eq!(
            applicant.rejection_reason.as_deref(),
            Some("Illegible documents")
        );
    }

    #[test]
    fn rejection_requires_a_nonempty_reason() {
        let err = pending()
            .transition(
                LifecycleAction::Reject {
                    reason: "   ".to_string(),
                },
                fixed_now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[test]
    fn leaving_rejected_clears_the_reason() {
        let rejected = pending()
            .transition(
                LifecycleAction::Reject {
                    reason: "Wrong municipality".to_string(),
                },
                fixed_now(),
            )
            .unwrap()
            .applicant;

        let approved = rejected
            .transition(LifecycleAction::Approve, fixed_now())
            .unwrap()
            .applicant;
        assert!(approved.rejection_reason.is_none());
    }

    #[test]
    fn rejecting_a_draft_is_an_illegal_transition() {
        let err = draft()
            .transition(
                LifecycleAction::Reject {
                    reason: "nope".to_string(),
                },
                fixed_now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn approving_a_draft_is_an_illegal_transition() {
        let err = draft()
            .transition(LifecycleAction::Approve, fixed_now())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn submitting_a_pending_record_is_an_illegal_transition() {
        let err = pending()
            .transition(LifecycleAction::Submit, fixed_now())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn expiring_soon_inside_the_window() {
        let mut applicant = pending();
        applicant.expires_at = Some(fixed_now() + Duration::days(10));
        assert!(applicant.is_expiring_soon(fixed_now()));
    }

    #[test]
    fn expiring_soon_false_at_exactly_thirty_days() {
        let mut applicant = pending();
        applicant.expires_at = Some(fixed_now() + Duration::days(30));
        assert!(!applicant.is_expiring_soon(fixed_now()));
    }

    #[test]
    fn expiring_soon_true_just_inside_thirty_days() {
        let mut applicant = pending();
        applicant.expires_at = Some(fixed_now() + Duration::days(30) - Duration::seconds(1));
        assert!(applicant.is_expiring_soon(fixed_now()));
    }

    #[test]
    fn expiring_soon_false_for_past_expiry() {
        let mut applicant = pending();
        applicant.expires_at = Some(fixed_now() - Duration::days(1));
        assert!(!applicant.is_expiring_soon(fixed_now()));
    }

    #[test]
    fn expiring_soon_false_at_the_exact_expiry_instant() {
        let mut applicant = pending();
        applicant.expires_at = Some(fixed_now());
        assert!(!applicant.is_expiring_soon(fixed_now()));
    }

    #[test]
    fn expiring_soon_false_when_unset() {
        assert!(!pending().is_expiring_soon(fixed_now()));
    }

    #[test]
    fn applicant_round_trips_through_json() {
        let applicant = pending();
        let json = serde_json::to_string(&applicant).unwrap();
        let parsed: Applicant = serde_json::from_str(&json).unwrap();
        assert_eq!(applicant, parsed);
    }

    #[test]
    fn draft_serializes_without_lifecycle_fields() {
        let json = serde_json::to_string(&draft()).unwrap();
        assert!(!json.contains("approved_at"));
        assert!(!json.contains("rejection_reason"));
    }
}
