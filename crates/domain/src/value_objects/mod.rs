//! Value Objects - Immutable, identity-less domain primitives

mod applicant_id;
mod application_status;
mod email_address;
mod identity_number;
mod membership_role;
mod phone_number;

pub use applicant_id::ApplicantId;
pub use application_status::ApplicationStatus;
pub use email_address::EmailAddress;
pub use identity_number::IdentityNumber;
pub use membership_role::MembershipRole;
pub use phone_number::PhoneNumber;
