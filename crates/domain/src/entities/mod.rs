//! Domain entities - Objects with identity and lifecycle

mod admin_account;
mod applicant;
mod chat_message;

pub use admin_account::{AdminAccount, ResetToken};
pub use applicant::{
    Applicant, ContactDetails, DocumentAttachment, LifecycleAction, LifecycleStamp,
    TransitionOutcome,
};
pub use chat_message::{ChatMessage, Sender};
