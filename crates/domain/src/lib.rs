//! Domain layer for the Lekgotla membership portal
//!
//! Contains the applicant lifecycle, identity-number validation, value
//! objects, and domain errors. This layer has no I/O dependencies.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
