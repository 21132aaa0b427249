//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Students and their phone numbers are shared between the service and any
//! consumer that renders the published roster.

pub mod constants;
pub mod error;
pub mod phone;
pub mod student;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use phone::PhoneDiff;
pub use student::{sort_by_name, Student};
