//! Document mappings for stored records.

pub mod student;

pub use student::{PhoneRecord, StudentRecord};
