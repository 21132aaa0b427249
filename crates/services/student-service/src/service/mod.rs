//! Service layer - roster synchronization use cases.

mod snapshot;
mod student_service;

pub use snapshot::{RefreshToken, SnapshotPublisher, StudentSnapshot};
pub use student_service::{StudentManager, StudentService};
