//! Versioned publication of the student roster.
//!
//! Every refresh takes a token before it reads the store. A finished refresh
//! only replaces the published roster when its token is newer than the one
//! already published, so a slow early refresh can't overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

use domain::Student;

/// Immutable view of the roster handed to consumers.
#[derive(Debug, Clone, Serialize)]
pub struct StudentSnapshot {
    /// Token of the refresh that produced this roster (0 = never refreshed)
    pub version: u64,
    /// When the roster was published
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refreshed_at: Option<DateTime<Utc>>,
    /// Students sorted by name
    pub students: Arc<[Student]>,
}

impl StudentSnapshot {
    fn empty() -> Self {
        Self {
            version: 0,
            refreshed_at: None,
            students: Arc::from(Vec::new()),
        }
    }
}

/// Ticket identifying one refresh cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshToken(u64);

impl RefreshToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Owner of the canonical roster.
pub struct SnapshotPublisher {
    issued: AtomicU64,
    sender: watch::Sender<StudentSnapshot>,
}

impl SnapshotPublisher {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(StudentSnapshot::empty());
        Self {
            issued: AtomicU64::new(0),
            sender,
        }
    }

    /// Issue the next refresh token
    pub fn issue(&self) -> RefreshToken {
        RefreshToken(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Publish a sorted roster for `token`.
    ///
    /// Returns false, leaving the current roster untouched, when a newer
    /// refresh has already been published.
    pub fn publish(&self, token: RefreshToken, students: Vec<Student>) -> bool {
        let mut students = Some(students);
        self.sender.send_if_modified(|current| {
            if token.value() <= current.version {
                return false;
            }
            *current = StudentSnapshot {
                version: token.value(),
                refreshed_at: Some(Utc::now()),
                students: Arc::from(students.take().unwrap_or_default()),
            };
            true
        })
    }

    /// Current roster
    pub fn current(&self) -> StudentSnapshot {
        self.sender.borrow().clone()
    }

    /// Receiver notified on every publish
    pub fn subscribe(&self) -> watch::Receiver<StudentSnapshot> {
        self.sender.subscribe()
    }
}

impl Default for SnapshotPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(names: &[&str]) -> Vec<Student> {
        names
            .iter()
            .map(|n| Student::new("", *n, "", vec![]))
            .collect()
    }

    #[test]
    fn test_starts_empty() {
        let publisher = SnapshotPublisher::new();
        let snapshot = publisher.current();

        assert_eq!(snapshot.version, 0);
        assert!(snapshot.refreshed_at.is_none());
        assert!(snapshot.students.is_empty());
    }

    #[test]
    fn test_tokens_increase() {
        let publisher = SnapshotPublisher::new();
        let first = publisher.issue();
        let second = publisher.issue();

        assert!(second > first);
    }

    #[test]
    fn test_stale_refresh_is_dropped() {
        let publisher = SnapshotPublisher::new();
        let early = publisher.issue();
        let late = publisher.issue();

        assert!(publisher.publish(late, roster(&["New"])));
        assert!(!publisher.publish(early, roster(&["Old"])));

        let snapshot = publisher.current();
        assert_eq!(snapshot.version, late.value());
        assert_eq!(snapshot.students[0].name, "New");
    }

    #[test]
    fn test_in_order_refreshes_both_publish() {
        let publisher = SnapshotPublisher::new();
        let early = publisher.issue();
        let late = publisher.issue();

        assert!(publisher.publish(early, roster(&["A"])));
        assert!(publisher.publish(late, roster(&["A", "B"])));
        assert_eq!(publisher.current().students.len(), 2);
    }

    #[tokio::test]
    async fn test_subscribers_see_publish() {
        let publisher = SnapshotPublisher::new();
        let mut receiver = publisher.subscribe();

        let token = publisher.issue();
        publisher.publish(token, roster(&["Amy"]));

        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow().students[0].name, "Amy");
    }
}
