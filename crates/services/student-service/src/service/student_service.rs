//! Student service - roster mutations and republishing.
//!
//! Each mutation writes to the store and then rebuilds the whole roster from
//! a fresh read. The roster is never patched in place.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use common::{AppError, AppResult, PhoneSyncStrategy, SyncConfig};
use domain::{sort_by_name, PhoneDiff, Student};

use super::snapshot::{SnapshotPublisher, StudentSnapshot};
use crate::repository::entities::PhoneRecord;
use crate::repository::StudentRepository;

/// Student service trait for dependency injection.
///
/// Mutations return once their writes have settled and the roster has been
/// refreshed. Errors are logged where they happen and also returned.
#[async_trait]
pub trait StudentService: Send + Sync {
    /// Create a student and its phones, returning the new document id.
    ///
    /// The roster is refreshed whenever the parent document was written,
    /// even if some phone writes failed.
    async fn add_student(&self, student: &Student) -> AppResult<String>;

    /// Overwrite a persisted student and reconcile its phones.
    ///
    /// The roster is not refreshed when any phone write fails.
    async fn update_student(&self, student: &Student) -> AppResult<()>;

    /// Delete a persisted student.
    ///
    /// Phones are left in the store unless cascading deletes are enabled.
    async fn delete_student(&self, student: &Student) -> AppResult<()>;

    /// Published students, sorted by name
    fn students(&self) -> Arc<[Student]>;

    /// Published roster with its version
    fn snapshot(&self) -> StudentSnapshot;

    /// Watch the roster for changes
    fn subscribe(&self) -> watch::Receiver<StudentSnapshot>;
}

/// Concrete implementation of StudentService using repository.
pub struct StudentManager {
    repo: Arc<dyn StudentRepository>,
    config: SyncConfig,
    publisher: SnapshotPublisher,
}

impl StudentManager {
    /// Create a manager with an empty roster
    pub fn new(repo: Arc<dyn StudentRepository>, config: SyncConfig) -> Self {
        Self {
            repo,
            config,
            publisher: SnapshotPublisher::new(),
        }
    }

    /// Create a manager and load the current roster.
    ///
    /// A failed initial load is logged and leaves the roster empty.
    pub async fn start(repo: Arc<dyn StudentRepository>, config: SyncConfig) -> Self {
        let manager = Self::new(repo, config);
        if let Err(e) = manager.refresh().await {
            tracing::warn!(error = %e, "Initial student fetch failed");
        }
        manager
    }

    /// Rebuild the roster from the store.
    ///
    /// Returns false when a newer refresh was published first and this
    /// result was dropped.
    async fn refresh(&self) -> AppResult<bool> {
        let token = self.publisher.issue();
        tracing::debug!(token = token.value(), "Refreshing students");

        let mut students = self
            .repo
            .fetch_all()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Error fetching students"))?;
        sort_by_name(&mut students);

        let count = students.len();
        let published = self.publisher.publish(token, students);
        if published {
            tracing::debug!(token = token.value(), count, "Student list published");
        } else {
            tracing::debug!(token = token.value(), "Dropped stale student list");
        }

        Ok(published)
    }

    /// Bring the stored phones of a student in line with `desired`
    async fn sync_phones(&self, document_id: &str, desired: &[String]) -> AppResult<()> {
        let stored = self.repo.list_phones(document_id).await?;

        let (removals, additions): (Vec<String>, Vec<String>) = match self.config.phone_sync {
            PhoneSyncStrategy::Replace => (
                stored.iter().map(|p| p.id.clone()).collect(),
                desired.to_vec(),
            ),
            PhoneSyncStrategy::Diff => {
                let current: Vec<String> = stored.iter().map(|p| p.number.clone()).collect();
                let diff = PhoneDiff::between(&current, desired);
                (child_ids_for(&stored, &diff.removals), diff.additions)
            }
        };

        tracing::debug!(
            %document_id,
            strategy = %self.config.phone_sync,
            removed = removals.len(),
            added = additions.len(),
            "Syncing phones"
        );

        // All deletes settle before any create starts
        if !removals.is_empty() {
            self.repo.remove_phones(document_id, &removals).await?;
        }
        if !additions.is_empty() {
            self.repo
                .add_phones(document_id, &additions)
                .await
                .map_err(|e| match e {
                    AppError::PartialChildWriteFailed {
                        document_id,
                        failed,
                        total,
                    } => AppError::PartialChildDeleteOrCreateFailed {
                        document_id,
                        failed,
                        total,
                    },
                    other => other,
                })?;
        }

        Ok(())
    }

    /// Remove every phone document of a student
    async fn clear_phones(&self, document_id: &str) -> AppResult<()> {
        let ids: Vec<String> = self
            .repo
            .list_phones(document_id)
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();

        if ids.is_empty() {
            return Ok(());
        }
        self.repo.remove_phones(document_id, &ids).await
    }
}

/// Child ids to delete for a list of numbers, one stored phone per number.
fn child_ids_for(stored: &[PhoneRecord], numbers: &[String]) -> Vec<String> {
    let mut taken = vec![false; stored.len()];
    let mut ids = Vec::with_capacity(numbers.len());

    for number in numbers {
        let found = stored
            .iter()
            .enumerate()
            .find(|(i, p)| !taken[*i] && &p.number == number);
        if let Some((i, phone)) = found {
            taken[i] = true;
            ids.push(phone.id.clone());
        }
    }

    ids
}

#[async_trait]
impl StudentService for StudentManager {
    #[tracing::instrument(skip_all, fields(id = %student.id))]
    async fn add_student(&self, student: &Student) -> AppResult<String> {
        let document_id = self
            .repo
            .create(student)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Error adding student"))?;
        tracing::info!(%document_id, "Student added");

        let phones = if student.phones.is_empty() {
            Ok(())
        } else {
            self.repo.add_phones(&document_id, &student.phones).await
        };
        if let Err(e) = &phones {
            tracing::warn!(%document_id, error = %e, "Student added with missing phones");
        }

        // The parent exists either way, so the roster must show it
        self.refresh().await?;
        phones?;

        Ok(document_id)
    }

    #[tracing::instrument(skip_all, fields(document_id = ?student.document_id))]
    async fn update_student(&self, student: &Student) -> AppResult<()> {
        let document_id = student.require_document_id()?;

        self.repo
            .overwrite(document_id, student)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Error updating student"))?;

        self.sync_phones(document_id, &student.phones)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Error updating student phones"))?;
        tracing::info!(%document_id, "Student updated");

        self.refresh().await?;
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(document_id = ?student.document_id))]
    async fn delete_student(&self, student: &Student) -> AppResult<()> {
        let document_id = student.require_document_id()?;

        if self.config.cascade_delete {
            self.clear_phones(document_id)
                .await
                .inspect_err(|e| tracing::error!(error = %e, "Error deleting student phones"))?;
        }

        self.repo
            .delete(document_id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Error deleting student"))?;
        tracing::info!(%document_id, "Student deleted");

        self.refresh().await?;
        Ok(())
    }

    fn students(&self) -> Arc<[Student]> {
        self.publisher.current().students
    }

    fn snapshot(&self) -> StudentSnapshot {
        self.publisher.current()
    }

    fn subscribe(&self) -> watch::Receiver<StudentSnapshot> {
        self.publisher.subscribe()
    }
}
