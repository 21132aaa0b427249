//! Student repository over a document store.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{join_all, try_join_all};

use common::{AppError, AppResult};
use domain::{phones_collection, Student, STUDENTS_COLLECTION};

use super::entities::student::{phone_fields, student_fields};
use super::entities::{PhoneRecord, StudentRecord};
use crate::store::DocumentStore;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Student repository trait for dependency injection.
///
/// Parent and phone writes are separate store calls. Nothing here is atomic
/// across documents.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Create the parent document and return its store id
    async fn create(&self, student: &Student) -> AppResult<String>;

    /// Overwrite `id`, `name` and `program` of an existing parent document
    async fn overwrite(&self, document_id: &str, student: &Student) -> AppResult<()>;

    /// Delete the parent document only (phones are left in place)
    async fn delete(&self, document_id: &str) -> AppResult<()>;

    /// List the phone documents of a student
    async fn list_phones(&self, document_id: &str) -> AppResult<Vec<PhoneRecord>>;

    /// Create one phone document per number, concurrently
    async fn add_phones(&self, document_id: &str, numbers: &[String]) -> AppResult<()>;

    /// Delete phone documents by child id, concurrently
    async fn remove_phones(&self, document_id: &str, phone_ids: &[String]) -> AppResult<()>;

    /// Read every student together with its phones
    async fn fetch_all(&self) -> AppResult<Vec<Student>>;
}

/// Concrete implementation of StudentRepository
pub struct StudentStore {
    store: Arc<dyn DocumentStore>,
}

impl StudentStore {
    /// Create new repository instance
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn phone_numbers(&self, document_id: &str) -> AppResult<Vec<String>> {
        let phones = self.list_phones(document_id).await?;
        Ok(phones.into_iter().map(|p| p.number).collect())
    }
}

#[async_trait]
impl StudentRepository for StudentStore {
    async fn create(&self, student: &Student) -> AppResult<String> {
        self.store
            .create_document(STUDENTS_COLLECTION, student_fields(student))
            .await
    }

    async fn overwrite(&self, document_id: &str, student: &Student) -> AppResult<()> {
        self.store
            .set_document(STUDENTS_COLLECTION, document_id, student_fields(student))
            .await
    }

    async fn delete(&self, document_id: &str) -> AppResult<()> {
        self.store
            .delete_document(STUDENTS_COLLECTION, document_id)
            .await
    }

    async fn list_phones(&self, document_id: &str) -> AppResult<Vec<PhoneRecord>> {
        let documents = self
            .store
            .list_documents(&phones_collection(document_id))
            .await?;

        Ok(documents.iter().filter_map(PhoneRecord::from_document).collect())
    }

    async fn add_phones(&self, document_id: &str, numbers: &[String]) -> AppResult<()> {
        let collection = phones_collection(document_id);

        let writes = numbers.iter().map(|number| {
            let collection = collection.as_str();
            async move {
                let result = self
                    .store
                    .create_document(collection, phone_fields(number))
                    .await;
                match &result {
                    Ok(_) => tracing::debug!(%number, "Phone added"),
                    Err(e) => tracing::warn!(%number, error = %e, "Failed to add phone"),
                }
                result
            }
        });

        let failed = join_all(writes)
            .await
            .into_iter()
            .filter(Result::is_err)
            .count();

        if failed > 0 {
            return Err(AppError::PartialChildWriteFailed {
                document_id: document_id.to_string(),
                failed,
                total: numbers.len(),
            });
        }

        Ok(())
    }

    async fn remove_phones(&self, document_id: &str, phone_ids: &[String]) -> AppResult<()> {
        let collection = phones_collection(document_id);

        let deletes = phone_ids.iter().map(|phone_id| {
            let collection = collection.as_str();
            async move {
                let result = self.store.delete_document(collection, phone_id).await;
                if let Err(e) = &result {
                    tracing::warn!(%phone_id, error = %e, "Failed to delete phone");
                }
                result
            }
        });

        let failed = join_all(deletes)
            .await
            .into_iter()
            .filter(Result::is_err)
            .count();

        if failed > 0 {
            return Err(AppError::PartialChildDeleteOrCreateFailed {
                document_id: document_id.to_string(),
                failed,
                total: phone_ids.len(),
            });
        }

        Ok(())
    }

    async fn fetch_all(&self) -> AppResult<Vec<Student>> {
        let parents = self.store.list_documents(STUDENTS_COLLECTION).await?;

        // Phone collections are read concurrently; the first failure
        // fails the whole fetch.
        let students = try_join_all(parents.iter().map(|document| async move {
            let record = StudentRecord::from_document(document);
            let phones = self.phone_numbers(&record.document_id).await?;
            Ok::<_, AppError>(record.into_student(phones))
        }))
        .await?;

        Ok(students)
    }
}
