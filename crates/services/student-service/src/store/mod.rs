//! Document store port and adapters.
//!
//! The store holds hierarchical collections of keyed documents, addressed by
//! slash-separated paths (`students`, `students/{id}/phones`). Deleting a
//! document never touches collections nested under it.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use common::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Field map of a single document.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// A document as returned by a collection listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// String field, or None when absent or not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }
}

/// Document store trait for dependency injection.
///
/// All operations are one-shot: listings are snapshots, not subscriptions.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Create a document with a store-generated id
    async fn create_document(&self, collection: &str, fields: Fields) -> AppResult<String>;

    /// Overwrite (or create) a document under a known id
    async fn set_document(&self, collection: &str, document_id: &str, fields: Fields)
        -> AppResult<()>;

    /// Delete a document. Deleting a missing document succeeds.
    async fn delete_document(&self, collection: &str, document_id: &str) -> AppResult<()>;

    /// List every document of a collection in store order
    async fn list_documents(&self, collection: &str) -> AppResult<Vec<Document>>;
}

/// Collection contents shared by the in-process adapters.
///
/// Documents keep insertion order, which is the enumeration order
/// callers observe.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct Collections {
    collections: BTreeMap<String, Vec<Document>>,
}

impl Collections {
    pub(crate) fn create(&mut self, collection: &str, fields: Fields) -> AppResult<String> {
        validate_collection_path(collection).map_err(|e| AppError::write_failed(collection, e))?;

        let id = Uuid::new_v4().simple().to_string();
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(Document::new(id.clone(), fields));

        Ok(id)
    }

    pub(crate) fn set(
        &mut self,
        collection: &str,
        document_id: &str,
        fields: Fields,
    ) -> AppResult<()> {
        validate_collection_path(collection).map_err(|e| AppError::write_failed(collection, e))?;
        validate_segment(document_id).map_err(|e| AppError::write_failed(collection, e))?;

        let documents = self.collections.entry(collection.to_string()).or_default();
        match documents.iter_mut().find(|d| d.id == document_id) {
            Some(document) => document.fields = fields,
            None => documents.push(Document::new(document_id, fields)),
        }

        Ok(())
    }

    pub(crate) fn delete(&mut self, collection: &str, document_id: &str) -> AppResult<()> {
        validate_collection_path(collection).map_err(|e| AppError::write_failed(collection, e))?;

        if let Some(documents) = self.collections.get_mut(collection) {
            documents.retain(|d| d.id != document_id);
            if documents.is_empty() {
                self.collections.remove(collection);
            }
        }

        Ok(())
    }

    pub(crate) fn list(&self, collection: &str) -> AppResult<Vec<Document>> {
        validate_collection_path(collection).map_err(|e| AppError::read_failed(collection, e))?;

        Ok(self.collections.get(collection).cloned().unwrap_or_default())
    }
}

/// A collection path alternates collection and document segments and
/// always ends on a collection, so it has an odd number of segments.
fn validate_collection_path(path: &str) -> Result<(), String> {
    let segments: Vec<&str> = path.split(domain::PATH_SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(format!("invalid collection path '{}'", path));
    }
    if segments.len() % 2 == 0 {
        return Err(format!("'{}' is a document path, not a collection", path));
    }
    Ok(())
}

fn validate_segment(id: &str) -> Result<(), String> {
    if id.is_empty() || id.contains(domain::PATH_SEPARATOR) {
        return Err(format!("invalid document id '{}'", id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_collection_paths() {
        assert!(validate_collection_path("students").is_ok());
        assert!(validate_collection_path("students/abc/phones").is_ok());
        assert!(validate_collection_path("students/abc").is_err());
        assert!(validate_collection_path("students//phones").is_err());
        assert!(validate_collection_path("").is_err());
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let mut data = Collections::default();
        let first = data.create("students", fields(json!({"name": "Zoe"}))).unwrap();
        let second = data.create("students", fields(json!({"name": "Amy"}))).unwrap();

        let ids: Vec<String> = data.list("students").unwrap().into_iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn test_set_overwrites_all_fields() {
        let mut data = Collections::default();
        let id = data
            .create("students", fields(json!({"name": "Amy", "extra": 1})))
            .unwrap();

        data.set("students", &id, fields(json!({"name": "Bea"}))).unwrap();

        let docs = data.list("students").unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].get_str("name"), Some("Bea"));
        assert!(docs[0].fields.get("extra").is_none());
    }

    #[test]
    fn test_delete_leaves_nested_collections() {
        let mut data = Collections::default();
        let id = data.create("students", Fields::new()).unwrap();
        let phones = domain::phones_collection(&id);
        data.create(&phones, fields(json!({"number": "555"}))).unwrap();

        data.delete("students", &id).unwrap();

        assert!(data.list("students").unwrap().is_empty());
        assert_eq!(data.list(&phones).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_missing_document_succeeds() {
        let mut data = Collections::default();
        assert!(data.delete("students", "nope").is_ok());
    }

    #[test]
    fn test_document_path_is_rejected() {
        let mut data = Collections::default();
        let err = data.create("students/abc", Fields::new()).unwrap_err();
        assert!(matches!(err, AppError::WriteFailed { .. }));
    }
}
