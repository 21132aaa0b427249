//! In-process document store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use common::AppResult;

use super::{Collections, Document, DocumentStore, Fields};

/// Document store kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create_document(&self, collection: &str, fields: Fields) -> AppResult<String> {
        self.data.write().await.create(collection, fields)
    }

    async fn set_document(
        &self,
        collection: &str,
        document_id: &str,
        fields: Fields,
    ) -> AppResult<()> {
        self.data.write().await.set(collection, document_id, fields)
    }

    async fn delete_document(&self, collection: &str, document_id: &str) -> AppResult<()> {
        self.data.write().await.delete(collection, document_id)
    }

    async fn list_documents(&self, collection: &str) -> AppResult<Vec<Document>> {
        self.data.read().await.list(collection)
    }
}
