//! Document store persisted to a JSON file.
//!
//! The whole store is rewritten after every write. A write only reaches the
//! in-memory copy once the file has been saved, so a failed write leaves the
//! store unchanged. Good enough for the CLI, where one process touches the
//! file at a time.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use common::{AppError, AppResult};

use super::{Collections, Document, DocumentStore, Fields};

/// File-backed document store
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: Mutex<Collections>,
}

impl JsonFileStore {
    /// Open the store, loading existing contents.
    ///
    /// A missing file is an empty store; it is created on the first write.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();

        let data = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => Collections::default(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Collections::default(),
            Err(e) => return Err(AppError::Io(e)),
        };

        tracing::debug!(path = %path.display(), "Document store opened");

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn save(&self, data: &Collections, collection: &str) -> AppResult<()> {
        let json =
            serde_json::to_vec_pretty(data).map_err(|e| AppError::write_failed(collection, e))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| AppError::write_failed(collection, e))
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn create_document(&self, collection: &str, fields: Fields) -> AppResult<String> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let id = next.create(collection, fields)?;
        self.save(&next, collection).await?;
        *data = next;
        Ok(id)
    }

    async fn set_document(
        &self,
        collection: &str,
        document_id: &str,
        fields: Fields,
    ) -> AppResult<()> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        next.set(collection, document_id, fields)?;
        self.save(&next, collection).await?;
        *data = next;
        Ok(())
    }

    async fn delete_document(&self, collection: &str, document_id: &str) -> AppResult<()> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        next.delete(collection, document_id)?;
        self.save(&next, collection).await?;
        *data = next;
        Ok(())
    }

    async fn list_documents(&self, collection: &str) -> AppResult<Vec<Document>> {
        self.data.lock().await.list(collection)
    }
}
