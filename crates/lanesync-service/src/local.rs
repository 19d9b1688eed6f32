use async_trait::async_trait;
use lanesync_core::{CreateDocument, Document, DocumentMeta};
use lanesync_db::{Db, StoreError};

use crate::{DocumentService, ServiceError};

/// Local implementation backed by direct SQLite access. rusqlite calls are
/// blocking, so each operation hops to the blocking pool.
#[derive(Clone)]
pub struct LocalService {
    db: Db,
}

impl LocalService {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidArgument(msg) => ServiceError::InvalidInput(msg),
            StoreError::Unavailable(msg) => ServiceError::Internal(msg),
        }
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, ServiceError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))?
        .map_err(ServiceError::from)
}

#[async_trait]
impl DocumentService for LocalService {
    async fn list_documents(&self, load_id: &str) -> Result<Vec<DocumentMeta>, ServiceError> {
        let db = self.db.clone();
        let load_id = load_id.to_string();
        run_blocking(move || db.list_documents(&load_id)).await
    }

    async fn list_documents_by_category(
        &self,
        load_id: &str,
        category: &str,
    ) -> Result<Vec<DocumentMeta>, ServiceError> {
        let db = self.db.clone();
        let load_id = load_id.to_string();
        let category = category.to_string();
        run_blocking(move || db.list_documents_by_category(&load_id, &category)).await
    }

    async fn save_document(&self, input: &CreateDocument) -> Result<DocumentMeta, ServiceError> {
        let db = self.db.clone();
        let input = input.clone();
        run_blocking(move || db.save_document(&input)).await
    }

    async fn get_document(&self, id: &str) -> Result<Option<Document>, ServiceError> {
        let db = self.db.clone();
        let id = id.to_string();
        run_blocking(move || db.get_document(&id)).await
    }

    async fn delete_document(&self, id: &str) -> Result<(), ServiceError> {
        let db = self.db.clone();
        let id = id.to_string();
        run_blocking(move || db.delete_document(&id)).await
    }
}
