use async_trait::async_trait;
use lanesync_core::{CreateDocument, Document, DocumentMeta};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Abstraction over the document store operations the attachment panel needs.
///
/// `LocalService` wraps the embedded SQLite store directly.
/// `HttpService` talks to a running lanesync-server.
///
/// All operations suspend until the store signals completion; operations on
/// different ids may interleave freely, and callers that need program order
/// against the same id must await each call before issuing the next.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// All documents for a load, newest first. An empty `load_id` ("no load
    /// selected") yields an empty list, never an error.
    async fn list_documents(&self, load_id: &str) -> Result<Vec<DocumentMeta>, ServiceError>;

    /// Category-scoped listing; matches the stored category string exactly.
    async fn list_documents_by_category(
        &self,
        load_id: &str,
        category: &str,
    ) -> Result<Vec<DocumentMeta>, ServiceError>;

    /// Persist a new document and return its generated metadata.
    async fn save_document(&self, input: &CreateDocument) -> Result<DocumentMeta, ServiceError>;

    /// Full document including content; `None` when the id is stale.
    async fn get_document(&self, id: &str) -> Result<Option<Document>, ServiceError>;

    /// Idempotent delete; succeeds whether or not the id exists.
    async fn delete_document(&self, id: &str) -> Result<(), ServiceError>;
}
