use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One stored file for a load, payload included.
///
/// Documents are immutable once written: there is no update operation,
/// only create, read, and delete.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub load_id: String,
    /// Persisted verbatim; display-layer normalization happens in
    /// [`crate::DocumentCategory`], never at write time.
    pub category: String,
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub uploaded_at_ms: i64,
    pub content: Bytes,
}

impl Document {
    pub fn meta(&self) -> DocumentMeta {
        DocumentMeta {
            id: self.id.clone(),
            load_id: self.load_id.clone(),
            category: self.category.clone(),
            filename: self.filename.clone(),
            mime_type: self.mime_type.clone(),
            size_bytes: self.size_bytes,
            uploaded_at_ms: self.uploaded_at_ms,
        }
    }
}

/// Metadata row without the payload. List views carry these so the panel
/// never loads file contents it is not about to download.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub id: String,
    pub load_id: String,
    pub category: String,
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub uploaded_at_ms: i64,
}

/// Input for saving a new document. `id` and `uploaded_at_ms` are generated
/// by the store; `mime_type` falls back to `application/octet-stream` when
/// the uploader did not supply one.
#[derive(Debug, Clone)]
pub struct CreateDocument {
    pub load_id: String,
    pub category: String,
    pub filename: String,
    pub mime_type: Option<String>,
    pub content: Bytes,
}
