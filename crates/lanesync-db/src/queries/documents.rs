use bytes::Bytes;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use lanesync_core::{CreateDocument, Document, DocumentMeta};

use crate::{Db, StoreError};

const META_COLUMNS: &str = "id, load_id, category, filename, mime_type, size_bytes, uploaded_at_ms";

fn row_to_meta(row: &Row) -> rusqlite::Result<DocumentMeta> {
    Ok(DocumentMeta {
        id: row.get("id")?,
        load_id: row.get("load_id")?,
        category: row.get("category")?,
        filename: row.get("filename")?,
        mime_type: row.get("mime_type")?,
        size_bytes: row.get("size_bytes")?,
        uploaded_at_ms: row.get("uploaded_at_ms")?,
    })
}

fn row_to_document(row: &Row) -> rusqlite::Result<Document> {
    let content: Vec<u8> = row.get("content")?;
    Ok(Document {
        id: row.get("id")?,
        load_id: row.get("load_id")?,
        category: row.get("category")?,
        filename: row.get("filename")?,
        mime_type: row.get("mime_type")?,
        size_bytes: row.get("size_bytes")?,
        uploaded_at_ms: row.get("uploaded_at_ms")?,
        content: Bytes::from(content),
    })
}

impl Db {
    /// Insert one document row. Metadata and payload live in the same row,
    /// so a failed insert leaves nothing behind.
    ///
    /// The category is stored verbatim; normalization against the fixed
    /// display list happens only when rendering.
    pub fn save_document(&self, input: &CreateDocument) -> Result<DocumentMeta, StoreError> {
        if input.load_id.trim().is_empty() {
            return Err(StoreError::InvalidArgument("load_id is required".into()));
        }
        if input.filename.trim().is_empty() {
            return Err(StoreError::InvalidArgument("file payload is required".into()));
        }

        let id = uuid::Uuid::new_v4().to_string();
        let uploaded_at_ms = Utc::now().timestamp_millis();
        let mime_type = input
            .mime_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let size_bytes = input.content.len() as i64;

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO documents
                     (id, load_id, category, filename, mime_type, size_bytes, uploaded_at_ms, content)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    id,
                    input.load_id,
                    input.category,
                    input.filename,
                    mime_type,
                    size_bytes,
                    uploaded_at_ms,
                    input.content.as_ref(),
                ],
            )?;
            Ok(())
        })?;

        tracing::debug!(%id, load_id = %input.load_id, size_bytes, "saved document");

        Ok(DocumentMeta {
            id,
            load_id: input.load_id.clone(),
            category: input.category.clone(),
            filename: input.filename.clone(),
            mime_type,
            size_bytes,
            uploaded_at_ms,
        })
    }

    /// All documents for a load, newest first. The rowid tiebreak keeps a
    /// burst of same-millisecond uploads in reverse insertion order.
    ///
    /// An empty `load_id` means no load is selected in the panel, which is a
    /// normal state: it yields an empty list rather than an error.
    pub fn list_documents(&self, load_id: &str) -> Result<Vec<DocumentMeta>, StoreError> {
        if load_id.is_empty() {
            return Ok(Vec::new());
        }
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {META_COLUMNS} FROM documents WHERE load_id = ?1
                 ORDER BY uploaded_at_ms DESC, rowid DESC"
            ))?;
            let docs = stmt
                .query_map(params![load_id], row_to_meta)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(docs)
        })
    }

    /// Category-scoped variant of [`Db::list_documents`]. Matches the stored
    /// category string exactly (the composite index covers this lookup).
    pub fn list_documents_by_category(
        &self,
        load_id: &str,
        category: &str,
    ) -> Result<Vec<DocumentMeta>, StoreError> {
        if load_id.is_empty() {
            return Ok(Vec::new());
        }
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {META_COLUMNS} FROM documents
                 WHERE load_id = ?1 AND category = ?2
                 ORDER BY uploaded_at_ms DESC, rowid DESC"
            ))?;
            let docs = stmt
                .query_map(params![load_id, category], row_to_meta)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(docs)
        })
    }

    /// Full row including content. Absence is `None`, not an error — the id
    /// may be stale (already deleted by another action).
    pub fn get_document(&self, id: &str) -> Result<Option<Document>, StoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT * FROM documents WHERE id = ?1",
                params![id],
                row_to_document,
            )
            .optional()
            .map_err(StoreError::from)
        })
    }

    /// Remove the row if present. Deleting a missing id is a no-op success.
    pub fn delete_document(&self, id: &str) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            let n = conn.execute("DELETE FROM documents WHERE id = ?1", params![id])?;
            if n > 0 {
                tracing::debug!(%id, "deleted document");
            }
            Ok(())
        })
    }
}
