use rusqlite::Connection;

use crate::StoreError;

pub fn run(conn: &Connection) -> Result<(), StoreError> {
    // Base schema — idempotent CREATE TABLE IF NOT EXISTS
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS documents (
            id             TEXT PRIMARY KEY,
            load_id        TEXT NOT NULL,
            category       TEXT NOT NULL,
            filename       TEXT NOT NULL,
            mime_type      TEXT NOT NULL DEFAULT 'application/octet-stream',
            size_bytes     INTEGER NOT NULL DEFAULT 0,
            uploaded_at_ms INTEGER NOT NULL,
            content        BLOB NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_documents_load ON documents(load_id);
        CREATE INDEX IF NOT EXISTS idx_documents_load_category
            ON documents(load_id, category);
        ",
    )?;

    // Versioned migrations
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |r| r.get(0),
        )
        .unwrap_or(0);

    if current_version < 1 {
        conn.execute(
            "INSERT INTO schema_version (version, applied_at) VALUES (1, datetime('now'))",
            [],
        )?;
    }

    Ok(())
}
