use anyhow::{Context, Result};
use rusqlite::{Connection, params};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::config::ExportConfig;
use crate::error::ExportError;
use crate::organization::Organization;

fn storage(err: rusqlite::Error) -> ExportError {
    ExportError::Storage(err.to_string())
}

// ---------------------------------------------------------------------------
// Database
// ---------------------------------------------------------------------------

/// SQLite document store holding one JSON document per organization.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (or creates) the database configured in `config`.
    pub fn open(config: &ExportConfig) -> Result<Self> {
        let db_path = config.db_path()?;
        Self::open_at(&db_path)
    }

    /// Opens (or creates) the SQLite database at the given path.
    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let conn = Connection::open(path)
            .map_err(storage)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(storage)?;
        conn.pragma_update(None, "synchronous", "NORMAL")
            .map_err(storage)?;

        let db = Self { conn };
        db.init_schema()?;
        info!("Database opened at {}", path.display());
        Ok(db)
    }

    /// Opens an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(storage)
            .context("Failed to open in-memory database")?;

        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Creates the table and the jurisdiction index if they do not exist.
    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS organizations (
                    id TEXT PRIMARY KEY,
                    document TEXT NOT NULL,
                    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
                );

                CREATE INDEX IF NOT EXISTS idx_organizations_jurisdiction
                    ON organizations(json_extract(document, '$.extras.jurisdiction_code'));
                ",
            )
            .map_err(storage)?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reading
    // -----------------------------------------------------------------------

    /// Streams every organization whose `extras.jurisdiction_code` equals
    /// `jurisdiction_code`, in insertion order, and returns how many were
    /// visited.
    ///
    /// Rows are fetched and deserialized one at a time. A document that does
    /// not deserialize aborts the scan with [`ExportError::InvalidDocument`];
    /// an error returned by `visit` aborts it unchanged.
    pub fn for_each_organization<F>(&self, jurisdiction_code: &str, mut visit: F) -> Result<usize>
    where
        F: FnMut(Organization) -> Result<()>,
    {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, document FROM organizations
                 WHERE json_extract(document, '$.extras.jurisdiction_code') = ?1
                 ORDER BY rowid",
            )
            .map_err(storage)?;
        let mut rows = stmt.query(params![jurisdiction_code]).map_err(storage)?;

        let mut visited = 0;
        while let Some(row) = rows.next().map_err(storage)? {
            let id: String = row.get(0).map_err(storage)?;
            let document: String = row.get(1).map_err(storage)?;
            let organization = Organization::from_document(&document).map_err(|e| {
                ExportError::InvalidDocument {
                    id,
                    reason: e.to_string(),
                }
            })?;
            visit(organization)?;
            visited += 1;
        }
        debug!("Visited {visited} organizations for {jurisdiction_code}");
        Ok(visited)
    }

    /// Number of stored organizations in a jurisdiction.
    pub fn count_organizations(&self, jurisdiction_code: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM organizations
                 WHERE json_extract(document, '$.extras.jurisdiction_code') = ?1",
                params![jurisdiction_code],
                |row| row.get(0),
            )
            .map_err(storage)?;
        Ok(count as usize)
    }

    // -----------------------------------------------------------------------
    // Writing
    // -----------------------------------------------------------------------

    /// Inserts or replaces one organization document. The document must
    /// deserialize as an [`Organization`]; its `_id` is the key.
    pub fn save_document(&self, document: &Value) -> Result<()> {
        upsert_document(&self.conn, document)
    }

    /// Loads a scrape dump: either a JSON array of documents or a stream of
    /// concatenated / newline-delimited documents. All-or-nothing.
    pub fn import_documents<R: Read>(&self, reader: R) -> Result<usize> {
        let tx = self.conn.unchecked_transaction().map_err(storage)?;
        let mut imported = 0;

        for value in serde_json::Deserializer::from_reader(reader).into_iter::<Value>() {
            let value = value.context("Failed to parse JSON document")?;
            match value {
                Value::Array(documents) => {
                    for document in &documents {
                        upsert_document(&tx, document)?;
                        imported += 1;
                    }
                }
                document => {
                    upsert_document(&tx, &document)?;
                    imported += 1;
                }
            }
        }

        tx.commit().map_err(storage)?;
        info!("Imported {imported} organization documents");
        Ok(imported)
    }
}

fn upsert_document(conn: &Connection, document: &Value) -> Result<()> {
    let organization: Organization =
        serde_json::from_value(document.clone()).map_err(|e| ExportError::InvalidDocument {
            id: document
                .get("_id")
                .or_else(|| document.get("id"))
                .and_then(Value::as_str)
                .unwrap_or("<unknown>")
                .to_string(),
            reason: e.to_string(),
        })?;

    conn.execute(
        "INSERT INTO organizations (id, document, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(id) DO UPDATE SET
             document = excluded.document,
             updated_at = datetime('now')",
        params![organization.id, document.to_string()],
    )
    .map_err(storage)?;
    Ok(())
}
