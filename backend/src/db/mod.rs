//! # Data access
//!
//! SQLite persistence for the three record kinds the admin manages. A fresh
//! connection is opened per request; [`open`] also makes sure the tables
//! exist, so an empty file (or `:memory:`) is a valid starting point.
//!
//! Placeholder lists and content data are stored as JSON text.

pub mod contents;
pub mod templates;
pub mod url_templates;

use crate::error::ServiceError;
use rusqlite::Connection;
use std::path::Path;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS templates (
    id           TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    html         TEXT NOT NULL,
    placeholders TEXT NOT NULL DEFAULT '[]',
    updated_at   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE TABLE IF NOT EXISTS url_templates (
    id           TEXT PRIMARY KEY,
    name         TEXT NOT NULL,
    url_template TEXT NOT NULL,
    placeholders TEXT NOT NULL DEFAULT '[]',
    updated_at   TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE TABLE IF NOT EXISTS contents (
    id              TEXT PRIMARY KEY,
    name            TEXT NOT NULL,
    template_id     TEXT NOT NULL,
    url_template_id TEXT,
    data            TEXT NOT NULL DEFAULT '{}',
    updated_at      TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS contents_template_id ON contents (template_id);
CREATE INDEX IF NOT EXISTS contents_url_template_id ON contents (url_template_id);
";

/// Opens the database at `path` and creates any missing table.
pub fn open(path: &Path) -> Result<Connection, ServiceError> {
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<(), ServiceError> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn open_in_memory() -> Connection {
    let conn = Connection::open_in_memory().expect("in-memory database");
    init_schema(&conn).expect("schema");
    conn
}
