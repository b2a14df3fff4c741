//! Process-wide SQLite storage.
//!
//! A single `Database` handle is opened in `main.rs`, migrated, and shared with
//! every handler as `web::Data<Database>`. The handle guards one connection;
//! callers hold the lock for one storage call at a time, so long-running work
//! such as a CSV import interleaves with other requests between rows.
//!
//! The per-table modules hold plain functions over `&Connection` that return
//! `rusqlite::Result`; conversion to `ApiError` happens in `Database::with_conn`.

pub mod fokontany;
pub mod persons;
pub mod taxes;

use crate::error::ApiError;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use std::sync::{Arc, Mutex};

pub(crate) const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS fokontany (
    fokontany_id INTEGER PRIMARY KEY AUTOINCREMENT,
    code         TEXT NOT NULL UNIQUE,
    name         TEXT NOT NULL,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS persons (
    person_id        INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name       TEXT NOT NULL,
    last_name        TEXT NOT NULL,
    gender           TEXT NOT NULL,
    birth_date       TEXT NOT NULL,
    birth_place      TEXT NOT NULL,
    national_id      TEXT NOT NULL UNIQUE,
    issue_date       TEXT NOT NULL,
    issue_place      TEXT NOT NULL,
    profession       TEXT NOT NULL,
    father_name      TEXT,
    mother_name      TEXT,
    current_address  TEXT NOT NULL,
    previous_address TEXT NOT NULL,
    nationality      TEXT NOT NULL,
    phone            TEXT NOT NULL,
    marital_status   TEXT NOT NULL,
    status           TEXT NOT NULL,
    is_voter         INTEGER NOT NULL DEFAULT 0,
    fokontany_id     INTEGER REFERENCES fokontany(fokontany_id) ON DELETE CASCADE,
    created_at       TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS taxes (
    tax_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    person_id   INTEGER NOT NULL REFERENCES persons(person_id) ON DELETE CASCADE,
    year        INTEGER NOT NULL,
    amount      REAL NOT NULL,
    paid_amount REAL NOT NULL DEFAULT 0,
    is_paid     INTEGER NOT NULL DEFAULT 0,
    paid_at     TEXT,
    due_date    TEXT,
    description TEXT,
    created_at  TEXT NOT NULL,
    UNIQUE (person_id, year)
);

CREATE INDEX IF NOT EXISTS persons_fokontany_idx ON persons (fokontany_id);
CREATE INDEX IF NOT EXISTS persons_voter_idx ON persons (is_voter, status, created_at);
";

#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Opens (creating if needed) and migrates the database at `path`.
    /// `":memory:"` gives a private in-memory database.
    pub fn open(path: &str) -> Result<Self, rusqlite::Error> {
        let conn = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, rusqlite::Error> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Database {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` with exclusive access to the connection.
    pub fn with_conn<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Connection) -> Result<T, ApiError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| ApiError::Internal("storage lock poisoned".to_string()))?;
        f(&conn)
    }
}

/// Timestamps are stored as fixed-width RFC 3339 UTC text, so that text
/// comparison and ordering in SQL agree with time order.
pub fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn read_timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    parse_timestamp(idx, &text)
}

pub fn read_optional_timestamp(row: &Row, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let text: Option<String> = row.get(idx)?;
    text.map(|t| parse_timestamp(idx, &t)).transpose()
}

fn parse_timestamp(idx: usize, text: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Reads a TEXT column holding an enum code such as `"ACTIF"`.
pub fn read_code<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let text: String = row.get(idx)?;
    text.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn migration_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        db.with_conn(|conn| {
            conn.execute_batch(SCHEMA)?;
            let tables: i64 = conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('persons', 'taxes', 'fokontany')",
                [],
                |row| row.get(0),
            )?;
            assert_eq!(tables, 3);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn timestamps_are_fixed_width() {
        let whole = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let later = whole + chrono::Duration::microseconds(1);
        assert_eq!(timestamp(&whole), "2024-05-01T08:00:00.000000Z");
        assert_eq!(timestamp(&whole).len(), timestamp(&later).len());
        assert!(timestamp(&whole) < timestamp(&later));
    }
}
