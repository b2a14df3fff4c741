use crate::db::{read_timestamp, timestamp};
use chrono::{DateTime, Utc};
use common::model::fokontany::Fokontany;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT: &str = "SELECT f.fokontany_id, f.code, f.name, f.created_at, \
     (SELECT COUNT(*) FROM persons p WHERE p.fokontany_id = f.fokontany_id) \
     FROM fokontany f";

fn from_row(row: &Row) -> rusqlite::Result<Fokontany> {
    Ok(Fokontany {
        fokontany_id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        created_at: read_timestamp(row, 3)?,
        total_persons: row.get(4)?,
    })
}

pub fn insert(
    conn: &Connection,
    code: &str,
    name: &str,
    created_at: DateTime<Utc>,
) -> rusqlite::Result<Fokontany> {
    conn.execute(
        "INSERT INTO fokontany (code, name, created_at) VALUES (?1, ?2, ?3)",
        params![code, name, timestamp(&created_at)],
    )?;
    let id = conn.last_insert_rowid();
    find(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

pub fn find(conn: &Connection, fokontany_id: i64) -> rusqlite::Result<Option<Fokontany>> {
    conn.query_row(
        &format!("{} WHERE f.fokontany_id = ?1", SELECT),
        params![fokontany_id],
        from_row,
    )
    .optional()
}

pub fn list(conn: &Connection) -> rusqlite::Result<Vec<Fokontany>> {
    let mut stmt = conn.prepare(&format!("{} ORDER BY f.fokontany_id ASC", SELECT))?;
    let all = stmt.query_map([], from_row)?.collect();
    all
}

/// Returns false when no fokontany has this id.
pub fn update(conn: &Connection, fokontany_id: i64, code: &str, name: &str) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE fokontany SET code = ?2, name = ?3 WHERE fokontany_id = ?1",
        params![fokontany_id, code, name],
    )?;
    Ok(changed > 0)
}

/// Deletes the fokontany together with the persons attached to it.
pub fn delete(conn: &Connection, fokontany_id: i64) -> rusqlite::Result<bool> {
    let deleted = conn.execute(
        "DELETE FROM fokontany WHERE fokontany_id = ?1",
        params![fokontany_id],
    )?;
    Ok(deleted > 0)
}
