use crate::db::{read_optional_timestamp, read_timestamp, timestamp};
use chrono::{DateTime, NaiveDate, Utc};
use common::model::person::PersonRef;
use common::model::tax::Tax;
use common::requests::TaxQuery;
use rusqlite::{params, Connection, OptionalExtension, Row};

const SELECT: &str = "SELECT t.tax_id, t.person_id, t.year, t.amount, t.paid_amount, t.is_paid, \
     t.paid_at, t.due_date, t.description, t.created_at, p.first_name, p.last_name \
     FROM taxes t JOIN persons p ON p.person_id = t.person_id";

/// A tax that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewTax {
    pub person_id: i64,
    pub year: i32,
    pub amount: f64,
    pub paid_amount: f64,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
}

fn from_row(row: &Row) -> rusqlite::Result<Tax> {
    let person_id: i64 = row.get(1)?;
    Ok(Tax {
        tax_id: row.get(0)?,
        person_id,
        year: row.get(2)?,
        amount: row.get(3)?,
        paid_amount: row.get(4)?,
        is_paid: row.get(5)?,
        paid_at: read_optional_timestamp(row, 6)?,
        due_date: row.get(7)?,
        description: row.get(8)?,
        created_at: read_timestamp(row, 9)?,
        person: PersonRef {
            person_id,
            first_name: row.get(10)?,
            last_name: row.get(11)?,
        },
    })
}

/// Fails with a UNIQUE violation when the person already has a tax for that year.
pub fn insert(conn: &Connection, tax: &NewTax, created_at: DateTime<Utc>) -> rusqlite::Result<Tax> {
    conn.execute(
        "INSERT INTO taxes (person_id, year, amount, paid_amount, is_paid, paid_at, due_date, \
         description, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            tax.person_id,
            tax.year,
            tax.amount,
            tax.paid_amount,
            tax.is_paid,
            tax.paid_at.as_ref().map(timestamp),
            tax.due_date,
            tax.description,
            timestamp(&created_at),
        ],
    )?;
    let id = conn.last_insert_rowid();
    find(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

pub fn find(conn: &Connection, tax_id: i64) -> rusqlite::Result<Option<Tax>> {
    conn.query_row(&format!("{} WHERE t.tax_id = ?1", SELECT), params![tax_id], from_row)
        .optional()
}

/// Taxes matching every filter that is set, latest year first.
pub fn list(conn: &Connection, query: &TaxQuery) -> rusqlite::Result<Vec<Tax>> {
    let mut stmt = conn.prepare(&format!(
        "{} WHERE (?1 IS NULL OR t.person_id = ?1) \
         AND (?2 IS NULL OR t.year = ?2) \
         AND (?3 IS NULL OR t.is_paid = ?3) \
         ORDER BY t.year DESC, t.created_at DESC, t.tax_id DESC",
        SELECT
    ))?;
    let taxes = stmt
        .query_map(params![query.person_id, query.year, query.is_paid], from_row)?
        .collect();
    taxes
}

/// Writes the payment and description columns of `tax` back to its row.
pub fn update(conn: &Connection, tax: &Tax) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE taxes SET amount = ?2, paid_amount = ?3, is_paid = ?4, paid_at = ?5, \
         due_date = ?6, description = ?7 WHERE tax_id = ?1",
        params![
            tax.tax_id,
            tax.amount,
            tax.paid_amount,
            tax.is_paid,
            tax.paid_at.as_ref().map(timestamp),
            tax.due_date,
            tax.description,
        ],
    )?;
    Ok(changed > 0)
}

pub fn delete(conn: &Connection, tax_id: i64) -> rusqlite::Result<bool> {
    let deleted = conn.execute("DELETE FROM taxes WHERE tax_id = ?1", params![tax_id])?;
    Ok(deleted > 0)
}
