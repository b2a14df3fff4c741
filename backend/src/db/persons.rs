use crate::db::{read_code, read_timestamp, timestamp};
use chrono::{DateTime, Utc};
use common::model::person::{Person, PersonDraft};
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLUMNS: &str = "person_id, first_name, last_name, gender, birth_date, birth_place, \
     national_id, issue_date, issue_place, profession, father_name, mother_name, \
     current_address, previous_address, nationality, phone, marital_status, status, \
     is_voter, fokontany_id, created_at";

fn from_row(row: &Row) -> rusqlite::Result<Person> {
    Ok(Person {
        person_id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        gender: read_code(row, 3)?,
        birth_date: row.get(4)?,
        birth_place: row.get(5)?,
        national_id: row.get(6)?,
        issue_date: row.get(7)?,
        issue_place: row.get(8)?,
        profession: row.get(9)?,
        father_name: row.get(10)?,
        mother_name: row.get(11)?,
        current_address: row.get(12)?,
        previous_address: row.get(13)?,
        nationality: row.get(14)?,
        phone: row.get(15)?,
        marital_status: read_code(row, 16)?,
        status: read_code(row, 17)?,
        is_voter: row.get(18)?,
        fokontany_id: row.get(19)?,
        created_at: read_timestamp(row, 20)?,
    })
}

/// Stores a new person and returns it with its assigned id.
///
/// Fails with a UNIQUE constraint violation when the national id is taken.
pub fn insert(
    conn: &Connection,
    draft: &PersonDraft,
    created_at: DateTime<Utc>,
) -> rusqlite::Result<Person> {
    conn.execute(
        "INSERT INTO persons (first_name, last_name, gender, birth_date, birth_place, \
         national_id, issue_date, issue_place, profession, father_name, mother_name, \
         current_address, previous_address, nationality, phone, marital_status, status, \
         is_voter, fokontany_id, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
        params![
            draft.first_name,
            draft.last_name,
            draft.gender.as_str(),
            draft.birth_date,
            draft.birth_place,
            draft.national_id,
            draft.issue_date,
            draft.issue_place,
            draft.profession,
            draft.father_name,
            draft.mother_name,
            draft.current_address,
            draft.previous_address,
            draft.nationality,
            draft.phone,
            draft.marital_status.as_str(),
            draft.status.as_str(),
            draft.is_voter,
            draft.fokontany_id,
            timestamp(&created_at),
        ],
    )?;
    let person_id = conn.last_insert_rowid();
    find(conn, person_id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

pub fn find(conn: &Connection, person_id: i64) -> rusqlite::Result<Option<Person>> {
    conn.query_row(
        &format!("SELECT {} FROM persons WHERE person_id = ?1", COLUMNS),
        params![person_id],
        from_row,
    )
    .optional()
}

pub fn find_by_national_id(conn: &Connection, national_id: &str) -> rusqlite::Result<Option<Person>> {
    conn.query_row(
        &format!("SELECT {} FROM persons WHERE national_id = ?1", COLUMNS),
        params![national_id],
        from_row,
    )
    .optional()
}

pub fn list(conn: &Connection) -> rusqlite::Result<Vec<Person>> {
    let mut stmt = conn.prepare(&format!("SELECT {} FROM persons ORDER BY person_id ASC", COLUMNS))?;
    let persons = stmt.query_map([], from_row)?.collect();
    persons
}

pub fn list_by_fokontany(conn: &Connection, fokontany_id: i64) -> rusqlite::Result<Vec<Person>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM persons WHERE fokontany_id = ?1 ORDER BY person_id ASC",
        COLUMNS
    ))?;
    let persons = stmt.query_map(params![fokontany_id], from_row)?.collect();
    persons
}

/// Writes every mutable column of `person` back to its row.
pub fn update(conn: &Connection, person: &Person) -> rusqlite::Result<usize> {
    conn.execute(
        "UPDATE persons SET first_name = ?2, last_name = ?3, gender = ?4, birth_date = ?5, \
         birth_place = ?6, national_id = ?7, issue_date = ?8, issue_place = ?9, profession = ?10, \
         father_name = ?11, mother_name = ?12, current_address = ?13, previous_address = ?14, \
         nationality = ?15, phone = ?16, marital_status = ?17, status = ?18, is_voter = ?19, \
         fokontany_id = ?20 \
         WHERE person_id = ?1",
        params![
            person.person_id,
            person.first_name,
            person.last_name,
            person.gender.as_str(),
            person.birth_date,
            person.birth_place,
            person.national_id,
            person.issue_date,
            person.issue_place,
            person.profession,
            person.father_name,
            person.mother_name,
            person.current_address,
            person.previous_address,
            person.nationality,
            person.phone,
            person.marital_status.as_str(),
            person.status.as_str(),
            person.is_voter,
            person.fokontany_id,
        ],
    )
}

pub fn delete(conn: &Connection, person_id: i64) -> rusqlite::Result<bool> {
    let deleted = conn.execute("DELETE FROM persons WHERE person_id = ?1", params![person_id])?;
    Ok(deleted > 0)
}

const ACTIVE_VOTER_FILTER: &str =
    "is_voter = 1 AND status = 'ACTIF' AND created_at <= ?1";

/// One page of active voters registered up to `until`, newest first.
pub fn list_active_voters(
    conn: &Connection,
    until: &DateTime<Utc>,
    offset: u64,
    limit: u32,
) -> rusqlite::Result<Vec<Person>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM persons WHERE {} ORDER BY created_at DESC, person_id DESC LIMIT ?2 OFFSET ?3",
        COLUMNS, ACTIVE_VOTER_FILTER
    ))?;
    let voters = stmt
        .query_map(params![timestamp(until), limit, offset as i64], from_row)?
        .collect();
    voters
}

pub fn count_active_voters(conn: &Connection, until: &DateTime<Utc>) -> rusqlite::Result<u64> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM persons WHERE {}", ACTIVE_VOTER_FILTER),
        params![timestamp(until)],
        |row| row.get(0),
    )?;
    Ok(count as u64)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use common::model::person::{Gender, MaritalStatus, ResidencyStatus};

    pub(crate) fn draft(national_id: &str) -> PersonDraft {
        PersonDraft {
            first_name: "Rakoto".into(),
            last_name: "Jean".into(),
            gender: Gender::M,
            birth_date: NaiveDate::from_ymd_opt(1990, 3, 14).unwrap(),
            birth_place: "Antsirabe".into(),
            national_id: national_id.into(),
            issue_date: NaiveDate::from_ymd_opt(2010, 6, 1).unwrap(),
            issue_place: "Antananarivo".into(),
            profession: "Farmer".into(),
            father_name: None,
            mother_name: Some("Rasoa".into()),
            current_address: "Lot II A 12".into(),
            previous_address: "Lot IV B 3".into(),
            nationality: "Malagasy".into(),
            phone: "0340000000".into(),
            marital_status: MaritalStatus::Marie,
            status: ResidencyStatus::Actif,
            is_voter: true,
            fokontany_id: None,
        }
    }

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        conn.execute_batch(crate::db::SCHEMA).unwrap();
        conn
    }

    #[test]
    fn insert_then_find_keeps_every_field() {
        let conn = conn();
        let now = Utc::now();
        let created = insert(&conn, &draft("101"), now).unwrap();
        let found = find(&conn, created.person_id).unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.father_name, None);
        assert_eq!(found.marital_status, MaritalStatus::Marie);
        assert_eq!(find_by_national_id(&conn, "101").unwrap(), Some(created));
        assert_eq!(find_by_national_id(&conn, "999").unwrap(), None);
    }

    #[test]
    fn duplicate_national_id_violates_unique() {
        let conn = conn();
        insert(&conn, &draft("101"), Utc::now()).unwrap();
        let err = insert(&conn, &draft("101"), Utc::now()).unwrap_err();
        assert!(crate::error::is_unique_violation(&err));
    }

    #[test]
    fn active_voters_respect_status_flag_and_date() {
        let conn = conn();
        let early = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap();
        insert(&conn, &draft("1"), early).unwrap();
        insert(&conn, &draft("2"), late).unwrap();
        let mut moved = draft("3");
        moved.status = ResidencyStatus::Demenager;
        insert(&conn, &moved, early).unwrap();
        let mut not_voter = draft("4");
        not_voter.is_voter = false;
        insert(&conn, &not_voter, early).unwrap();

        let cutoff = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        assert_eq!(count_active_voters(&conn, &cutoff).unwrap(), 1);
        assert_eq!(count_active_voters(&conn, &late).unwrap(), 2);
        let page = list_active_voters(&conn, &late, 0, 10).unwrap();
        let ids: Vec<_> = page.iter().map(|p| p.national_id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert_eq!(list_active_voters(&conn, &late, 1, 10).unwrap().len(), 1);
    }

    #[test]
    fn update_and_delete() {
        let conn = conn();
        let mut person = insert(&conn, &draft("101"), Utc::now()).unwrap();
        person.phone = "0331111111".into();
        person.father_name = Some("Rabe".into());
        assert_eq!(update(&conn, &person).unwrap(), 1);
        assert_eq!(find(&conn, person.person_id).unwrap(), Some(person.clone()));
        assert!(delete(&conn, person.person_id).unwrap());
        assert!(!delete(&conn, person.person_id).unwrap());
    }
}
