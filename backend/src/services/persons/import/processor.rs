//! The per-row import loop.
//!
//! Rows are handled strictly in file order, one at a time, and each row is
//! stored before the next one is looked at. A row's duplicate check therefore
//! sees every person created by earlier rows of the same file. A failing row
//! is recorded in the summary and never stops the loop.

use crate::db::{persons, Database};
use crate::error::ApiError;
use crate::services::persons::normalize::{normalize_row, RowError};
use chrono::Utc;
use common::model::import::{CreatedPerson, ImportRow, ImportSummary, RowFailure};
use common::model::person::{Person, PersonDraft};
use log::warn;

/// The storage operations the import needs.
pub trait PersonStore {
    fn find_by_national_id(&self, national_id: &str) -> Result<Option<Person>, ApiError>;

    /// Stores a person. A national id taken since the last lookup must come
    /// back as `ApiError::Conflict`.
    fn insert(&self, draft: &PersonDraft) -> Result<Person, ApiError>;
}

impl PersonStore for Database {
    fn find_by_national_id(&self, national_id: &str) -> Result<Option<Person>, ApiError> {
        self.with_conn(|conn| Ok(persons::find_by_national_id(conn, national_id)?))
    }

    fn insert(&self, draft: &PersonDraft) -> Result<Person, ApiError> {
        self.with_conn(|conn| {
            persons::insert(conn, draft, Utc::now()).map_err(|e| {
                ApiError::conflict_on_unique(e, format!("nationalId {} is taken", draft.national_id))
            })
        })
    }
}

/// Imports every row and reports what happened to each.
pub fn import_rows<S>(store: &S, rows: Vec<ImportRow>) -> ImportSummary
where
    S: PersonStore + ?Sized,
{
    let mut summary = ImportSummary {
        total: rows.len(),
        ..ImportSummary::default()
    };

    for (index, row) in rows.into_iter().enumerate() {
        // Line 1 of the file is the header.
        let line = index + 2;
        match import_row(store, &row, line) {
            Ok(person) => {
                summary.success += 1;
                summary.created.push(CreatedPerson {
                    id: person.person_id,
                    national_id: person.national_id.clone(),
                    name: person.display_name(),
                });
            }
            Err(err) => {
                warn!("Import line {} rejected: {}", line, err);
                summary.failed += 1;
                summary.errors.push(RowFailure {
                    row: line,
                    error: err.to_string(),
                    data: row,
                });
            }
        }
    }

    summary
}

fn import_row<S>(store: &S, row: &ImportRow, line: usize) -> Result<Person, RowError>
where
    S: PersonStore + ?Sized,
{
    let normalized = normalize_row(row)?;
    for sub in &normalized.substitutions {
        warn!(
            "Import line {}: unknown {} '{}' replaced by {}",
            line, sub.field, sub.value, sub.replacement
        );
    }
    let draft = normalized.draft;

    let existing = store
        .find_by_national_id(&draft.national_id)
        .map_err(|e| RowError::Storage(e.to_string()))?;
    if existing.is_some() {
        return Err(RowError::Duplicate(draft.national_id));
    }

    store.insert(&draft).map_err(|e| match e {
        ApiError::Conflict(_) => RowError::Duplicate(draft.national_id.clone()),
        other => RowError::Storage(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::persons::normalize::tests::valid_row;
    use std::cell::RefCell;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn valid_missing_and_duplicate_rows() {
        let db = db();
        let mut missing_phone = valid_row("202");
        missing_phone.remove("phone");
        let rows = vec![valid_row("101"), missing_phone, valid_row("101")];

        let summary = import_rows(&db, rows);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.success, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.total, summary.success + summary.failed);
        assert_eq!(summary.errors[0].row, 3);
        assert_eq!(summary.errors[0].error, "Missing required fields: phone");
        assert_eq!(summary.errors[1].row, 4);
        assert_eq!(summary.errors[1].error, "Person with nationalId 101 already exists");
        assert_eq!(summary.errors[1].data.get("nationalId").unwrap(), "101");
        assert_eq!(summary.created.len(), 1);
        assert_eq!(summary.created[0].national_id, "101");
        assert_eq!(summary.created[0].name, "Rakoto Jean");
    }

    #[test]
    fn existing_person_is_not_overwritten() {
        let db = db();
        let first = import_rows(&db, vec![valid_row("101")]);
        let mut changed = valid_row("101");
        changed.insert("firstName".into(), "Other".into());

        let second = import_rows(&db, vec![changed]);

        assert_eq!(second.failed, 1);
        assert_eq!(second.errors[0].row, 2);
        let stored = db
            .find_by_national_id("101")
            .unwrap()
            .unwrap();
        assert_eq!(stored.person_id, first.created[0].id);
        assert_eq!(stored.first_name, "Rakoto");
    }

    #[test]
    fn imported_values_are_the_normalized_ones() {
        let db = db();
        let mut row = valid_row("101");
        row.insert("gender".into(), "Femme".into());
        row.insert("maritalStatus".into(), "MARRIED".into());
        row.insert("isVoter".into(), "1".into());
        let summary = import_rows(&db, vec![row]);

        let stored = db
            .with_conn(|conn| Ok(persons::find(conn, summary.created[0].id)?))
            .unwrap()
            .unwrap();
        assert_eq!(stored.gender.as_str(), "F");
        assert_eq!(stored.marital_status.as_str(), "CELIBATAIRE");
        assert!(stored.is_voter);
        assert_eq!(stored.father_name, None);
    }

    /// Accepts lookups, fails every insert for one national id.
    struct FlakyStore {
        inner: Database,
        broken_id: &'static str,
        inserts: RefCell<usize>,
    }

    impl PersonStore for FlakyStore {
        fn find_by_national_id(&self, national_id: &str) -> Result<Option<Person>, ApiError> {
            self.inner.find_by_national_id(national_id)
        }

        fn insert(&self, draft: &PersonDraft) -> Result<Person, ApiError> {
            *self.inserts.borrow_mut() += 1;
            if draft.national_id == self.broken_id {
                return Err(ApiError::Internal("disk I/O error".into()));
            }
            self.inner.insert(draft)
        }
    }

    #[test]
    fn storage_failure_is_isolated_to_its_row() {
        let store = FlakyStore {
            inner: db(),
            broken_id: "2",
            inserts: RefCell::new(0),
        };
        let summary = import_rows(&store, vec![valid_row("1"), valid_row("2"), valid_row("3")]);

        assert_eq!(*store.inserts.borrow(), 3);
        assert_eq!(summary.success, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors[0].row, 3);
        assert_eq!(summary.errors[0].error, "Failed to store person: disk I/O error");
    }

    /// Lookups never see anything, as if a concurrent request won the race.
    struct RacingStore(Database);

    impl PersonStore for RacingStore {
        fn find_by_national_id(&self, _: &str) -> Result<Option<Person>, ApiError> {
            Ok(None)
        }

        fn insert(&self, draft: &PersonDraft) -> Result<Person, ApiError> {
            self.0.insert(draft)
        }
    }

    #[test]
    fn unique_constraint_catches_a_lost_race() {
        let store = RacingStore(db());
        let summary = import_rows(&store, vec![valid_row("7"), valid_row("7")]);
        assert_eq!(summary.success, 1);
        assert_eq!(summary.errors[0].error, "Person with nationalId 7 already exists");
    }
}
