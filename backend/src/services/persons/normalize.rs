//! Validation and normalization of one raw person record.
//!
//! A raw record is a map of field name to text, as read from a CSV data row
//! (or converted from a JSON create request). `normalize_row` checks the
//! required fields, the two dates and the gender label, and resolves the
//! enumerations, producing a `PersonDraft` ready to be stored.
//!
//! Unknown marital or residency status labels are not errors: they are
//! replaced by the enumeration default and reported back as `Substitution`s,
//! which callers only log.

use chrono::{DateTime, NaiveDate};
use common::model::import::ImportRow;
use common::model::person::{Gender, MaritalStatus, PersonDraft, ResidencyStatus};
use thiserror::Error;

/// Fields that must be present and non-empty in every record. Narrower than
/// the CSV header set: parents' names, statuses and the voter flag may be blank.
pub const REQUIRED_FIELDS: [&str; 13] = [
    "firstName",
    "lastName",
    "gender",
    "birthDate",
    "birthPlace",
    "nationalId",
    "issueDate",
    "issuePlace",
    "profession",
    "currentAddress",
    "previousAddress",
    "nationality",
    "phone",
];

/// Why a single record was rejected. The display text is what the import
/// summary reports for the row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("Invalid date format for birthDate or issueDate")]
    InvalidDate,
    #[error("Gender must be M/F/Male/Female/Homme/Femme")]
    InvalidGender,
    #[error("Person with nationalId {0} already exists")]
    Duplicate(String),
    #[error("Failed to store person: {0}")]
    Storage(String),
}

/// An unrecognized enumeration label that was replaced by the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub field: &'static str,
    pub value: String,
    pub replacement: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub draft: PersonDraft,
    pub substitutions: Vec<Substitution>,
}

fn field<'a>(row: &'a ImportRow, name: &str) -> &'a str {
    row.get(name).map(|v| v.trim()).unwrap_or("")
}

fn optional_field(row: &ImportRow, name: &str) -> Option<String> {
    Some(field(row, name))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` and RFC 3339 timestamps (date part kept).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// `"true"` (any case) and `"1"` mean true; anything else, or nothing, is false.
pub fn parse_voter_flag(raw: Option<&str>) -> bool {
    match raw.map(str::trim) {
        Some(v) => v.eq_ignore_ascii_case("true") || v == "1",
        None => false,
    }
}

/// Resolves an optional enumeration label, falling back to the default when
/// the label is blank or unknown. Only unknown, non-blank labels are reported.
fn resolve_or_default<T>(
    row: &ImportRow,
    name: &'static str,
    from_label: fn(&str) -> Option<T>,
    as_str: fn(&T) -> &'static str,
    substitutions: &mut Vec<Substitution>,
) -> T
where
    T: Default,
{
    let raw = field(row, name);
    if raw.is_empty() {
        return T::default();
    }
    match from_label(raw) {
        Some(value) => value,
        None => {
            let fallback = T::default();
            substitutions.push(Substitution {
                field: name,
                value: raw.to_string(),
                replacement: as_str(&fallback),
            });
            fallback
        }
    }
}

pub fn normalize_row(row: &ImportRow) -> Result<NormalizedRow, RowError> {
    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|name| field(row, name).is_empty())
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(RowError::MissingFields(missing));
    }

    let (birth_date, issue_date) =
        match (parse_date(field(row, "birthDate")), parse_date(field(row, "issueDate"))) {
            (Some(birth), Some(issue)) => (birth, issue),
            _ => return Err(RowError::InvalidDate),
        };

    let gender = Gender::from_label(field(row, "gender")).ok_or(RowError::InvalidGender)?;

    let mut substitutions = Vec::new();
    let marital_status = resolve_or_default(
        row,
        "maritalStatus",
        MaritalStatus::from_label,
        MaritalStatus::as_str,
        &mut substitutions,
    );
    let status = resolve_or_default(
        row,
        "status",
        ResidencyStatus::from_label,
        ResidencyStatus::as_str,
        &mut substitutions,
    );

    let draft = PersonDraft {
        first_name: field(row, "firstName").to_string(),
        last_name: field(row, "lastName").to_string(),
        gender,
        birth_date,
        birth_place: field(row, "birthPlace").to_string(),
        national_id: field(row, "nationalId").to_string(),
        issue_date,
        issue_place: field(row, "issuePlace").to_string(),
        profession: field(row, "profession").to_string(),
        father_name: optional_field(row, "fatherName"),
        mother_name: optional_field(row, "motherName"),
        current_address: field(row, "currentAddress").to_string(),
        previous_address: field(row, "previousAddress").to_string(),
        nationality: field(row, "nationality").to_string(),
        phone: field(row, "phone").to_string(),
        marital_status,
        status,
        is_voter: parse_voter_flag(row.get("isVoter").map(String::as_str)),
        fokontany_id: None,
    };

    Ok(NormalizedRow {
        draft,
        substitutions,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A complete, valid row; tests override single fields.
    pub(crate) fn valid_row(national_id: &str) -> ImportRow {
        [
            ("firstName", "Rakoto"),
            ("lastName", "Jean"),
            ("gender", "Homme"),
            ("birthDate", "1990-03-14"),
            ("birthPlace", "Antsirabe"),
            ("nationalId", national_id),
            ("issueDate", "2010-06-01"),
            ("issuePlace", "Antananarivo"),
            ("profession", "Farmer"),
            ("fatherName", ""),
            ("motherName", "Rasoa"),
            ("currentAddress", "Lot II A 12"),
            ("previousAddress", "Lot IV B 3"),
            ("nationality", "Malagasy"),
            ("phone", "0340000000"),
            ("maritalStatus", "marie"),
            ("status", "ACTIF"),
            ("isVoter", "TRUE"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn with(mut row: ImportRow, name: &str, value: &str) -> ImportRow {
        row.insert(name.to_string(), value.to_string());
        row
    }

    #[test]
    fn valid_row_is_normalized() {
        let normalized = normalize_row(&valid_row("101")).unwrap();
        let draft = normalized.draft;
        assert_eq!(draft.gender, Gender::M);
        assert_eq!(draft.marital_status, MaritalStatus::Marie);
        assert_eq!(draft.status, ResidencyStatus::Actif);
        assert_eq!(draft.father_name, None);
        assert_eq!(draft.mother_name.as_deref(), Some("Rasoa"));
        assert!(draft.is_voter);
        assert_eq!(draft.birth_date, NaiveDate::from_ymd_opt(1990, 3, 14).unwrap());
        assert!(normalized.substitutions.is_empty());
    }

    #[test]
    fn missing_fields_are_listed_in_order() {
        let mut row = valid_row("101");
        row.remove("phone");
        let row = with(row, "firstName", "   ");
        assert_eq!(
            normalize_row(&row).unwrap_err(),
            RowError::MissingFields(vec!["firstName".into(), "phone".into()])
        );
        assert_eq!(
            RowError::MissingFields(vec!["phone".into()]).to_string(),
            "Missing required fields: phone"
        );
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let mut row = valid_row("101");
        for name in ["fatherName", "motherName", "maritalStatus", "status", "isVoter"] {
            row.remove(name);
        }
        let draft = normalize_row(&row).unwrap().draft;
        assert_eq!(draft.mother_name, None);
        assert_eq!(draft.marital_status, MaritalStatus::Celibataire);
        assert_eq!(draft.status, ResidencyStatus::Actif);
        assert!(!draft.is_voter);
    }

    #[test]
    fn unparseable_dates_fail() {
        let row = with(valid_row("101"), "issueDate", "31/02/2010");
        assert_eq!(normalize_row(&row).unwrap_err(), RowError::InvalidDate);
        let row = with(valid_row("101"), "birthDate", "2001-02-30");
        assert_eq!(normalize_row(&row).unwrap_err(), RowError::InvalidDate);
    }

    #[test]
    fn accepted_date_shapes() {
        let expected = NaiveDate::from_ymd_opt(2010, 6, 1);
        assert_eq!(parse_date("2010-06-01"), expected);
        assert_eq!(parse_date("2010/06/01"), expected);
        assert_eq!(parse_date("2010-06-01T10:30:00Z"), expected);
        assert_eq!(parse_date("June 1st"), None);
    }

    #[test]
    fn gender_vocabulary() {
        for (label, expected) in [
            ("M", Gender::M),
            ("Male", Gender::M),
            ("Homme", Gender::M),
            ("F", Gender::F),
            ("Female", Gender::F),
            ("Femme", Gender::F),
        ] {
            let row = with(valid_row("101"), "gender", label);
            assert_eq!(normalize_row(&row).unwrap().draft.gender, expected);
        }
        for label in ["male", "X", "femme"] {
            let row = with(valid_row("101"), "gender", label);
            assert_eq!(normalize_row(&row).unwrap_err(), RowError::InvalidGender);
        }
    }

    #[test]
    fn unknown_statuses_fall_back_and_are_reported() {
        let row = with(valid_row("101"), "maritalStatus", "MARRIED");
        let row = with(row, "status", "moved");
        let normalized = normalize_row(&row).unwrap();
        assert_eq!(normalized.draft.marital_status, MaritalStatus::Celibataire);
        assert_eq!(normalized.draft.status, ResidencyStatus::Actif);
        assert_eq!(
            normalized.substitutions,
            vec![
                Substitution {
                    field: "maritalStatus",
                    value: "MARRIED".into(),
                    replacement: "CELIBATAIRE",
                },
                Substitution {
                    field: "status",
                    value: "moved".into(),
                    replacement: "ACTIF",
                },
            ]
        );
    }

    #[test]
    fn voter_flag_values() {
        for raw in ["true", "TRUE", "True", "1"] {
            assert!(parse_voter_flag(Some(raw)), "{raw}");
        }
        for raw in ["false", "", "0", "yes"] {
            assert!(!parse_voter_flag(Some(raw)), "{raw}");
        }
        assert!(!parse_voter_flag(None));
    }
}
