//! `POST /api/persons`
//!
//! The JSON body is turned into the same raw record a CSV row produces and
//! goes through `normalize::normalize_row`, so a single create accepts exactly
//! what an import accepts. Unlike the import, failures are returned as HTTP
//! errors instead of being collected.

use crate::auth::Caller;
use crate::db::{fokontany, persons, Database};
use crate::error::ApiError;
use crate::services::persons::normalize::{normalize_row, RowError};
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::model::import::ImportRow;
use common::requests::CreatePersonRequest;
use log::{info, warn};
use rusqlite::Connection;
use serde_json::json;

fn to_row(req: &CreatePersonRequest) -> ImportRow {
    let text_fields = [
        ("firstName", &req.first_name),
        ("lastName", &req.last_name),
        ("gender", &req.gender),
        ("birthDate", &req.birth_date),
        ("birthPlace", &req.birth_place),
        ("nationalId", &req.national_id),
        ("issueDate", &req.issue_date),
        ("issuePlace", &req.issue_place),
        ("profession", &req.profession),
        ("fatherName", &req.father_name),
        ("motherName", &req.mother_name),
        ("currentAddress", &req.current_address),
        ("previousAddress", &req.previous_address),
        ("nationality", &req.nationality),
        ("phone", &req.phone),
        ("maritalStatus", &req.marital_status),
        ("status", &req.status),
    ];
    let mut row: ImportRow = text_fields
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|v| (name.to_string(), v.clone())))
        .collect();
    if let Some(is_voter) = req.is_voter {
        row.insert("isVoter".into(), is_voter.to_string());
    }
    row
}

/// Fails with `NotFound` unless the fokontany exists.
pub(super) fn ensure_fokontany(conn: &Connection, fokontany_id: i64) -> Result<(), ApiError> {
    match fokontany::find(conn, fokontany_id)? {
        Some(_) => Ok(()),
        None => Err(ApiError::NotFound(format!("Fokontany {} not found", fokontany_id))),
    }
}

fn row_error(err: RowError) -> ApiError {
    match err {
        RowError::MissingFields(fields) => {
            ApiError::bad_request_with("Missing required fields", fields.join(", "))
        }
        RowError::Duplicate(_) => ApiError::Conflict("National ID already exists".into()),
        other => ApiError::bad_request(other.to_string()),
    }
}

/// Actix web handler for the `POST /api/persons` endpoint.
///
/// # Arguments
/// * `caller` - Must hold the admin role.
/// * `db` - The shared storage handle.
/// * `body` - The raw person fields, validated like an import row.
///
/// # Returns
/// - `201 Created` with `{ message, data }`, where `data` is the stored `Person`.
/// - `400 Bad Request` for missing fields, an invalid date or an unknown gender.
/// - `404 Not Found` when `fokontanyId` names no fokontany.
/// - `409 Conflict` when the national id is already registered.
pub(crate) async fn process(
    caller: Caller,
    db: web::Data<Database>,
    body: web::Json<CreatePersonRequest>,
) -> Result<HttpResponse, ApiError> {
    caller.require_admin("Forbidden: Only ADMIN can create persons")?;

    let normalized = normalize_row(&to_row(&body)).map_err(row_error)?;
    for sub in &normalized.substitutions {
        warn!("Create: unknown {} '{}' replaced by {}", sub.field, sub.value, sub.replacement);
    }
    let mut draft = normalized.draft;
    draft.fokontany_id = body.fokontany_id;

    let person = db.with_conn(|conn| {
        if let Some(fokontany_id) = draft.fokontany_id {
            ensure_fokontany(conn, fokontany_id)?;
        }
        if persons::find_by_national_id(conn, &draft.national_id)?.is_some() {
            return Err(row_error(RowError::Duplicate(draft.national_id.clone())));
        }
        persons::insert(conn, &draft, Utc::now())
            .map_err(|e| ApiError::conflict_on_unique(e, "National ID already exists"))
    })?;

    info!("Person {} created by user {}", person.person_id, caller.user_id);
    Ok(HttpResponse::Created().json(json!({ "message": "Person created", "data": person })))
}
