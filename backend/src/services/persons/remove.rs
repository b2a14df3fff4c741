//! `DELETE /api/persons/{id}`
//!
//! Removing a person also removes their taxes.

use crate::auth::Caller;
use crate::db::{persons, Database};
use crate::error::ApiError;
use crate::services::parse_id;
use actix_web::{web, HttpResponse};
use log::info;
use serde_json::json;

/// Actix web handler for the `DELETE /api/persons/{id}` endpoint.
///
/// # Returns
/// - `200 OK` with `{ message }` once the person is gone.
/// - `403 Forbidden` for non-admin callers.
/// - `404 Not Found` when no person has this id.
pub(crate) async fn process(
    caller: Caller,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    caller.require_admin("Forbidden: Only ADMIN can delete persons")?;
    let person_id = parse_id(&id)?;

    if !db.with_conn(|conn| Ok(persons::delete(conn, person_id)?))? {
        return Err(ApiError::NotFound("Person not found".into()));
    }
    info!("Person {} deleted by user {}", person_id, caller.user_id);
    Ok(HttpResponse::Ok().json(json!({ "message": "Person deleted" })))
}
