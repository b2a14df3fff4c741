//! `GET /api/persons/{id}`

use crate::auth::Caller;
use crate::db::{persons, Database};
use crate::error::ApiError;
use crate::services::parse_id;
use actix_web::{web, HttpResponse};

/// Actix web handler for the `GET /api/persons/{id}` endpoint.
///
/// # Arguments
/// * `id` - The person id from the URL path.
///
/// # Returns
/// - `200 OK` with the `Person` as JSON.
/// - `400 Bad Request` when the id is not a number.
/// - `404 Not Found` when no person has this id.
pub(crate) async fn process(
    _caller: Caller,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let person_id = parse_id(&id)?;
    let person = db
        .with_conn(|conn| Ok(persons::find(conn, person_id)?))?
        .ok_or_else(|| ApiError::NotFound("Person not found".into()))?;
    Ok(HttpResponse::Ok().json(person))
}
