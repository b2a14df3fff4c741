use crate::auth::Caller;
use crate::db::{fokontany, Database};
use crate::error::ApiError;
use crate::services::parse_id;
use actix_web::{web, HttpResponse};

/// Actix web handler for the `GET /api/fokontany/{id}` endpoint.
///
/// # Returns
/// - `200 OK` with the `Fokontany`.
/// - `404 Not Found` when no fokontany has this id.
pub(crate) async fn process(
    _caller: Caller,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let fokontany_id = parse_id(&id)?;
    let found = db
        .with_conn(|conn| Ok(fokontany::find(conn, fokontany_id)?))?
        .ok_or_else(|| ApiError::NotFound("Fokontany not found".into()))?;
    Ok(HttpResponse::Ok().json(found))
}
