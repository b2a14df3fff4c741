use crate::auth::Caller;
use crate::db::{fokontany, Database};
use crate::error::ApiError;
use crate::services::fokontany::code_and_name;
use crate::services::parse_id;
use actix_web::{web, HttpResponse};
use common::requests::FokontanyRequest;

/// Actix web handler for the `PUT /api/fokontany/{id}` endpoint.
///
/// Replaces both the code and the name.
///
/// # Returns
/// - `200 OK` with the updated `Fokontany`.
/// - `400 Bad Request` when either field is missing.
/// - `404 Not Found` when no fokontany has this id.
/// - `409 Conflict` when the new code belongs to another fokontany.
pub(crate) async fn process(
    caller: Caller,
    db: web::Data<Database>,
    id: web::Path<String>,
    body: web::Json<FokontanyRequest>,
) -> Result<HttpResponse, ApiError> {
    caller.require_admin("Forbidden: Only ADMIN can update a fokontany")?;
    let fokontany_id = parse_id(&id)?;
    let (code, name) = code_and_name(&body)?;

    let updated = db.with_conn(|conn| {
        let changed = fokontany::update(conn, fokontany_id, &code, &name)
            .map_err(|e| ApiError::conflict_on_unique(e, "Fokontany code already exists"))?;
        if !changed {
            return Err(ApiError::NotFound("Fokontany not found".into()));
        }
        fokontany::find(conn, fokontany_id)?
            .ok_or_else(|| ApiError::NotFound("Fokontany not found".into()))
    })?;
    Ok(HttpResponse::Ok().json(updated))
}
