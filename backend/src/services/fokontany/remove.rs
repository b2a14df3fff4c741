use crate::auth::Caller;
use crate::db::{fokontany, Database};
use crate::error::ApiError;
use crate::services::parse_id;
use actix_web::{web, HttpResponse};
use log::info;
use serde_json::json;

/// Actix web handler for the `DELETE /api/fokontany/{id}` endpoint.
///
/// The fokontany's residents, and their taxes, are deleted with it.
///
/// # Returns
/// - `200 OK` with `{ message }`.
/// - `404 Not Found` when no fokontany has this id.
pub(crate) async fn process(
    caller: Caller,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    caller.require_admin("Forbidden: Only ADMIN can delete a fokontany")?;
    let fokontany_id = parse_id(&id)?;
    if !db.with_conn(|conn| Ok(fokontany::delete(conn, fokontany_id)?))? {
        return Err(ApiError::NotFound("Fokontany not found".into()));
    }
    info!("Fokontany {} and its residents deleted by user {}", fokontany_id, caller.user_id);
    Ok(HttpResponse::Ok().json(json!({
        "message": "Fokontany and all associated persons deleted"
    })))
}
