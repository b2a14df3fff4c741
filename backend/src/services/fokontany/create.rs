use crate::auth::Caller;
use crate::db::{fokontany, Database};
use crate::error::ApiError;
use crate::services::fokontany::code_and_name;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::requests::FokontanyRequest;
use log::info;

/// Actix web handler for the `POST /api/fokontany` endpoint.
///
/// # Arguments
/// * `caller` - Must hold the admin role.
/// * `body` - `{ code, name }`, both required.
///
/// # Returns
/// - `201 Created` with the new `Fokontany`.
/// - `400 Bad Request` when either field is missing.
/// - `409 Conflict` when the code is already used.
pub(crate) async fn process(
    caller: Caller,
    db: web::Data<Database>,
    body: web::Json<FokontanyRequest>,
) -> Result<HttpResponse, ApiError> {
    caller.require_admin("Forbidden: Only ADMIN can create a fokontany")?;
    let (code, name) = code_and_name(&body)?;

    let created = db.with_conn(|conn| {
        fokontany::insert(conn, &code, &name, Utc::now())
            .map_err(|e| ApiError::conflict_on_unique(e, "Fokontany code already exists"))
    })?;
    info!("Fokontany {} ({}) created by user {}", created.code, created.fokontany_id, caller.user_id);
    Ok(HttpResponse::Created().json(created))
}
