use crate::auth::Caller;
use crate::db::{taxes, Database};
use crate::error::ApiError;
use crate::services::parse_id;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Actix web handler for the `DELETE /api/taxes/{id}` endpoint.
///
/// # Returns
/// - `200 OK` with `{ message }`.
/// - `404 Not Found` when no tax has this id.
pub(crate) async fn process(
    caller: Caller,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    caller.require_admin("Forbidden: Only ADMIN can delete taxes")?;
    let tax_id = parse_id(&id)?;
    if !db.with_conn(|conn| Ok(taxes::delete(conn, tax_id)?))? {
        return Err(ApiError::NotFound("Tax not found".into()));
    }
    Ok(HttpResponse::Ok().json(json!({ "message": "Tax deleted" })))
}
