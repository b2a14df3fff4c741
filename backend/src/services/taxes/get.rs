use crate::auth::Caller;
use crate::db::{taxes, Database};
use crate::error::ApiError;
use crate::services::parse_id;
use actix_web::{web, HttpResponse};

/// Actix web handler for the `GET /api/taxes/{id}` endpoint.
///
/// # Returns
/// - `200 OK` with the `Tax`, including its owner's name.
/// - `404 Not Found` when no tax has this id.
pub(crate) async fn process(
    _caller: Caller,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let tax_id = parse_id(&id)?;
    let tax = db
        .with_conn(|conn| Ok(taxes::find(conn, tax_id)?))?
        .ok_or_else(|| ApiError::NotFound("Tax not found".into()))?;
    Ok(HttpResponse::Ok().json(tax))
}
