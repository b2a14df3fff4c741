use crate::auth::Caller;
use crate::db::{fokontany, Database};
use crate::error::ApiError;
use actix_web::{web, HttpResponse};

/// Actix web handler for the `GET /api/fokontany` endpoint.
///
/// # Returns
/// - `200 OK` with every `Fokontany`, each carrying its resident count.
pub(crate) async fn process(
    _caller: Caller,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let all = db.with_conn(|conn| Ok(fokontany::list(conn)?))?;
    Ok(HttpResponse::Ok().json(all))
}
