use crate::auth::Caller;
use crate::db::{taxes, Database};
use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use common::requests::TaxQuery;

/// Actix web handler for the `GET /api/taxes` endpoint.
///
/// # Arguments
/// * `query` - Optional `personId`, `year` and `isPaid` filters; each one given
///   must match.
///
/// # Returns
/// - `200 OK` with a JSON array of `Tax` records, latest year first.
pub(crate) async fn process(
    _caller: Caller,
    db: web::Data<Database>,
    query: web::Query<TaxQuery>,
) -> Result<HttpResponse, ApiError> {
    let found = db.with_conn(|conn| Ok(taxes::list(conn, &query)?))?;
    Ok(HttpResponse::Ok().json(found))
}
