//! `GET /api/voters`
//!
//! Persons flagged as voters, with residency status `ACTIF`, registered on or
//! before `dateLimite` (the whole day counts; today when omitted). Newest
//! registrations come first.

use crate::auth::Caller;
use crate::db::{persons, Database};
use crate::error::ApiError;
use crate::services::persons::normalize::parse_date;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Days, NaiveDate, Utc};
use common::model::stats::VoterPage;
use common::requests::VoterQuery;

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 500;

/// Validated pagination and cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RollRequest {
    page: u32,
    limit: u32,
    date_limite: NaiveDate,
}

impl RollRequest {
    fn from_query(query: &VoterQuery, today: NaiveDate) -> Result<Self, ApiError> {
        let date_limite = match query.date_limite.as_deref().map(str::trim) {
            None | Some("") => today,
            Some(raw) => parse_date(raw).ok_or_else(|| {
                ApiError::bad_request_with("Invalid date format", "dateLimite must be YYYY-MM-DD")
            })?,
        };
        let page = query.page.unwrap_or(1);
        if page == 0 {
            return Err(ApiError::bad_request("page must be at least 1"));
        }
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if limit == 0 || limit > MAX_PAGE_SIZE {
            return Err(ApiError::bad_request(format!(
                "limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }
        Ok(RollRequest {
            page,
            limit,
            date_limite,
        })
    }

    /// The last instant of the cutoff day.
    fn until(&self) -> Result<DateTime<Utc>, ApiError> {
        self.date_limite
            .checked_add_days(Days::new(1))
            .and_then(|next| next.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc() - chrono::Duration::microseconds(1))
            .ok_or_else(|| ApiError::bad_request("dateLimite is out of range"))
    }

    fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

/// Actix web handler for the `GET /api/voters` endpoint.
///
/// # Arguments
/// * `query` - `dateLimite` (defaults to today), `page` (from 1) and `limit`
///   (1 to 500, default 50).
///
/// # Returns
/// - `200 OK` with a `VoterPage`.
/// - `400 Bad Request` for a malformed date or out-of-range paging.
pub(crate) async fn process(
    _caller: Caller,
    db: web::Data<Database>,
    query: web::Query<VoterQuery>,
) -> Result<HttpResponse, ApiError> {
    let request = RollRequest::from_query(&query, Utc::now().date_naive())?;
    let until = request.until()?;

    let (total, data) = db.with_conn(|conn| {
        let total = persons::count_active_voters(conn, &until)?;
        let data = persons::list_active_voters(conn, &until, request.offset(), request.limit)?;
        Ok((total, data))
    })?;

    Ok(HttpResponse::Ok().json(VoterPage {
        success: true,
        page: request.page,
        limit: request.limit,
        total,
        total_pages: total.div_ceil(u64::from(request.limit)),
        date_limite: request.date_limite,
        data,
    }))
}
