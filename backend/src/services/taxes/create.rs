//! `POST /api/taxes`

use crate::auth::Caller;
use crate::db::taxes::{self, NewTax};
use crate::db::{persons, Database};
use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::requests::CreateTaxRequest;
use log::info;

/// Amounts must be finite and not negative.
pub(super) fn check_amount(value: f64, name: &str) -> Result<f64, ApiError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ApiError::bad_request(format!("{} must be a non-negative number", name)))
    }
}

fn new_tax(req: &CreateTaxRequest) -> Result<NewTax, ApiError> {
    let (person_id, year, amount) = match (req.person_id, req.year, req.amount) {
        (Some(person_id), Some(year), Some(amount)) => (person_id, year, amount),
        _ => return Err(ApiError::bad_request("personId, year and amount are required")),
    };
    Ok(NewTax {
        person_id,
        year,
        amount: check_amount(amount, "amount")?,
        paid_amount: check_amount(req.paid_amount.unwrap_or(0.0), "paidAmount")?,
        is_paid: req.is_paid.unwrap_or(false),
        paid_at: req.paid_at,
        due_date: req.due_date,
        description: req.description.clone().filter(|d| !d.trim().is_empty()),
    })
}

/// Actix web handler for the `POST /api/taxes` endpoint.
///
/// # Arguments
/// * `caller` - Must hold the admin role.
/// * `body` - `personId`, `year` and `amount` are required; the rest is optional.
///
/// # Returns
/// - `201 Created` with the stored `Tax`.
/// - `400 Bad Request` for missing or negative values.
/// - `404 Not Found` when the person does not exist.
/// - `409 Conflict` when the person already has a tax for that year.
pub(crate) async fn process(
    caller: Caller,
    db: web::Data<Database>,
    body: web::Json<CreateTaxRequest>,
) -> Result<HttpResponse, ApiError> {
    caller.require_admin("Forbidden: Only ADMIN can create taxes")?;
    let new = new_tax(&body)?;

    let tax = db.with_conn(|conn| {
        if persons::find(conn, new.person_id)?.is_none() {
            return Err(ApiError::NotFound("Person not found".into()));
        }
        taxes::insert(conn, &new, Utc::now()).map_err(|e| {
            ApiError::conflict_on_unique(e, "A tax already exists for this person and year")
        })
    })?;

    info!(
        "Tax {} ({} for person {}) created by user {}",
        tax.tax_id, tax.year, tax.person_id, caller.user_id
    );
    Ok(HttpResponse::Created().json(tax))
}
