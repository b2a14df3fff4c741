//! `POST /api/taxes/{id}/pay`
//!
//! Adds a payment to a tax. Without a (positive) `paidAmount` the whole
//! outstanding balance is paid. The tax counts as paid once the paid total
//! reaches the amount; `paidAt` is stamped at that moment and otherwise left
//! as it was.

use crate::auth::Caller;
use crate::db::{taxes, Database};
use crate::error::ApiError;
use crate::services::parse_id;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use common::model::tax::Tax;
use common::requests::PayTaxRequest;
use log::info;

fn record_payment(tax: &mut Tax, payment: Option<f64>, now: DateTime<Utc>) -> Result<(), ApiError> {
    let payment = match payment {
        Some(p) if !p.is_finite() || p < 0.0 => {
            return Err(ApiError::bad_request("paidAmount must be a non-negative number"))
        }
        Some(p) if p > 0.0 => p,
        _ => tax.outstanding(),
    };
    tax.paid_amount += payment;
    tax.is_paid = tax.paid_amount >= tax.amount;
    if tax.is_paid {
        tax.paid_at = Some(now);
    }
    Ok(())
}

/// Actix web handler for the `POST /api/taxes/{id}/pay` endpoint.
///
/// # Arguments
/// * `caller` - Must hold the admin role.
/// * `id` - The tax id from the URL path.
/// * `body` - Optional `{ paidAmount }`; a missing body pays the balance.
///
/// # Returns
/// - `200 OK` with the updated `Tax`.
/// - `400 Bad Request` for a negative payment.
/// - `404 Not Found` when no tax has this id.
pub(crate) async fn process(
    caller: Caller,
    db: web::Data<Database>,
    id: web::Path<String>,
    body: Option<web::Json<PayTaxRequest>>,
) -> Result<HttpResponse, ApiError> {
    caller.require_admin("Forbidden: Only ADMIN can record payments")?;
    let tax_id = parse_id(&id)?;
    let payment = body.and_then(|b| b.paid_amount);

    let tax = db.with_conn(|conn| {
        let mut tax =
            taxes::find(conn, tax_id)?.ok_or_else(|| ApiError::NotFound("Tax not found".into()))?;
        record_payment(&mut tax, payment, Utc::now())?;
        taxes::update(conn, &tax)?;
        Ok(tax)
    })?;

    info!(
        "Payment on tax {} by user {}: {} of {} paid",
        tax.tax_id, caller.user_id, tax.paid_amount, tax.amount
    );
    Ok(HttpResponse::Ok().json(tax))
}
