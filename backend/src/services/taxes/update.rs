//! `PATCH /api/taxes/{id}`
//!
//! Only the supplied fields change; the owner and the year are fixed once the
//! tax exists.

use crate::auth::Caller;
use crate::db::{taxes, Database};
use crate::error::ApiError;
use crate::services::parse_id;
use crate::services::taxes::create::check_amount;
use actix_web::{web, HttpResponse};
use common::model::tax::Tax;
use common::requests::UpdateTaxRequest;

fn apply(tax: &mut Tax, req: &UpdateTaxRequest) -> Result<(), ApiError> {
    if let Some(amount) = req.amount {
        tax.amount = check_amount(amount, "amount")?;
    }
    if let Some(paid) = req.paid_amount {
        tax.paid_amount = check_amount(paid, "paidAmount")?;
    }
    if let Some(is_paid) = req.is_paid {
        tax.is_paid = is_paid;
    }
    if req.paid_at.is_some() {
        tax.paid_at = req.paid_at;
    }
    if req.due_date.is_some() {
        tax.due_date = req.due_date;
    }
    if let Some(description) = &req.description {
        tax.description = Some(description.trim().to_string()).filter(|d| !d.is_empty());
    }
    Ok(())
}

/// Actix web handler for the `PATCH /api/taxes/{id}` endpoint.
///
/// # Arguments
/// * `caller` - Must hold the admin role.
/// * `id` - The tax id from the URL path.
/// * `body` - The fields to change.
///
/// # Returns
/// - `200 OK` with the updated `Tax`.
/// - `400 Bad Request` for negative amounts.
/// - `404 Not Found` when no tax has this id.
pub(crate) async fn process(
    caller: Caller,
    db: web::Data<Database>,
    id: web::Path<String>,
    body: web::Json<UpdateTaxRequest>,
) -> Result<HttpResponse, ApiError> {
    caller.require_admin("Forbidden: Only ADMIN can update taxes")?;
    let tax_id = parse_id(&id)?;

    let tax = db.with_conn(|conn| {
        let mut tax =
            taxes::find(conn, tax_id)?.ok_or_else(|| ApiError::NotFound("Tax not found".into()))?;
        apply(&mut tax, &body)?;
        taxes::update(conn, &tax)?;
        Ok(tax)
    })?;
    Ok(HttpResponse::Ok().json(tax))
}

#[cfg(test)]
mod tests {
    use crate::db::Database;
    use crate::services::taxes::tests::seed_tax;
    use crate::services::test_support::{as_admin, seed_person, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn patches_selected_fields() {
        let db = Database::open_in_memory().unwrap();
        let person = seed_person(&db, "T1");
        let tax = seed_tax(&db, person.person_id, 2024, 100.0, 0.0);
        let app = test_app!(db);
        let uri = format!("/api/taxes/{}", tax.tax_id);

        let req = as_admin(test::TestRequest::patch().uri(&uri))
            .set_json(json!({ "amount": 120.0, "description": "Market stall" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["amount"], 120.0);
        assert_eq!(body["description"], "Market stall");
        assert_eq!(body["year"], 2024);
        assert_eq!(body["paidAmount"], 0.0);

        let req = as_admin(test::TestRequest::patch().uri(&uri))
            .set_json(json!({ "paidAmount": -5.0 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = as_admin(test::TestRequest::patch().uri("/api/taxes/31337"))
            .set_json(json!({ "amount": 1.0 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
