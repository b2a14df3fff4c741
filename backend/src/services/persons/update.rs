//! `PUT /api/persons/{id}`
//!
//! Partial update: only the fields present in the body change. Values are
//! checked strictly here; an unknown gender or status label is a 400 rather
//! than a silent fallback, since the caller is editing one record by hand.

use crate::auth::Caller;
use crate::db::{persons, Database};
use crate::error::ApiError;
use crate::services::parse_id;
use crate::services::persons::create::ensure_fokontany;
use crate::services::persons::normalize::parse_date;
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use common::model::person::{Gender, MaritalStatus, Person, ResidencyStatus};
use common::requests::UpdatePersonRequest;
use log::info;
use serde_json::json;

fn set_text(target: &mut String, value: &Option<String>, name: &str) -> Result<(), ApiError> {
    if let Some(value) = value {
        let value = value.trim();
        if value.is_empty() {
            return Err(ApiError::bad_request(format!("{} cannot be empty", name)));
        }
        *target = value.to_string();
    }
    Ok(())
}

fn set_optional_text(target: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        let value = value.trim();
        *target = (!value.is_empty()).then(|| value.to_string());
    }
}

fn set_date(target: &mut NaiveDate, value: &Option<String>, name: &str) -> Result<(), ApiError> {
    if let Some(raw) = value {
        *target = parse_date(raw)
            .ok_or_else(|| ApiError::bad_request(format!("Invalid date format for {}", name)))?;
    }
    Ok(())
}

/// Applies every supplied field of `req` to `person`.
fn apply(person: &mut Person, req: &UpdatePersonRequest) -> Result<(), ApiError> {
    set_text(&mut person.first_name, &req.first_name, "firstName")?;
    set_text(&mut person.last_name, &req.last_name, "lastName")?;
    set_text(&mut person.birth_place, &req.birth_place, "birthPlace")?;
    set_text(&mut person.national_id, &req.national_id, "nationalId")?;
    set_text(&mut person.issue_place, &req.issue_place, "issuePlace")?;
    set_text(&mut person.profession, &req.profession, "profession")?;
    set_text(&mut person.current_address, &req.current_address, "currentAddress")?;
    set_text(&mut person.previous_address, &req.previous_address, "previousAddress")?;
    set_text(&mut person.nationality, &req.nationality, "nationality")?;
    set_text(&mut person.phone, &req.phone, "phone")?;
    set_optional_text(&mut person.father_name, &req.father_name);
    set_optional_text(&mut person.mother_name, &req.mother_name);
    set_date(&mut person.birth_date, &req.birth_date, "birthDate")?;
    set_date(&mut person.issue_date, &req.issue_date, "issueDate")?;

    if let Some(label) = &req.gender {
        person.gender = Gender::from_label(label.trim())
            .ok_or_else(|| ApiError::bad_request("Gender must be M/F/Male/Female/Homme/Femme"))?;
    }
    if let Some(label) = &req.marital_status {
        person.marital_status = MaritalStatus::from_label(label.trim()).ok_or_else(|| {
            ApiError::bad_request("maritalStatus must be CELIBATAIRE, MARIE, DIVORCE or VEUF")
        })?;
    }
    if let Some(label) = &req.status {
        person.status = ResidencyStatus::from_label(label.trim()).ok_or_else(|| {
            ApiError::bad_request("status must be ACTIF, DEMENAGER or DECEDE")
        })?;
    }
    if let Some(is_voter) = req.is_voter {
        person.is_voter = is_voter;
    }
    if req.fokontany_id.is_some() {
        person.fokontany_id = req.fokontany_id;
    }
    Ok(())
}

/// Actix web handler for the `PUT /api/persons/{id}` endpoint.
///
/// # Arguments
/// * `caller` - Must hold the admin role.
/// * `id` - The person id from the URL path.
/// * `body` - The fields to change; absent fields are kept.
///
/// # Returns
/// - `200 OK` with `{ message, data }` holding the updated `Person`.
/// - `400 Bad Request` for an empty required field or an invalid value.
/// - `404 Not Found` for an unknown person or fokontany.
/// - `409 Conflict` when the new national id belongs to another person.
pub(crate) async fn process(
    caller: Caller,
    db: web::Data<Database>,
    id: web::Path<String>,
    body: web::Json<UpdatePersonRequest>,
) -> Result<HttpResponse, ApiError> {
    caller.require_admin("Forbidden: Only ADMIN can update persons")?;
    let person_id = parse_id(&id)?;

    let updated = db.with_conn(|conn| {
        let mut person = persons::find(conn, person_id)?
            .ok_or_else(|| ApiError::NotFound("Person not found".into()))?;
        let previous_national_id = person.national_id.clone();
        apply(&mut person, &body)?;

        if person.national_id != previous_national_id
            && persons::find_by_national_id(conn, &person.national_id)?.is_some()
        {
            return Err(ApiError::Conflict(
                "National ID already used by another person".into(),
            ));
        }
        if let Some(fokontany_id) = body.fokontany_id {
            ensure_fokontany(conn, fokontany_id)?;
        }

        persons::update(conn, &person).map_err(|e| {
            ApiError::conflict_on_unique(e, "National ID already used by another person")
        })?;
        Ok(person)
    })?;

    info!("Person {} updated by user {}", person_id, caller.user_id);
    Ok(HttpResponse::Ok().json(json!({ "message": "Person updated", "data": updated })))
}

#[cfg(test)]
mod tests {
    use crate::db::{persons, Database};
    use crate::services::test_support::{as_admin, seed_person, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn only_supplied_fields_change() {
        let db = Database::open_in_memory().unwrap();
        let person = seed_person(&db, "U1");
        let app = test_app!(db);

        let req = as_admin(test::TestRequest::put().uri(&format!("/api/persons/{}", person.person_id)))
            .set_json(json!({ "phone": "0389999999", "status": "demenager", "motherName": "" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Person updated");
        assert_eq!(body["data"]["phone"], "0389999999");
        assert_eq!(body["data"]["status"], "DEMENAGER");
        assert_eq!(body["data"]["motherName"], Value::Null);
        assert_eq!(body["data"]["firstName"], "Rakoto");

        let stored = db
            .with_conn(|conn| Ok(persons::find(conn, person.person_id)?))
            .unwrap()
            .unwrap();
        assert_eq!(stored.phone, "0389999999");
        assert_eq!(stored.created_at, person.created_at);
    }

    #[actix_web::test]
    async fn taken_national_id_conflicts() {
        let db = Database::open_in_memory().unwrap();
        seed_person(&db, "U1");
        let other = seed_person(&db, "U2");
        let app = test_app!(db);

        let uri = format!("/api/persons/{}", other.person_id);
        let req = as_admin(test::TestRequest::put().uri(&uri))
            .set_json(json!({ "nationalId": "U1" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        // Keeping one's own national id is not a conflict.
        let req = as_admin(test::TestRequest::put().uri(&uri))
            .set_json(json!({ "nationalId": "U2" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn invalid_values_and_unknown_ids() {
        let db = Database::open_in_memory().unwrap();
        let person = seed_person(&db, "U1");
        let app = test_app!(db);
        let uri = format!("/api/persons/{}", person.person_id);

        for patch in [
            json!({ "gender": "unknown" }),
            json!({ "birthDate": "14 March" }),
            json!({ "maritalStatus": "MARRIED" }),
            json!({ "firstName": "  " }),
        ] {
            let req = as_admin(test::TestRequest::put().uri(&uri)).set_json(patch).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
        }

        let req = as_admin(test::TestRequest::put().uri("/api/persons/777"))
            .set_json(json!({ "phone": "1" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
