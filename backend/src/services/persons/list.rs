//! `GET /api/persons`
//!
//! Admins see the whole registry, ordered by id. Any other caller sees at most
//! one record: the person whose id equals their user id.

use crate::auth::Caller;
use crate::db::{persons, Database};
use crate::error::ApiError;
use actix_web::{web, HttpResponse};
use common::model::person::Person;

/// Actix web handler for the `GET /api/persons` endpoint.
///
/// Admins receive the whole registry ordered by id. Any other role receives
/// at most its own record, matched by parsing the caller's user id as a person id.
///
/// # Arguments
/// * `caller` - The identity supplied by the authentication layer.
/// * `db` - The shared storage handle.
///
/// # Returns
/// - `200 OK` with a JSON array of `Person` records (possibly empty).
/// - `401 Unauthorized` when the identity headers are missing.
pub(crate) async fn process(
    caller: Caller,
    db: web::Data<Database>,
) -> Result<HttpResponse, ApiError> {
    let visible: Vec<Person> = if caller.is_admin() {
        db.with_conn(|conn| Ok(persons::list(conn)?))?
    } else {
        match caller.user_id.parse::<i64>() {
            Ok(own_id) => db
                .with_conn(|conn| Ok(persons::find(conn, own_id)?))?
                .into_iter()
                .collect(),
            Err(_) => Vec::new(),
        }
    };
    Ok(HttpResponse::Ok().json(visible))
}

#[cfg(test)]
mod tests {
    use crate::db::Database;
    use crate::services::test_support::{as_admin, as_user, seed_person, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::Value;

    #[actix_web::test]
    async fn admin_sees_everyone_in_id_order() {
        let db = Database::open_in_memory().unwrap();
        let first = seed_person(&db, "A1");
        let second = seed_person(&db, "A2");
        let app = test_app!(db);

        let req = as_admin(test::TestRequest::get().uri("/api/persons")).to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["personId"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![first.person_id, second.person_id]);
    }

    #[actix_web::test]
    async fn other_roles_only_see_themselves() {
        let db = Database::open_in_memory().unwrap();
        seed_person(&db, "A1");
        let me = seed_person(&db, "A2");
        let app = test_app!(db);

        let req = as_user(test::TestRequest::get().uri("/api/persons"), &me.person_id.to_string())
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["nationalId"], "A2");

        let req = as_user(test::TestRequest::get().uri("/api/persons"), "not-a-number").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, Value::Array(vec![]));
    }

    #[actix_web::test]
    async fn identity_is_required() {
        let db = Database::open_in_memory().unwrap();
        let app = test_app!(db);
        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/persons").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
