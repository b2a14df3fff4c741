//! `GET /api/fokontany/{id}/persons`
//!
//! Residents of one fokontany, by id. An unknown fokontany is a 404; a known
//! one without residents gives an empty list.

use crate::auth::Caller;
use crate::db::{fokontany, persons, Database};
use crate::error::ApiError;
use crate::services::parse_id;
use actix_web::{web, HttpResponse};

/// Actix web handler for the `GET /api/fokontany/{id}/persons` endpoint.
///
/// # Returns
/// - `200 OK` with the residents as a JSON array, empty when there are none.
/// - `404 Not Found` when no fokontany has this id.
pub(crate) async fn process(
    _caller: Caller,
    db: web::Data<Database>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let fokontany_id = parse_id(&id)?;
    let residents = db.with_conn(|conn| {
        if fokontany::find(conn, fokontany_id)?.is_none() {
            return Err(ApiError::NotFound("Fokontany not found".into()));
        }
        Ok(persons::list_by_fokontany(conn, fokontany_id)?)
    })?;
    Ok(HttpResponse::Ok().json(residents))
}

#[cfg(test)]
mod tests {
    use crate::db::persons::tests::draft;
    use crate::db::{persons, Database};
    use crate::services::taxes::tests::seed_tax;
    use crate::services::test_support::{as_admin, as_user, seed_person, test_app};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use chrono::Utc;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn lifecycle_with_residents() {
        let db = Database::open_in_memory().unwrap();
        let app = test_app!(db);

        let req = as_admin(test::TestRequest::post().uri("/api/fokontany"))
            .set_json(json!({ "code": "FKT-01", "name": "Isotry" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        let id = created["fokontanyId"].as_i64().unwrap();
        assert_eq!(created["totalPersons"], 0);

        let req = as_admin(test::TestRequest::post().uri("/api/fokontany"))
            .set_json(json!({ "code": "FKT-01", "name": "Other" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let uri = format!("/api/fokontany/{}/persons", id);
        let req = as_user(test::TestRequest::get().uri(&uri), "1").to_request();
        let empty: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(empty, Value::Array(vec![]));

        let mut resident = draft("R1");
        resident.fokontany_id = Some(id);
        let resident = db
            .with_conn(|conn| Ok(persons::insert(conn, &resident, Utc::now())?))
            .unwrap();
        let outsider = seed_person(&db, "R2");
        seed_tax(&db, resident.person_id, 2024, 10.0, 0.0);

        let req = as_user(test::TestRequest::get().uri(&uri), "1").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["nationalId"], "R1");

        let req = as_user(test::TestRequest::get().uri("/api/fokontany"), "1").to_request();
        let all: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all[0]["totalPersons"], 1);

        let req = as_admin(test::TestRequest::put().uri(&format!("/api/fokontany/{}", id)))
            .set_json(json!({ "code": "FKT-02", "name": "Isotry Nord" }))
            .to_request();
        let renamed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(renamed["code"], "FKT-02");
        assert_eq!(renamed["totalPersons"], 1);

        let req = as_user(test::TestRequest::delete().uri(&format!("/api/fokontany/{}", id)), "1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = as_admin(test::TestRequest::delete().uri(&format!("/api/fokontany/{}", id))).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let remaining = db.with_conn(|conn| Ok(persons::list(conn)?)).unwrap();
        assert_eq!(remaining, vec![outsider]);

        let req = as_user(test::TestRequest::get().uri(&uri), "1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
        let req = as_user(test::TestRequest::get().uri(&format!("/api/fokontany/{}", id)), "1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_rules() {
        let db = Database::open_in_memory().unwrap();
        let app = test_app!(db);
        for code in ["A", "B"] {
            let req = as_admin(test::TestRequest::post().uri("/api/fokontany"))
                .set_json(json!({ "code": code, "name": code }))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = as_admin(test::TestRequest::put().uri("/api/fokontany/2"))
            .set_json(json!({ "code": "A", "name": "Clash" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

        let req = as_admin(test::TestRequest::put().uri("/api/fokontany/2"))
            .set_json(json!({ "code": "B" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = as_admin(test::TestRequest::put().uri("/api/fokontany/99"))
            .set_json(json!({ "code": "Z", "name": "Z" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
