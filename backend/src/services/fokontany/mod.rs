//! Fokontany (administrative neighbourhoods) and their residents.
//!
//! Deleting a fokontany deletes every person attached to it, and through them
//! their taxes.

use crate::error::ApiError;
use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;
use common::requests::FokontanyRequest;

mod create;
mod get;
mod list;
mod persons;
mod remove;
mod update;

const API_PATH: &str = "/api/fokontany";

/// Configures and returns the Actix `Scope` for the fokontany routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**, **`POST /`**: list and create.
/// *   **`GET|PUT|DELETE /{id}`**: read, rename or delete one fokontany.
/// *   **`GET /{id}/persons`**: `persons::process`, its residents.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", delete().to(remove::process))
        .route("/{id}/persons", get().to(persons::process))
}

/// Both `code` and `name` are required on create and on update.
fn code_and_name(req: &FokontanyRequest) -> Result<(String, String), ApiError> {
    let code = req.code.as_deref().map(str::trim).unwrap_or("");
    let name = req.name.as_deref().map(str::trim).unwrap_or("");
    if code.is_empty() || name.is_empty() {
        return Err(ApiError::bad_request("code and name are required"));
    }
    Ok((code.to_string(), name.to_string()))
}
