//! The electoral roll: active voters registered up to a given date.

use actix_web::web::{get, scope};
use actix_web::Scope;

mod list;

const API_PATH: &str = "/api/voters";

/// Configures and returns the Actix `Scope` for the electoral roll.
///
/// # Registered Routes:
///
/// *   **`GET /?dateLimite=&page=&limit=`**: `list::process`, one page of the roll.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(list::process))
}
