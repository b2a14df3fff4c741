//! Yearly tax records owed by registered persons.
//!
//! A person has at most one tax per year. Reads are open to any identified
//! caller; every change requires the admin role.

use actix_web::web::{delete, get, patch, post, scope};
use actix_web::Scope;

mod create;
mod get;
mod list;
mod pay;
mod remove;
mod stats;
mod update;

const API_PATH: &str = "/api/taxes";

/// Configures and returns the Actix `Scope` for the tax routes.
///
/// # Registered Routes:
///
/// *   **`GET /?personId=&year=&isPaid=`**: `list::process`, latest year first.
/// *   **`POST /`**: `create::process`, answers `201`.
/// *   **`GET /stats`**: `stats::process`, amounts overall and per year.
/// *   **`GET|PATCH|DELETE /{id}`**: reads, partially updates or removes one tax.
/// *   **`POST /{id}/pay`**: `pay::process`, records a payment.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/stats", get().to(stats::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", patch().to(update::process))
        .route("/{id}", delete().to(remove::process))
        .route("/{id}/pay", post().to(pay::process))
}
