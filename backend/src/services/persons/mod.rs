//! Person registry endpoints.
//!
//! Every route requires a caller identity (see `auth`); the mutating ones
//! additionally require the admin role.
//!
//! - `GET /api/persons`: admins get every person, other callers only the
//!   person whose id equals their user id.
//! - `POST /api/persons`: creates one person from JSON, with the same
//!   validation and normalization as a CSV import row.
//! - `POST /api/persons/import`: bulk import from a CSV upload (see `import`).
//! - `GET /api/persons/stats`: dashboard counts over the whole registry.
//! - `GET|PUT|DELETE /api/persons/{id}`: single-record lookup, partial update
//!   and removal.

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

mod create;
mod get;
pub mod import;
mod list;
pub mod normalize;
mod remove;
mod stats;
mod update;

const API_PATH: &str = "/api/persons";

/// Configures and returns the Actix `Scope` for the person routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**: `list::process`, the registry as visible to the caller.
/// *   **`POST /`**: `create::process`, one person from JSON.
/// *   **`POST /import`**: `import::process`, bulk import from a CSV upload.
/// *   **`GET /stats`**: `stats::process`, dashboard counts.
/// *   **`GET /{id}`**, **`PUT /{id}`**, **`DELETE /{id}`**: `get`, `update` and
///     `remove`.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/import", post().to(import::process))
        .route("/stats", get().to(stats::process))
        .route("/{id}", get().to(get::process))
        .route("/{id}", put().to(update::process))
        .route("/{id}", delete().to(remove::process))
}
