//! Bulk import of persons from an uploaded CSV file.
//!
//! `POST /api/persons/import` runs the stages below in order. The first three
//! stages reject the whole request; after them, every row stands alone.
//!
//! 1. **Gate** (`upload`): the caller must be an admin, and the multipart body
//!    must carry a `file` part whose name ends in `.csv`.
//! 2. **Decode** (`decode`): the file becomes a list of rows keyed by the header
//!    line. An unreadable file, or one without data rows, is rejected.
//! 3. **Header check** (`headers`): every expected column must be declared.
//! 4. **Rows** (`processor`): each row is validated, normalized, checked for an
//!    existing national id, and stored, in file order, on a blocking thread.
//!    Failures are collected per row.
//!
//! The response is `200 OK` with an `ImportResponse` whenever stage 4 ran, even
//! if every row failed.

pub mod decode;
pub mod headers;
pub mod processor;
pub mod upload;

use crate::auth::Caller;
use crate::config::Config;
use crate::db::Database;
use crate::error::ApiError;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use common::model::import::ImportResponse;
use log::info;

/// Actix web handler for the `POST /api/persons/import` endpoint.
///
/// Runs the stages described at the top of this module. The row loop runs on
/// a blocking thread.
///
/// # Arguments
/// * `caller` - Must hold the admin role.
/// * `db` - The shared storage handle, cloned into the blocking task.
/// * `config` - Supplies the upload size limit.
/// * `payload` - The multipart body carrying the `file` part.
///
/// # Returns
/// - `200 OK` with an `ImportResponse`, even when some rows failed.
/// - `400 Bad Request` when the file is missing, not a CSV, unreadable, empty or
///   lacks expected headers.
/// - `401 Unauthorized` / `403 Forbidden` for missing identity or role.
/// - `413 Payload Too Large` when the upload exceeds the limit.
pub(crate) async fn process(
    caller: Caller,
    db: web::Data<Database>,
    config: web::Data<Config>,
    payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    caller.require_admin("Forbidden: Only ADMIN can import persons")?;

    let upload = upload::read_csv_upload(payload, config.max_upload_bytes).await?;
    info!(
        "Import of '{}' ({} bytes, md5 {}) requested by user {}",
        upload.file_name, upload.size, upload.md5, caller.user_id
    );

    let decoded = decode::decode_csv(&upload.content)?;
    headers::check_headers(&decoded.headers)?;

    let store = db.get_ref().clone();
    let rows = decoded.rows;
    let summary = tokio::task::spawn_blocking(move || processor::import_rows(&store, rows))
        .await
        .map_err(|e| ApiError::Internal(format!("import task failed: {}", e)))?;

    info!(
        "Import of '{}' finished: {} rows, {} created, {} failed",
        upload.file_name, summary.total, summary.success, summary.failed
    );
    Ok(HttpResponse::Ok().json(ImportResponse::from(summary)))
}
