use crate::error::ApiError;
use actix_multipart::Multipart;
use futures_util::StreamExt;
use md5::Context;

/// The name of the multipart part that carries the CSV file.
const FILE_FIELD: &str = "file";

/// A CSV file received from the client, fully buffered.
#[derive(Debug)]
pub struct CsvUpload {
    pub file_name: String,
    pub content: String,
    pub size: usize,
    /// Hex MD5 of the uploaded bytes, for the audit log.
    pub md5: String,
}

fn multipart_error(err: actix_multipart::MultipartError) -> ApiError {
    ApiError::bad_request_with("Invalid multipart body", err.to_string())
}

/// Reads the `file` part of a multipart upload.
///
/// - The file name must end with `.csv` (any case).
/// - The file may not exceed `max_bytes`.
/// - The content must be UTF-8.
///
/// Other parts, and any second `file` part, are read and discarded.
pub async fn read_csv_upload(mut payload: Multipart, max_bytes: usize) -> Result<CsvUpload, ApiError> {
    let mut upload: Option<CsvUpload> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(multipart_error)?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        if name.as_deref() != Some(FILE_FIELD) || upload.is_some() {
            while let Some(chunk) = field.next().await {
                chunk.map_err(multipart_error)?;
            }
            continue;
        }

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
            .unwrap_or_default();
        if !file_name.to_lowercase().ends_with(".csv") {
            return Err(ApiError::bad_request("File must be a CSV"));
        }

        let mut bytes: Vec<u8> = Vec::new();
        let mut md5_hasher = Context::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(multipart_error)?;
            if bytes.len() + chunk.len() > max_bytes {
                return Err(ApiError::PayloadTooLarge { limit: max_bytes });
            }
            md5_hasher.consume(&chunk);
            bytes.extend_from_slice(&chunk);
        }

        let size = bytes.len();
        let content =
            String::from_utf8(bytes).map_err(|_| ApiError::bad_request("CSV file must be UTF-8 text"))?;
        upload = Some(CsvUpload {
            file_name,
            content,
            size,
            md5: format!("{:x}", md5_hasher.finalize()),
        });
    }

    upload.ok_or_else(|| ApiError::bad_request("No file provided"))
}
