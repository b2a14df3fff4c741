pub mod fokontany;
pub mod persons;
pub mod taxes;
pub mod voters;

use crate::error::ApiError;

/// Parses a numeric id taken from the URL path.
pub(crate) fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::bad_request_with("Invalid id", "The id must be a number"))
}
