use crate::error::ApiError;
use common::model::import::ImportRow;

/// The header line and the data rows of an uploaded CSV file.
#[derive(Debug)]
pub struct DecodedCsv {
    pub headers: Vec<String>,
    pub rows: Vec<ImportRow>,
}

/// Decodes the whole file, using the first line as field names.
///
/// Cells are trimmed and blank lines skipped; a line holding only whitespace
/// counts as blank. Decoding is all-or-nothing: a malformed quote or a row
/// with the wrong number of cells rejects the file. A file without data rows
/// is rejected as empty.
pub fn decode_csv(content: &str) -> Result<DecodedCsv, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(invalid_csv)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(invalid_csv)?;
        // Only whitespace on the line: trimmed down to one empty cell.
        if record.len() == 1 && record.get(0) == Some("") {
            continue;
        }
        if record.len() != headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or_default();
            return Err(ApiError::bad_request_with(
                "Invalid CSV content",
                format!(
                    "line {}: found {} fields, expected {}",
                    line,
                    record.len(),
                    headers.len()
                ),
            ));
        }
        let row: ImportRow = headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect();
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ApiError::bad_request("CSV file is empty"));
    }

    Ok(DecodedCsv { headers, rows })
}

fn invalid_csv(err: csv::Error) -> ApiError {
    ApiError::bad_request_with("Invalid CSV content", err.to_string())
}
