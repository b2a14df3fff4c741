use crate::error::ApiError;

/// Every column an import file must declare, in documentation order. Extra
/// columns are allowed and ignored.
pub const EXPECTED_HEADERS: [&str; 18] = [
    "firstName",
    "lastName",
    "gender",
    "birthDate",
    "birthPlace",
    "nationalId",
    "issueDate",
    "issuePlace",
    "profession",
    "fatherName",
    "motherName",
    "currentAddress",
    "previousAddress",
    "nationality",
    "phone",
    "maritalStatus",
    "status",
    "isVoter",
];

/// Rejects the file when any expected column is missing from `actual`.
pub fn check_headers(actual: &[String]) -> Result<(), ApiError> {
    let missing: Vec<String> = EXPECTED_HEADERS
        .iter()
        .filter(|expected| !actual.iter().any(|h| h == *expected))
        .map(|h| h.to_string())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }
    Err(ApiError::InvalidHeaders {
        missing,
        expected: EXPECTED_HEADERS.iter().map(|h| h.to_string()).collect(),
        actual: actual.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_headers() -> Vec<String> {
        EXPECTED_HEADERS.iter().map(|h| h.to_string()).collect()
    }

    #[test]
    fn any_order_and_extra_columns_pass() {
        let mut headers = all_headers();
        headers.reverse();
        headers.push("notes".to_string());
        assert!(check_headers(&headers).is_ok());
    }

    #[test]
    fn missing_columns_are_named() {
        let headers: Vec<String> = all_headers()
            .into_iter()
            .filter(|h| h != "phone" && h != "isVoter")
            .collect();
        match check_headers(&headers) {
            Err(ApiError::InvalidHeaders {
                missing,
                expected,
                actual,
            }) => {
                assert_eq!(missing, vec!["phone", "isVoter"]);
                assert_eq!(expected.len(), 18);
                assert_eq!(actual.len(), 16);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
