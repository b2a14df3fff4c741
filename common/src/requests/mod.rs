//! JSON bodies and query strings accepted by the registry API.
//!
//! Person payloads carry raw text, exactly like a CSV import row, so that a
//! single-record create goes through the same validation and normalization
//! as a bulk import.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Request payload for `POST /api/persons`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePersonRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub national_id: Option<String>,
    pub issue_date: Option<String>,
    pub issue_place: Option<String>,
    pub profession: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub current_address: Option<String>,
    pub previous_address: Option<String>,
    pub nationality: Option<String>,
    pub phone: Option<String>,
    pub marital_status: Option<String>,
    pub status: Option<String>,
    pub is_voter: Option<bool>,
    pub fokontany_id: Option<i64>,
}

/// Request payload for `PUT /api/persons/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePersonRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<String>,
    pub birth_place: Option<String>,
    pub national_id: Option<String>,
    pub issue_date: Option<String>,
    pub issue_place: Option<String>,
    pub profession: Option<String>,
    /// An empty string clears the value.
    pub father_name: Option<String>,
    /// An empty string clears the value.
    pub mother_name: Option<String>,
    pub current_address: Option<String>,
    pub previous_address: Option<String>,
    pub nationality: Option<String>,
    pub phone: Option<String>,
    pub marital_status: Option<String>,
    pub status: Option<String>,
    pub is_voter: Option<bool>,
    pub fokontany_id: Option<i64>,
}

/// Request payload for creating or renaming a fokontany.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FokontanyRequest {
    pub code: Option<String>,
    pub name: Option<String>,
}

/// Request payload for `POST /api/taxes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaxRequest {
    pub person_id: Option<i64>,
    pub year: Option<i32>,
    pub amount: Option<f64>,
    pub paid_amount: Option<f64>,
    pub is_paid: Option<bool>,
    pub paid_at: Option<DateTime<Utc>>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Request payload for `PATCH /api/taxes/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaxRequest {
    pub amount: Option<f64>,
    pub paid_amount: Option<f64>,
    pub is_paid: Option<bool>,
    pub paid_at: Option<DateTime<Utc>>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
}

/// Request payload for `POST /api/taxes/{id}/pay`. Without an amount the
/// whole outstanding balance is paid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayTaxRequest {
    pub paid_amount: Option<f64>,
}

/// Query string of `GET /api/taxes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxQuery {
    pub person_id: Option<i64>,
    pub year: Option<i32>,
    pub is_paid: Option<bool>,
}

/// Query string of `GET /api/voters`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterQuery {
    pub date_limite: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
