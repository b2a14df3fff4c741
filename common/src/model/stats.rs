//! Dashboard aggregates computed by the backend over whole tables.

use crate::model::person::Person;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearTaxStats {
    pub year: i32,
    pub total: f64,
    pub paid: f64,
    pub unpaid: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxStats {
    pub total_taxes: usize,
    pub total_amount: f64,
    pub total_paid: f64,
    pub total_unpaid: f64,
    pub paid_count: usize,
    pub unpaid_count: usize,
    /// Most recent year first.
    pub by_year: Vec<YearTaxStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenderCounts {
    pub male: usize,
    pub female: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub actif: usize,
    pub demenager: usize,
    pub decede: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NationalityCount {
    pub nationality: String,
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonStats {
    pub total_persons: usize,
    pub total_voters: usize,
    pub total_non_voters: usize,
    pub by_gender: GenderCounts,
    pub by_status: StatusCounts,
    pub top_nationalities: Vec<NationalityCount>,
    pub recent_registrations: usize,
}

/// One page of the active electoral roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterPage {
    pub success: bool,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub date_limite: NaiveDate,
    pub data: Vec<Person>,
}
