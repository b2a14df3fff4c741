use crate::model::person::PersonRef;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The tax owed by one person for one year. A person has at most one tax per year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tax {
    pub tax_id: i64,
    pub person_id: i64,
    pub year: i32,
    pub amount: f64,
    pub paid_amount: f64,
    pub is_paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub person: PersonRef,
}

impl Tax {
    pub fn outstanding(&self) -> f64 {
        self.amount - self.paid_amount
    }
}
