use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An administrative neighbourhood that persons may belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fokontany {
    pub fokontany_id: i64,
    /// Unique short code.
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub total_persons: i64,
}
