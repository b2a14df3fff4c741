use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical gender code stored for every person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    /// Every label accepted on input, in both languages.
    pub const LABELS: [&'static str; 6] = ["M", "F", "Male", "Female", "Homme", "Femme"];

    /// Resolves an input label. Matching is case-sensitive: `"m"` is rejected.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "M" | "Male" | "Homme" => Some(Gender::M),
            "F" | "Female" | "Femme" => Some(Gender::F),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

/// Marital status. Unknown input labels fall back to `Celibataire`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaritalStatus {
    #[default]
    Celibataire,
    Marie,
    Divorce,
    Veuf,
}

impl MaritalStatus {
    /// Case-insensitive lookup of a label such as `"marie"` or `"VEUF"`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "CELIBATAIRE" => Some(MaritalStatus::Celibataire),
            "MARIE" => Some(MaritalStatus::Marie),
            "DIVORCE" => Some(MaritalStatus::Divorce),
            "VEUF" => Some(MaritalStatus::Veuf),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MaritalStatus::Celibataire => "CELIBATAIRE",
            MaritalStatus::Marie => "MARIE",
            MaritalStatus::Divorce => "DIVORCE",
            MaritalStatus::Veuf => "VEUF",
        }
    }
}

/// Residency status of a person in their fokontany. Unknown input labels fall
/// back to `Actif`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResidencyStatus {
    #[default]
    Actif,
    Demenager,
    Decede,
}

impl ResidencyStatus {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_uppercase().as_str() {
            "ACTIF" => Some(ResidencyStatus::Actif),
            "DEMENAGER" => Some(ResidencyStatus::Demenager),
            "DECEDE" => Some(ResidencyStatus::Decede),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResidencyStatus::Actif => "ACTIF",
            ResidencyStatus::Demenager => "DEMENAGER",
            ResidencyStatus::Decede => "DECEDE",
        }
    }
}

/// Error returned when a stored code does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCode(pub String);

impl fmt::Display for UnknownCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown code '{}'", self.0)
    }
}

impl std::error::Error for UnknownCode {}

// Stored codes are always canonical, so decoding is strict.
impl FromStr for Gender {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Gender::M),
            "F" => Ok(Gender::F),
            other => Err(UnknownCode(other.to_string())),
        }
    }
}

impl FromStr for MaritalStatus {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MaritalStatus::from_label(s).ok_or_else(|| UnknownCode(s.to_string()))
    }
}

impl FromStr for ResidencyStatus {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResidencyStatus::from_label(s).ok_or_else(|| UnknownCode(s.to_string()))
    }
}

/// A registered person, as persisted and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    /// Unique across the registry.
    pub national_id: String,
    pub issue_date: NaiveDate,
    pub issue_place: String,
    pub profession: String,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub current_address: String,
    pub previous_address: String,
    pub nationality: String,
    pub phone: String,
    pub marital_status: MaritalStatus,
    pub status: ResidencyStatus,
    pub is_voter: bool,
    pub fokontany_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Person {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A validated, normalized person that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDraft {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub birth_place: String,
    pub national_id: String,
    pub issue_date: NaiveDate,
    pub issue_place: String,
    pub profession: String,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub current_address: String,
    pub previous_address: String,
    pub nationality: String,
    pub phone: String,
    pub marital_status: MaritalStatus,
    pub status: ResidencyStatus,
    pub is_voter: bool,
    pub fokontany_id: Option<i64>,
}

/// The short form of a person embedded in other records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    pub person_id: i64,
    pub first_name: String,
    pub last_name: String,
}
