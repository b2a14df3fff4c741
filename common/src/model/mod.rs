pub mod fokontany;
pub mod import;
pub mod person;
pub mod stats;
pub mod tax;
