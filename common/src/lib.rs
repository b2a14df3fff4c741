//! Data types shared between the registry backend and its clients.
//!
//! `model` holds the records the API returns, `requests` the JSON payloads it
//! accepts. Everything serializes with camelCase field names.

pub mod model;
pub mod requests;
