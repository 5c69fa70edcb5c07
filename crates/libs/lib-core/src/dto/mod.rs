//! # Data Transfer Objects (DTOs)
//!
//! Request and response bodies of the REST API.
//!
//! Request DTOs are deliberately loose (`Option` everywhere) so that missing
//! or mistyped fields reach the validation rules and produce a `400` with a
//! readable message instead of a generic extractor rejection.

pub mod auth;
pub mod posts;
pub mod users;

pub use auth::*;
pub use posts::*;
pub use users::*;

use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a field that distinguishes "absent" from "explicit null".
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// absent → `None`, `null` → `Some(None)`, value → `Some(Some(value))`.
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Confirmation returned by every delete endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub message: String,
    pub id: i64,
}
