//! # Authentication Data Transfer Objects
//!
//! - `POST /auth/signup` - [`SignupRequest`] -> [`UserResponse`](super::UserResponse)
//! - `POST /auth/login` - [`LoginRequest`] -> [`LoginResponse`]
//!
//! ```text
//! POST /auth/login
//! Content-Type: application/json
//!
//! { "email": "alice@example.com", "password": "MyPassword123!" }
//! ```
//!
//! Response:
//! ```text
//! { "message": "Login successful", "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Signup request. Every field is required; absence is reported by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Login request.
///
/// Fields are raw JSON so that a missing or non-string value behaves like
/// wrong credentials instead of a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<Value>,
}

impl LoginRequest {
    /// `(email, password)` when both are JSON strings.
    pub fn credentials(self) -> Option<(String, String)> {
        match (self.email?, self.password?) {
            (Value::String(email), Value::String(password)) => Some((email, password)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}
