//! # JWT Token Management
//!
//! Bearer token generation and validation (HS256, shared secret).

use crate::error::{Error, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT Claims structure containing user authentication information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// User ID
    pub id: i64,
    /// User email (the login key)
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// Encode a JWT token with user claims, valid for `expiration_hours`.
pub fn encode_jwt(
    user_id: i64,
    email: String,
    secret: &str,
    expiration_hours: i64,
) -> Result<String> {
    let now = Utc::now();
    let exp = now + Duration::hours(expiration_hours);

    let claims = Claims {
        id: user_id,
        email,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::TokenEncode(e.to_string()))
}

/// Decode and validate a JWT token.
///
/// Fails for malformed tokens, tokens signed with another secret and
/// expired tokens.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => Error::TokenExpired,
        _ => Error::TokenInvalid(e.to_string()),
    })?;

    Ok(token_data.claims)
}
