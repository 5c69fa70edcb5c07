//! # Authentication Errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("Failed to hash password: {0}")]
    PwdHash(String),

    #[error("Failed to parse stored password hash: {0}")]
    PwdParse(String),

    #[error("Failed to encode token: {0}")]
    TokenEncode(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    TokenInvalid(String),
}

impl Error {
    /// Whether this error comes from a client-supplied token (as opposed to
    /// a server-side hashing or signing failure).
    pub fn is_token_rejection(&self) -> bool {
        matches!(self, Error::TokenExpired | Error::TokenInvalid(_))
    }
}
