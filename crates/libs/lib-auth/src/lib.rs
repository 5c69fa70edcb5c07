//! # Authentication Library
//!
//! Password hashing and bearer token management.

pub mod error;
pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use error::{Error, Result};
pub use pwd::{hash_password, verify_password};
pub use token::{Claims, encode_jwt, decode_jwt};
