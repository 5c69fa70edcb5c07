//! # Core Library
//!
//! Core models, persistence, validation rules and configuration for the application.

pub mod config;
pub mod error;
pub mod model;
pub mod dto;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
pub use model::store::{DbPool, create_pool};
