//! # Model Layer
//!
//! Entities and the repositories that persist them.

pub mod store;

pub use store::models::{Post, PostForCreate, PostForUpdate, User, UserForCreate, UserForUpdate};
