//! # HTTP Request Handlers
//!
//! Axum handlers grouped by resource. Which of them sit behind the
//! authorization gate is decided by the route table in [`crate::routes`],
//! not here.
//!
//! ## Handler Modules
//!
//! - **[`auth`]**: `POST /auth/signup`, `POST /auth/login`
//! - **[`users`]**: `GET /users`, `GET|PUT|DELETE /users/{id}`
//! - **[`posts`]**: `GET|POST /posts`, `GET|PUT|DELETE /posts/{id}`
//!
//! ## Handler Algorithms
//!
//! Read handlers: parse the path id (`400` on failure), load through the
//! repository (`404` if absent), respond with the entity as JSON.
//!
//! Mutating handlers: parse the path id, apply the validation rules to the
//! body (`400`), resolve the target by id (`404`), then call the repository
//! and respond `{message, <resource>}` or `{message, id}`.
//!
//! Every failure is an [`AppError`], whose `IntoResponse` picks the status
//! and the `{error, code}` body.

pub mod auth;
pub mod posts;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

use lib_auth::{hash_password, verify_password};
use lib_core::model::store::Repository;
use lib_core::{AppError, Result};

/// Load an entity by id, mapping absence to `404 {error: not_found_message}`.
pub(crate) async fn find_or_404<R>(repo: &R, id: i64, not_found_message: &str) -> Result<R::Entity>
where
    R: Repository + ?Sized,
{
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(not_found_message.to_string()))
}

/// Hash a password off the async executor.
pub(crate) async fn hash_password_blocking(password: String) -> Result<String> {
    let hash = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))??;
    Ok(hash)
}

/// Verify a password off the async executor.
pub(crate) async fn verify_password_blocking(password: String, hash: String) -> Result<bool> {
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))??;
    Ok(valid)
}
