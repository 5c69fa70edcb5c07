//! # User Handlers
//!
//! Read, update and delete users. Users are created through
//! [`signup`](super::auth::signup). These routes are public in the route
//! table.

use super::{find_or_404, hash_password_blocking};
use crate::extract::AppJson;
use crate::state::AppState;
use axum::extract::{Json, Path, State};
use lib_core::dto::{DeleteResponse, UserInfo, UserResponse, UserUpdateRequest};
use lib_core::model::store::{Repository, UserStore, EMAIL_ALREADY_REGISTERED};
use lib_core::model::UserForUpdate;
use lib_core::validation::{parse_id, validate_user_update};
use lib_core::{AppError, Result};
use tracing::{debug, info, instrument, warn};

pub use lib_core::model::store::USER_NOT_FOUND;

/// `GET /users` - every user in creation order, without password hashes.
#[instrument(skip_all)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserInfo>>> {
    let users = state.users.find_all().await?;
    debug!("[USERS] Listing {} users", users.len());

    Ok(Json(users.into_iter().map(UserInfo::from).collect()))
}

/// `GET /users/{id}`
#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserInfo>> {
    let id = parse_id(&id, "user")?;
    let user = find_or_404(state.users.as_ref(), id, USER_NOT_FOUND).await?;

    Ok(Json(user.into()))
}

/// `PUT /users/{id}` - partial update.
///
/// Absent fields keep their value. A new password is hashed before storage.
/// Moving to an email held by another user is rejected with `400`.
#[instrument(skip(state, req))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(req): AppJson<UserUpdateRequest>,
) -> Result<Json<UserResponse>> {
    let id = parse_id(&id, "user")?;
    let changes = validate_user_update(req)?;
    let user = find_or_404(state.users.as_ref(), id, USER_NOT_FOUND).await?;

    if let Some(ref email) = changes.email {
        if let Some(holder) = state.users.find_by_email(email).await? {
            if holder.id != user.id {
                warn!("[USERS] Email already registered to user {}", holder.id);
                return Err(AppError::InvalidInput(EMAIL_ALREADY_REGISTERED.to_string()));
            }
        }
    }

    let mut update = UserForUpdate::new();
    if let Some(username) = changes.username {
        update = update.username(username);
    }
    if let Some(email) = changes.email {
        update = update.email(email);
    }
    if let Some(password) = changes.password {
        update = update.password_hash(hash_password_blocking(password).await?);
    }

    let user = state.users.update(&user, update).await?;
    info!("[USERS] User {} updated", user.id);

    Ok(Json(UserResponse {
        message: "User updated successfully".to_string(),
        user: user.into(),
    }))
}

/// `DELETE /users/{id}` - permanent; a second delete of the same id is `404`.
#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = parse_id(&id, "user")?;
    let user = find_or_404(state.users.as_ref(), id, USER_NOT_FOUND).await?;

    state.users.delete(&user).await?;
    info!("[USERS] User {} deleted", user.id);

    Ok(Json(DeleteResponse {
        message: "User deleted successfully".to_string(),
        id: user.id,
    }))
}
