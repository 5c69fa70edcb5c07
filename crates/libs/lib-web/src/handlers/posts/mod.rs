//! # Post Handlers
//!
//! Listing and reading posts is public. Create, update and delete are
//! declared `Bearer` in the route table, so by the time these handlers run
//! the gate has put the caller's [`Claims`] into the request extensions.

use super::find_or_404;
use crate::extract::AppJson;
use crate::state::AppState;
use axum::extract::{Extension, Json, Path, State};
use lib_auth::Claims;
use lib_core::dto::{DeleteResponse, PostCreateRequest, PostResponse, PostUpdateRequest};
use lib_core::model::store::Repository;
use lib_core::model::Post;
use lib_core::validation::{parse_id, validate_post_create, validate_post_update};
use lib_core::Result;
use tracing::{debug, info, instrument};

pub use lib_core::model::store::POST_NOT_FOUND;

/// `GET /posts` - every post in creation order.
#[instrument(skip_all)]
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>> {
    let posts = state.posts.find_all().await?;
    debug!("[POSTS] Listing {} posts", posts.len());

    Ok(Json(posts))
}

/// `GET /posts/{id}`
#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Post>> {
    let id = parse_id(&id, "post")?;
    let post = find_or_404(state.posts.as_ref(), id, POST_NOT_FOUND).await?;

    Ok(Json(post))
}

/// `POST /posts` - requires a bearer token.
#[instrument(skip_all, fields(actor = claims.id))]
pub async fn create_post(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    AppJson(req): AppJson<PostCreateRequest>,
) -> Result<Json<PostResponse>> {
    let data = validate_post_create(req)?;
    let post = state.posts.create(data).await?;
    info!("[POSTS] Post {} created by user {}", post.id, claims.id);

    Ok(Json(PostResponse {
        message: "Post created successfully".to_string(),
        post,
    }))
}

/// `PUT /posts/{id}` - partial update, requires a bearer token.
#[instrument(skip(state, claims, req), fields(actor = claims.id))]
pub async fn update_post(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    AppJson(req): AppJson<PostUpdateRequest>,
) -> Result<Json<PostResponse>> {
    let id = parse_id(&id, "post")?;
    let changes = validate_post_update(req)?;
    let post = find_or_404(state.posts.as_ref(), id, POST_NOT_FOUND).await?;

    let post = state.posts.update(&post, changes).await?;
    info!("[POSTS] Post {} updated by user {}", post.id, claims.id);

    Ok(Json(PostResponse {
        message: "Post updated successfully".to_string(),
        post,
    }))
}

/// `DELETE /posts/{id}` - requires a bearer token.
#[instrument(skip(state, claims), fields(actor = claims.id))]
pub async fn delete_post(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>> {
    let id = parse_id(&id, "post")?;
    let post = find_or_404(state.posts.as_ref(), id, POST_NOT_FOUND).await?;

    state.posts.delete(&post).await?;
    info!("[POSTS] Post {} deleted by user {}", post.id, claims.id);

    Ok(Json(DeleteResponse {
        message: "Post deleted successfully".to_string(),
        id: post.id,
    }))
}

#[cfg(test)]
mod tests;
