//! # Authentication Middleware
//!
//! The authorization gate: validates the bearer token carried in the
//! `Authorization` header and injects the decoded claims into the request
//! extensions.
//!
//! The gate is attached per route by [`crate::routes::create_router`] for
//! every entry of the route table declared [`Access::Bearer`](crate::routes::Access::Bearer).
//!
//! ## Header format
//!
//! The header carries the token verbatim (`Authorization: eyJhbGciOi...`).
//! A `Bearer ` prefix is tolerated and stripped.
//!
//! Handlers can then extract claims using `Extension<Claims>`:
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//! use lib_auth::Claims;
//!
//! async fn protected_handler(Extension(claims): Extension<Claims>) -> String {
//!     format!("Hello, user {}!", claims.id)
//! }
//! ```

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use lib_auth::decode_jwt;
use lib_core::{AppError, Config};
use tracing::{debug, warn};

/// Authentication middleware that validates JWT tokens.
///
/// # Behavior
///
/// - **Valid token**: Continues to next middleware/handler with `Claims` in extensions
/// - **Missing/invalid/expired token**: Returns `401 Unauthorized`; the handler never runs
pub async fn require_auth(
    State(config): State<Config>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(extract_token)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            warn!("[AUTH] Missing Authorization header");
            AppError::Unauthorized("Missing authorization token".to_string())
        })?;

    let claims = decode_jwt(token, &config.jwt_secret).map_err(|e| {
        warn!("[AUTH] Token validation failed: {}", e);
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    debug!("[AUTH] Authenticated user: {} (id: {})", claims.email, claims.id);

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

fn extract_token(header: &str) -> &str {
    let header = header.trim();
    header.strip_prefix("Bearer ").unwrap_or(header).trim()
}
