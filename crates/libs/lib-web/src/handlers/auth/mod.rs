//! # Authentication Handlers
//!
//! HTTP request handlers for user authentication endpoints.
//!
//! ## Overview
//!
//! - `POST /auth/signup`: validate, reject a registered email, hash, create
//! - `POST /auth/login`: check email + password, issue a bearer token
//!
//! Login failures are indistinguishable: an unknown email, a wrong password
//! and an unreadable body all yield `401 {"error": "Invalid email or password"}`.
//! An unknown email is still checked against a throwaway hash so it costs
//! the same Argon2 work as a wrong password.

use super::{hash_password_blocking, verify_password_blocking};
use crate::extract::AppJson;
use crate::state::AppState;
use axum::extract::{Json, State};
use lib_auth::encode_jwt;
use lib_core::dto::{LoginRequest, LoginResponse, SignupRequest, UserResponse};
use lib_core::model::store::{Repository, UserStore, EMAIL_ALREADY_REGISTERED};
use lib_core::model::UserForCreate;
use lib_core::validation::validate_signup;
use lib_core::{AppError, Result};
use std::sync::OnceLock;
use tracing::{debug, info, instrument, warn};

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

static DUMMY_HASH: OnceLock<String> = OnceLock::new();

/// Hash verified on the unknown-email path, computed on first use.
async fn dummy_hash() -> Result<String> {
    if let Some(hash) = DUMMY_HASH.get() {
        return Ok(hash.clone());
    }
    let hash = hash_password_blocking("login-timing-equalizer".to_string()).await?;
    Ok(DUMMY_HASH.get_or_init(|| hash).clone())
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized(INVALID_CREDENTIALS.to_string())
}

/// Signup handler - creates a new user account.
///
/// # Returns
///
/// * `200 {message: "User created successfully", user}` on success
/// * `400` when a field is missing, empty, longer than 255 characters, or
///   the email is already registered
#[instrument(skip_all, fields(email = ?req.email))]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(req): AppJson<SignupRequest>,
) -> Result<Json<UserResponse>> {
    info!("[SIGNUP] New user signup request");

    let fields = validate_signup(req).inspect_err(|e| warn!("[SIGNUP] Validation failed: {}", e))?;

    if state.users.find_by_email(&fields.email).await?.is_some() {
        warn!("[SIGNUP] Email already registered: {}", fields.email);
        return Err(AppError::InvalidInput(EMAIL_ALREADY_REGISTERED.to_string()));
    }

    debug!("[SIGNUP] Hashing password...");
    let password_hash = hash_password_blocking(fields.password).await?;

    debug!("[SIGNUP] Creating user in database...");
    let user = state
        .users
        .create(UserForCreate::new(fields.username, fields.email, password_hash))
        .await?;

    info!("[SIGNUP] User created (id: {}, username: {})", user.id, user.username);

    Ok(Json(UserResponse {
        message: "User created successfully".to_string(),
        user: user.into(),
    }))
}

/// Login handler - authenticates an existing user by email and password.
///
/// # Returns
///
/// * `200 {message: "Login successful", token}`; the token carries `{id, email}`
///   and expires after the configured number of hours
/// * `401 {error: "Invalid email or password"}` for any credential mismatch,
///   including a body without string `email` and `password`
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    payload: std::result::Result<AppJson<LoginRequest>, AppError>,
) -> Result<Json<LoginResponse>> {
    info!("[LOGIN] Login attempt");

    let Some((email, password)) = payload.ok().and_then(|AppJson(req)| req.credentials()) else {
        warn!("[LOGIN] Unreadable credentials");
        return Err(invalid_credentials());
    };

    let Some(user) = state.users.find_by_email(&email).await? else {
        warn!("[LOGIN] Unknown email");
        verify_password_blocking(password, dummy_hash().await?).await?;
        return Err(invalid_credentials());
    };

    debug!("[LOGIN] Verifying password...");
    let is_valid = verify_password_blocking(password, user.password_hash.clone()).await?;

    if !is_valid {
        warn!("[LOGIN] Invalid password for user id {}", user.id);
        return Err(invalid_credentials());
    }

    debug!("[LOGIN] Generating token...");
    let token = encode_jwt(
        user.id,
        user.email,
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    )?;

    info!("[LOGIN] User authenticated (id: {})", user.id);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}

#[cfg(test)]
mod tests;
