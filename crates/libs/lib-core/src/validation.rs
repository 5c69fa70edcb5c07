//! # Validation Rules
//!
//! Per-entity field constraints, applied by the handlers before any
//! repository call. Each rule consumes a request DTO and either yields the
//! typed data the repository needs or an [`AppError::InvalidInput`] carrying
//! the message returned to the client.
//!
//! | Entity | Field | Rule |
//! |---|---|---|
//! | user | username, email, password | required, non-empty, ≤ 255 chars |
//! | post | title | required, non-empty, ≤ 255 chars |
//! | post | content | required, non-empty |
//! | post | authorId | integer (JSON number or numeric string) |
//!
//! On updates a field may be absent (kept as is), but an explicit `null` or
//! empty value on a required field is rejected.

use crate::dto::{PostCreateRequest, PostUpdateRequest, SignupRequest, UserUpdateRequest};
use crate::error::{AppError, Result};
use crate::model::{PostForCreate, PostForUpdate};
use lib_utils::validation::{parse_int, validate_max_length, validate_not_empty};
use serde_json::Value;

/// Maximum length of every bounded text field, in characters.
pub const MAX_FIELD_LENGTH: usize = 255;

/// Validated signup fields. The password is still plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupFields {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Validated user changes. The password, if any, is still plaintext.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

// region: --- Users

pub fn validate_signup(req: SignupRequest) -> Result<SignupFields> {
    Ok(SignupFields {
        username: required_text(req.username, "username", Some(MAX_FIELD_LENGTH))?,
        email: required_text(req.email, "email", Some(MAX_FIELD_LENGTH))?,
        password: required_text(req.password, "password", Some(MAX_FIELD_LENGTH))?,
    })
}

/// An empty or `null` field is rejected, unlike the older "empty means keep"
/// fallback; only an absent field keeps the stored value.
pub fn validate_user_update(req: UserUpdateRequest) -> Result<UserChanges> {
    Ok(UserChanges {
        username: patched_text(req.username, "username", Some(MAX_FIELD_LENGTH))?,
        email: patched_text(req.email, "email", Some(MAX_FIELD_LENGTH))?,
        password: patched_text(req.password, "password", Some(MAX_FIELD_LENGTH))?,
    })
}

// endregion: --- Users

// region: --- Posts

pub fn validate_post_create(req: PostCreateRequest) -> Result<PostForCreate> {
    let title = required_text(req.title, "title", Some(MAX_FIELD_LENGTH))?;
    let content = required_text(req.content, "content", None)?;
    let author_id = match req.author_id {
        Some(value) => author_id_from_json(value)?,
        None => return Err(invalid("authorId is required")),
    };

    Ok(PostForCreate {
        title,
        content,
        author_id,
    })
}

/// Same tri-state rule as [`validate_user_update`].
pub fn validate_post_update(req: PostUpdateRequest) -> Result<PostForUpdate> {
    let author_id = match req.author_id {
        None => None,
        Some(None) => return Err(invalid("authorId cannot be null")),
        Some(Some(value)) => Some(author_id_from_json(value)?),
    };

    Ok(PostForUpdate {
        title: patched_text(req.title, "title", Some(MAX_FIELD_LENGTH))?,
        content: patched_text(req.content, "content", None)?,
        author_id,
    })
}

// endregion: --- Posts

/// Parse an identity path segment. `resource` names the entity in the message.
pub fn parse_id(raw: &str, resource: &str) -> Result<i64> {
    parse_int(raw).ok_or_else(|| AppError::InvalidInput(format!("Invalid {} id", resource)))
}

// region: --- Helpers

fn invalid(message: &str) -> AppError {
    AppError::InvalidInput(message.to_string())
}

fn check_text(value: &str, field: &str, max: Option<usize>) -> Result<()> {
    validate_not_empty(value, field).map_err(AppError::InvalidInput)?;
    if let Some(max) = max {
        validate_max_length(value, max, field).map_err(AppError::InvalidInput)?;
    }
    Ok(())
}

fn required_text(value: Option<String>, field: &str, max: Option<usize>) -> Result<String> {
    let value = value.ok_or_else(|| AppError::InvalidInput(format!("{} is required", field)))?;
    check_text(&value, field, max)?;
    Ok(value)
}

fn patched_text(
    value: Option<Option<String>>,
    field: &str,
    max: Option<usize>,
) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(None) => Err(AppError::InvalidInput(format!("{} cannot be null", field))),
        Some(Some(value)) => {
            check_text(&value, field, max)?;
            Ok(Some(value))
        }
    }
}

fn author_id_from_json(value: Value) -> Result<i64> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => parse_int(&s),
        _ => None,
    };
    parsed.ok_or_else(|| invalid("authorId must be an integer"))
}

// endregion: --- Helpers
