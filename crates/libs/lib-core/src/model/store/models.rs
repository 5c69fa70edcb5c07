use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User entity representing a complete user record from the database.
///
/// Not serializable on purpose: responses go through
/// [`UserInfo`](crate::dto::UserInfo), which leaves out the password hash.
#[derive(Debug, Clone, FromRow, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data structure for creating a new user.
///
/// Password should be hashed before creating.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl UserForCreate {
    /// Create a new `UserForCreate` instance.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash,
        }
    }
}

/// Data structure for updating an existing user.
///
/// All fields are optional - only provided fields will be updated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserForUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserForUpdate {
    /// Create a new empty `UserForUpdate` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the username.
    pub fn username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Set the email.
    pub fn email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    /// Set the password hash.
    pub fn password_hash(mut self, password_hash: String) -> Self {
        self.password_hash = Some(password_hash);
        self
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}

/// Post entity. Serialized as-is in responses (`authorId` on the wire).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostForCreate {
    pub title: String,
    pub content: String,
    pub author_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostForUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author_id: Option<i64>,
}

impl PostForUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.author_id.is_none()
    }
}
