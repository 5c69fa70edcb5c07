//! # User Repository
//!
//! Provides database access layer for user-related operations.
//!
//! This module implements the repository pattern for user data access,
//! providing a clean abstraction over SQL queries.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, Repository, UserRepository, UserStore};
//! # use lib_core::model::UserForCreate;
//! # async fn example() -> lib_core::Result<()> {
//! let pool = create_pool("sqlite:data/blog.db").await?;
//! let users = UserRepository::new(pool);
//!
//! // Create a new user
//! let user = users
//!     .create(UserForCreate::new(
//!         "alice".to_string(),
//!         "alice@example.com".to_string(),
//!         "hashed_password".to_string(),
//!     ))
//!     .await?;
//!
//! // Find user by email
//! let found = users.find_by_email("alice@example.com").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForCreate, UserForUpdate};
use super::{DbPool, Repository, UserStore, EMAIL_ALREADY_REGISTERED, USER_NOT_FOUND};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::query_as;

/// User repository for database operations.
///
/// Cheap to clone; all clones share the same pool.
#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: i64) -> Result<User> {
        query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found)
    }
}

#[async_trait]
impl Repository for UserRepository {
    type Entity = User;
    type ForCreate = UserForCreate;
    type ForUpdate = UserForUpdate;

    /// List every user in creation order.
    async fn find_all(&self) -> Result<Vec<User>> {
        let users = query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Find a user by primary key.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that ID
    /// * `Err(AppError::Internal)` - Database error occurred
    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Create a new user in the database.
    ///
    /// # Arguments
    ///
    /// * `user_data` - Username, email (must be unique) and an already hashed password
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The newly created user with generated ID and timestamps
    /// * `Err(AppError::InvalidInput)` - The email is already registered
    /// * `Err(AppError::Internal)` - Any other database error
    async fn create(&self, user_data: UserForCreate) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash) VALUES (?, ?, ?)"
        )
        .bind(&user_data.username)
        .bind(&user_data.email)
        .bind(&user_data.password_hash)
        .execute(&self.pool)
        .await
        .map_err(email_conflict)?;

        self.fetch(result.last_insert_rowid()).await
    }

    /// Update an existing user using `UserForUpdate`.
    ///
    /// Only fields that are `Some` in `user_data` will be updated; the rest
    /// keep their stored value. A user removed since it was loaded yields
    /// `NotFound`, an email held by another user `InvalidInput`.
    async fn update(&self, user: &User, user_data: UserForUpdate) -> Result<User> {
        if user_data.is_empty() {
            // No updates, just return the stored user
            return self.fetch(user.id).await;
        }

        // Build update query dynamically
        let mut updates = Vec::new();

        if user_data.username.is_some() {
            updates.push("username = ?");
        }
        if user_data.email.is_some() {
            updates.push("email = ?");
        }
        if user_data.password_hash.is_some() {
            updates.push("password_hash = ?");
        }

        updates.push("updated_at = CURRENT_TIMESTAMP");
        let query_str = format!("UPDATE users SET {} WHERE id = ?", updates.join(", "));

        let mut query = sqlx::query(&query_str);

        if let Some(ref username) = user_data.username {
            query = query.bind(username);
        }
        if let Some(ref email) = user_data.email {
            query = query.bind(email);
        }
        if let Some(ref password_hash) = user_data.password_hash {
            query = query.bind(password_hash);
        }

        let result = query
            .bind(user.id)
            .execute(&self.pool)
            .await
            .map_err(email_conflict)?;
        if result.rows_affected() == 0 {
            return Err(not_found());
        }

        self.fetch(user.id).await
    }

    /// Delete a user permanently.
    async fn delete(&self, user: &User) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    /// Find a user by their email address.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - User found with matching email
    /// * `Ok(None)` - No user found with that email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

fn not_found() -> AppError {
    AppError::NotFound(USER_NOT_FOUND.to_string())
}

/// Maps a `users.email` UNIQUE violation to the duplicate-email error.
fn email_conflict(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::InvalidInput(EMAIL_ALREADY_REGISTERED.to_string())
        }
        other => other.into(),
    }
}
