//! # Database Store
//!
//! Database connection pool, the resource repository contract and its
//! SQLite implementations.
//!
//! Every entity is persisted through a [`Repository`]: find-all, find-by-key,
//! create, update-in-place and delete. Handlers only ever see the traits
//! ([`UserStore`], [`PostStore`]), so tests can wrap or replace the SQLite
//! stores.

// region: --- Modules
pub mod models;
pub mod post_repository;
pub mod user_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use post_repository::PostRepository;
pub use user_repository::UserRepository;
// endregion: --- Re-exports

// region: --- Types and Functions
use crate::error::Result;
use async_trait::async_trait;
use models::{Post, PostForCreate, PostForUpdate, User, UserForCreate, UserForUpdate};
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Message of the `NotFound` raised when a user row is missing.
pub const USER_NOT_FOUND: &str = "User not found";

/// Message of the `NotFound` raised when a post row is missing.
pub const POST_NOT_FOUND: &str = "Post not found";

/// Message of the `InvalidInput` raised when an email is already taken.
pub const EMAIL_ALREADY_REGISTERED: &str = "Email already registered";

/// Create a new SQLite connection pool, creating the database file if needed.
pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}

/// Persistence contract shared by every resource type.
///
/// Absence is `Ok(None)` from [`find_by_id`](Repository::find_by_id).
/// [`update`](Repository::update) and [`delete`](Repository::delete) fail
/// with `AppError::NotFound` when the row vanished after it was loaded.
#[async_trait]
pub trait Repository: Send + Sync {
    type Entity: Send + Sync;
    type ForCreate: Send;
    type ForUpdate: Send;

    /// All entities in creation order.
    async fn find_all(&self) -> Result<Vec<Self::Entity>>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Self::Entity>>;

    /// Insert and return the stored entity with its assigned identity.
    async fn create(&self, data: Self::ForCreate) -> Result<Self::Entity>;

    /// Apply the `Some` fields of `data` to `entity` and return the stored result.
    async fn update(&self, entity: &Self::Entity, data: Self::ForUpdate) -> Result<Self::Entity>;

    /// Permanently remove `entity`.
    async fn delete(&self, entity: &Self::Entity) -> Result<()>;
}

/// User persistence, with lookup by login key.
#[async_trait]
pub trait UserStore:
    Repository<Entity = User, ForCreate = UserForCreate, ForUpdate = UserForUpdate>
{
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Post persistence.
pub trait PostStore:
    Repository<Entity = Post, ForCreate = PostForCreate, ForUpdate = PostForUpdate>
{
}
// endregion: --- Types and Functions
