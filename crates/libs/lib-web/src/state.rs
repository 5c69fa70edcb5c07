//! # Application State
//!
//! Shared, cheaply clonable state handed to every handler and to the
//! authorization gate.

use axum::extract::FromRef;
use lib_core::model::store::{PostRepository, PostStore, UserRepository, UserStore};
use lib_core::{Config, DbPool};
use std::sync::Arc;

/// Application state shared across all routes.
///
/// Stores are trait objects so tests can substitute instrumented ones.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
    pub config: Config,
}

impl AppState {
    /// State backed by the SQLite repositories.
    pub fn new(pool: DbPool, config: Config) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            posts: Arc::new(PostRepository::new(pool)),
            config,
        }
    }

    /// State over arbitrary store implementations.
    pub fn with_stores(
        users: Arc<dyn UserStore>,
        posts: Arc<dyn PostStore>,
        config: Config,
    ) -> Self {
        Self {
            users,
            posts,
            config,
        }
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
