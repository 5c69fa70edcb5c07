//! # Handler Test Support
//!
//! In-memory database, call-counting stores and request helpers shared by
//! the handler test suites. Requests go through [`create_router`], so the
//! route table, the authorization gate and the error envelope are all
//! exercised.

use crate::routes::create_router;
use crate::state::AppState;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use lib_core::model::store::{
    PostRepository, PostStore, Repository, UserRepository, UserStore,
};
use lib_core::model::{Post, PostForCreate, PostForUpdate, User, UserForCreate, UserForUpdate};
use lib_core::{Config, DbPool, Result};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

/// Setup test database with schema
pub async fn setup_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    sqlx::migrate!("../../../migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// Create test config
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiration_hours: 1,
        request_timeout_secs: 30,
    }
}

// region: --- Counting stores

/// Per-method call counters of a [`Counting`] store.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub find_all: AtomicUsize,
    pub find_by_id: AtomicUsize,
    pub find_by_email: AtomicUsize,
    pub create: AtomicUsize,
    pub update: AtomicUsize,
    pub delete: AtomicUsize,
}

impl CallCounts {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    /// create + update + delete
    pub fn mutations(&self) -> usize {
        Self::get(&self.create) + Self::get(&self.update) + Self::get(&self.delete)
    }

    pub fn total(&self) -> usize {
        self.mutations()
            + Self::get(&self.find_all)
            + Self::get(&self.find_by_id)
            + Self::get(&self.find_by_email)
    }
}

fn bump(counter: &AtomicUsize) {
    counter.fetch_add(1, Ordering::SeqCst);
}

/// Store wrapper recording every repository call before delegating.
pub struct Counting<R> {
    inner: R,
    pub calls: CallCounts,
}

impl<R> Counting<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            calls: CallCounts::default(),
        }
    }
}

#[async_trait]
impl<R: Repository> Repository for Counting<R> {
    type Entity = R::Entity;
    type ForCreate = R::ForCreate;
    type ForUpdate = R::ForUpdate;

    async fn find_all(&self) -> Result<Vec<Self::Entity>> {
        bump(&self.calls.find_all);
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Self::Entity>> {
        bump(&self.calls.find_by_id);
        self.inner.find_by_id(id).await
    }

    async fn create(&self, data: Self::ForCreate) -> Result<Self::Entity> {
        bump(&self.calls.create);
        self.inner.create(data).await
    }

    async fn update(&self, entity: &Self::Entity, data: Self::ForUpdate) -> Result<Self::Entity> {
        bump(&self.calls.update);
        self.inner.update(entity, data).await
    }

    async fn delete(&self, entity: &Self::Entity) -> Result<()> {
        bump(&self.calls.delete);
        self.inner.delete(entity).await
    }
}

#[async_trait]
impl<R> UserStore for Counting<R>
where
    R: UserStore + Repository<Entity = User, ForCreate = UserForCreate, ForUpdate = UserForUpdate>,
{
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        bump(&self.calls.find_by_email);
        self.inner.find_by_email(email).await
    }
}

impl<R> PostStore for Counting<R> where
    R: PostStore + Repository<Entity = Post, ForCreate = PostForCreate, ForUpdate = PostForUpdate>
{
}

// endregion: --- Counting stores

// region: --- Test app

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// The `error` field of an error envelope.
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// Full router over an in-memory database, with counted stores.
pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
    pub users: Arc<Counting<UserRepository>>,
    pub posts: Arc<Counting<PostRepository>>,
    pub config: Config,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = setup_test_db().await;
        let config = test_config();
        let users = Arc::new(Counting::new(UserRepository::new(pool.clone())));
        let posts = Arc::new(Counting::new(PostRepository::new(pool.clone())));

        let state = AppState::with_stores(users.clone(), posts.clone(), config.clone());

        Self {
            router: create_router(state),
            pool,
            users,
            posts,
            config,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, token);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.request(Method::GET, uri, None, None).await
    }

    /// Sign up a user and return its JSON view.
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> Value {
        let res = self
            .request(
                Method::POST,
                "/auth/signup",
                Some(json!({ "username": username, "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "signup failed: {}", res.body);
        res.body["user"].clone()
    }

    /// Log in and return the issued token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let res = self
            .request(
                Method::POST,
                "/auth/login",
                Some(json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "login failed: {}", res.body);
        res.body["token"].as_str().unwrap().to_string()
    }

    /// Token for an arbitrary identity, signed with the app's secret.
    pub fn token_for(&self, user_id: i64, email: &str) -> String {
        lib_auth::encode_jwt(user_id, email.to_string(), &self.config.jwt_secret, 1).unwrap()
    }

    /// Create a post through the API and return its JSON view.
    pub async fn create_post(&self, token: &str, title: &str, content: &str, author_id: i64) -> Value {
        let res = self
            .request(
                Method::POST,
                "/posts",
                Some(json!({ "title": title, "content": content, "authorId": author_id })),
                Some(token),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "create post failed: {}", res.body);
        res.body["post"].clone()
    }
}

// endregion: --- Test app
