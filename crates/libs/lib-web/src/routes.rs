//! # Routes
//!
//! The route capability table and the router built from it.
//!
//! Each API route is declared once in [`route_table`] together with the
//! access it requires. [`create_router`] attaches the authorization gate to
//! exactly the [`Access::Bearer`] entries, so the auth coverage of the API
//! can be read (and tested) from a single list.
//!
//! | Method | Path | Access |
//! |---|---|---|
//! | GET | /users | Public |
//! | POST | /auth/signup | Public |
//! | POST | /auth/login | Public |
//! | GET, PUT, DELETE | /users/{id} | Public |
//! | GET | /posts | Public |
//! | POST | /posts | Bearer |
//! | GET | /posts/{id} | Public |
//! | PUT, DELETE | /posts/{id} | Bearer |

use crate::handlers::{auth, posts, users};
use crate::middleware::{log_requests, require_auth, stamp_req, RequestStamp};
use crate::state::AppState;
use axum::{
    http::{Method, Request, StatusCode},
    middleware,
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use lib_core::AppError;
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

/// What a caller must present to reach a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No credentials required.
    Public,
    /// A valid token in the `Authorization` header.
    Bearer,
}

/// One entry of the route capability table.
pub struct RouteSpec {
    pub method: Method,
    pub path: &'static str,
    pub access: Access,
    handler: MethodRouter<AppState>,
}

impl RouteSpec {
    fn public(method: Method, path: &'static str, handler: MethodRouter<AppState>) -> Self {
        Self {
            method,
            path,
            access: Access::Public,
            handler,
        }
    }

    fn bearer(method: Method, path: &'static str, handler: MethodRouter<AppState>) -> Self {
        Self {
            method,
            path,
            access: Access::Bearer,
            handler,
        }
    }
}

/// Every API route with its required access.
///
/// User mutations are public while post mutations require a token.
pub fn route_table() -> Vec<RouteSpec> {
    vec![
        RouteSpec::public(Method::GET, "/users", get(users::list_users)),
        RouteSpec::public(Method::POST, "/auth/signup", post(auth::signup)),
        RouteSpec::public(Method::POST, "/auth/login", post(auth::login)),
        RouteSpec::public(Method::GET, "/users/{id}", get(users::get_user)),
        RouteSpec::public(Method::PUT, "/users/{id}", put(users::update_user)),
        RouteSpec::public(Method::DELETE, "/users/{id}", delete(users::delete_user)),
        RouteSpec::public(Method::GET, "/posts", get(posts::list_posts)),
        RouteSpec::bearer(Method::POST, "/posts", post(posts::create_post)),
        RouteSpec::public(Method::GET, "/posts/{id}", get(posts::get_post)),
        RouteSpec::bearer(Method::PUT, "/posts/{id}", put(posts::update_post)),
        RouteSpec::bearer(Method::DELETE, "/posts/{id}", delete(posts::delete_post)),
    ]
}

/// Create the application router: API routes from [`route_table`], health
/// check, JSON 404 fallback, and the request middleware stack.
///
/// CORS is left to the caller since allowed origins are deployment-specific.
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    info!("[ROUTE SETUP] Registering HTTP routes...");
    let mut router = Router::new();
    for route in route_table() {
        info!("[ROUTE SETUP] {:<6} {} ({:?})", route.method, route.path, route.access);
        let handler = match route.access {
            Access::Public => route.handler,
            Access::Bearer => route
                .handler
                .route_layer(middleware::from_fn_with_state(state.clone(), require_auth)),
        };
        router = router.route(route.path, handler);
    }

    router
        .route("/health", get(|| async { "OK" }))
        .fallback(route_not_found)
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                let request_id = request
                    .extensions()
                    .get::<RequestStamp>()
                    .map(|s| s.id.clone())
                    .unwrap_or_else(|| "unknown".to_string());
                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(middleware::from_fn(log_requests))
        // Outermost, so the request ID is set before logging and tracing
        .layer(middleware::from_fn(stamp_req))
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
