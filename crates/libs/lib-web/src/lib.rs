//! # Web Library
//!
//! HTTP handlers, middleware, the route capability table and server startup.

pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use routes::{create_router, route_table, Access, RouteSpec};
pub use server::{start_server, ServerConfig};
pub use state::AppState;
