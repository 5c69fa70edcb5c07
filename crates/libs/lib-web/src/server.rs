//! # Server Setup
//!
//! Server initialization and HTTP server startup.
//!
//! [`start_server`] installs the tracing subscriber, loads and validates the
//! configuration, opens the SQLite pool, runs migrations, and serves the
//! router from [`create_router`] with CORS applied until ctrl-c.

// region: --- Imports
use crate::routes::{create_router, route_table};
use crate::state::AppState;
use axum::http::{header, HeaderValue, Method};
use lib_core::{create_pool, Config};
use std::path::Path;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
// endregion: --- Imports

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:3500")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
    /// Database migrations path
    pub migrations_path: &'static str,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3500".to_string(),
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            migrations_path: "./migrations",
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - Database connection fails
/// - Database migrations fail
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let log_level = init_tracing()?;

    info!(" BLOG API BACKEND STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::from_env()?;
    app_config.validate()?;

    info!("Database URL: {}", app_config.database_url);
    ensure_sqlite_dir(&app_config.database_url)?;

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!(" Running database migrations from: {}", config.migrations_path);
    let migrator = sqlx::migrate::Migrator::new(Path::new(config.migrations_path)).await?;
    migrator.run(&pool).await?;
    info!(" Migrations complete");

    let state = AppState::new(pool, app_config);
    let app = create_router(state).layer(cors_layer(&config.allowed_origins));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;

    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Install the global subscriber. The level comes from `LOG_LEVEL`.
fn init_tracing() -> anyhow::Result<String> {
    let log_level = std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase();

    let filter = match log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {
            tracing_subscriber::EnvFilter::new(&log_level)
        }
        _ => tracing_subscriber::EnvFilter::new("info"),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true)
        .with_file(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set global tracing subscriber: {}", e))?;

    Ok(log_level)
}

/// Create the parent directory of a file-backed SQLite database.
fn ensure_sqlite_dir(database_url: &str) -> std::io::Result<()> {
    let Some(db_path) = sqlite_file_path(database_url) else {
        return Ok(());
    };

    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created database directory: {:?}", parent);
        }
    }
    info!("Database file will be at: {}", db_path);
    Ok(())
}

/// File path of a `sqlite:` URL, `None` for in-memory or non-SQLite URLs.
fn sqlite_file_path(database_url: &str) -> Option<&str> {
    let rest = database_url.strip_prefix("sqlite:")?;
    let path = rest.strip_prefix("//").unwrap_or(rest);
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path == ":memory:" {
        None
    } else {
        Some(path)
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, draining connections...");
}

/// Log server information
fn log_server_info() {
    info!(" ROUTES:");
    for route in route_table() {
        info!("   • {:<6} {} ({:?})", route.method, route.path, route.access);
    }
    info!(" HEALTH:");
    info!("   • GET    /health");
}
// endregion: --- Server Setup
