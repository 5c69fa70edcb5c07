//! # Blog API Server
//!
//! Loads `.env`, resolves the listener settings and hands over to
//! [`lib_web::start_server`].
//!
//! `BIND_ADDRESS` overrides the listen address and `CORS_ORIGINS` (comma
//! separated) the allowed browser origins.

use lib_utils::envs::get_env;
use lib_web::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut config = ServerConfig {
        migrations_path: "migrations",
        ..Default::default()
    };

    if let Ok(bind_address) = get_env("BIND_ADDRESS") {
        config.bind_address = bind_address;
    }
    if let Ok(origins) = get_env("CORS_ORIGINS") {
        config.allowed_origins = parse_origins(&origins);
    }

    start_server(config).await
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(String::from)
        .collect()
}
