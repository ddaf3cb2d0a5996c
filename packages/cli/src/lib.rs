// ABOUTME: Server assembly for the Atelier catalog API
// ABOUTME: Builds the router with CORS, request tracing and trailing-slash folding, then serves it

use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use atelier_api::{create_router, ServiceInfo};
use atelier_catalog::DbState;
use axum::extract::Request;
use axum::http::{HeaderValue, Method};
use axum::{Router, ServiceExt};
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;

#[cfg(test)]
mod tests;

pub use config::{Config, ConfigError, Environment};

fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if origin.trim() == "*" {
        return Ok(cors.allow_origin(Any));
    }

    let origin = origin
        .trim()
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", origin))?;
    Ok(cors.allow_origin(origin))
}

/// The served application: the router behind path normalization
pub type App = NormalizePath<Router>;

/// Build the full application for the given configuration.
///
/// Trailing slashes are trimmed before routing, so `/api/v1/suites/` and
/// `/api/v1/suites` reach the same handler.
pub fn build_app(config: &Config, db: DbState) -> anyhow::Result<App> {
    let service = ServiceInfo::new(config.project_name.clone());

    let router = create_router(&config.api_v1_str, service, db)
        .layer(cors_layer(&config.cors_origin)?)
        .layer(TraceLayer::new_for_http());

    Ok(NormalizePath::trim_trailing_slash(router))
}

/// Connect to the database, run migrations and serve until shutdown
pub async fn run_server(config: Config, host: IpAddr) -> anyhow::Result<()> {
    info!("Starting {} ({:?})", config.project_name, config.environment);

    let db = DbState::init(&config.database_url, &config.pool_settings())
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    let app = build_app(&config, db)?;

    let addr = SocketAddr::new(host, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server listening on http://{}{}", addr, config.api_v1_str);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
