//! Portfolio widget server
//!
//! A Rust backend for the interactive pieces of a personal portfolio
//! site: a keyword-matched assistant chat, a notification tray, a
//! welcome banner, and the project showcase. Each visitor gets a
//! session actor; clients follow it over SSE.

mod api;
mod chat;
mod matcher;
mod notify;
mod projects;
mod runtime;

use api::{create_router, AppState};
use chat::state::DEFAULT_REPLY_DELAY;
use matcher::ResponseMatcher;
use notify::WELCOME_AUTO_HIDE;
use projects::StaticProjects;
use runtime::SessionConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio_widgets=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("FOLIO_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    let reply_delay = std::env::var("FOLIO_REPLY_DELAY_MS")
        .ok()
        .and_then(|ms| ms.parse().ok())
        .map_or(DEFAULT_REPLY_DELAY, Duration::from_millis);

    let welcome_hide = std::env::var("FOLIO_WELCOME_HIDE_MS")
        .ok()
        .and_then(|ms| ms.parse().ok())
        .map_or(WELCOME_AUTO_HIDE, Duration::from_millis);

    tracing::info!(?reply_delay, ?welcome_hide, "Session timers configured");

    let config = SessionConfig {
        reply_delay,
        welcome_hide,
        matcher: ResponseMatcher::portfolio_rules(),
    };

    // Create application state
    let state = AppState::new(config, Arc::new(StaticProjects::portfolio()));

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(cors)
        .layer(compression)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Portfolio widget server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
