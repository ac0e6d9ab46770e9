//! Server assembly: shared state, router construction, and the run loop.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::config::Config;
use crate::fonts::{FontError, FontResolver};
use crate::handlers::{api, certificate, demo, pages};

/// Shared per-request state: the startup configuration and the font
/// resolver (which owns the outbound HTTP client).
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fonts: FontResolver,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, FontError> {
        let fonts = FontResolver::new(&config.fonts)?;
        Ok(Self {
            config: Arc::new(config),
            fonts,
        })
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let max_body_size = state.config.server.max_body_size;

    Router::new()
        .route("/", get(pages::index))
        .route("/hello", get(pages::hello))
        .route("/engine/version", get(pages::engine_version))
        .route("/demo/text", post(demo::text_overlay))
        .route("/demo/resize", post(demo::resize_image))
        .route("/demo/convert", post(demo::convert_format))
        .route("/demo/rotate", post(demo::rotate_image))
        .route("/demo/metadata", post(demo::metadata))
        .route("/demo/composite", post(demo::composite_image))
        .route("/demo/certificate", get(certificate::generate))
        .route("/api/metadata", post(api::metadata))
        .route("/api/images/process", post(api::process))
        .layer(DefaultBodyLimit::max(max_body_size))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let address = format!("{}:{}", config.server.address, config.server.port);
    let state = AppState::new(config)?;

    let listener = tokio::net::TcpListener::bind(&address).await?;

    tracing::info!(address = %address, "Starting ukiyo image service");

    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
