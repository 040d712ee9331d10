//! HTTP endpoint.

mod error;
mod handlers;
mod state;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::app::config::ServerConfig;
use crate::domain::AppError;

pub use error::ApiError;
pub use state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::bundle))
        .route("/dc", post(handlers::manifest))
        .route("/report", post(handlers::report))
        .route("/health", get(handlers::health))
        .route("/swagger.json", get(handlers::swagger))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), AppError> {
    let address = config.bind_address();
    let persist = config.persist.then(|| config.home.display().to_string());
    let state = AppState::from_config(config)?;

    let listener = TcpListener::bind(&address).await?;
    info!(address = %address, persist = ?persist, "woopy listening");

    axum::serve(listener, router(state)).with_graceful_shutdown(shutdown_signal()).await?;
    info!("woopy stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
