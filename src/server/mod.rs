//! HTTP front-end: accepts chart requests and serves the stored artifacts

pub mod dto;
pub mod handlers;
pub mod router;

use anyhow::{Context, Result};
use std::sync::Arc;

pub use handlers::AppState;
pub use router::create_router;

/// Bind and serve until the process is stopped
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("listening on http://{}", addr);
    axum::serve(listener, create_router(Arc::new(state)))
        .await
        .context("Server error")
}
