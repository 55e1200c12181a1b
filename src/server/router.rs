use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use super::handlers::{self, AppState};

/// Create the main router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/charts", post(handlers::create_chart))
        .route("/charts/:id", get(handlers::get_chart))
        .route("/health", get(handlers::health_check));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}
