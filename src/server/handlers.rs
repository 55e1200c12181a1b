use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::chart::{ChartRequest, ChartService};
use crate::error::ChartError;
use crate::render::{is_safe_id, ChartArtifact, JsonChartRenderer};

use super::dto::*;

const GENERIC_ERROR: &str = "There was an error while processing the request, try again later";

/// Shared application state
pub struct AppState {
    pub service: ChartService,
    pub artifacts: Arc<JsonChartRenderer>,
}

/// Build a chart from the posted request
pub async fn create_chart(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChartRequest>,
) -> impl IntoResponse {
    if !is_safe_id(&request.id) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<ChartDto>::error(format!(
                "Invalid chart id {:?}: use letters, digits, '-' or '_'",
                request.id
            ))),
        );
    }

    match state.service.create_chart(&request).await {
        Ok(chart) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(ChartDto::from(chart))),
        ),
        Err(ChartError::MissingData { category }) => {
            tracing::debug!(id = %request.id, "no {} data", category);
            (
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error(format!("No {} data available", category))),
            )
        }
        Err(e) => {
            tracing::error!(id = %request.id, "chart failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(GENERIC_ERROR)),
            )
        }
    }
}

/// Fetch a stored chart artifact
pub async fn get_chart(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.artifacts.load(&id) {
        Ok(artifact) => (StatusCode::OK, Json(ApiResponse::success(artifact))),
        Err(ChartError::MissingArtifact { .. }) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<ChartArtifact>::error(format!(
                "Chart {} not found",
                id
            ))),
        ),
        Err(e) => {
            tracing::error!(%id, "failed to read chart: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<ChartArtifact>::error(GENERIC_ERROR)),
            )
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
