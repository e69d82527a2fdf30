use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use leadfinder_core::{gateway::ServiceHealth, SanitizedConfig};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::metrics::encode_metrics;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<SanitizedConfig> {
    Json(state.sanitized_config())
}

/// GET /api/v1/metrics
pub async fn get_metrics() -> impl IntoResponse {
    match encode_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

/// GET /api/v1/service/health
///
/// Probe the lead discovery service.
pub async fn service_health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ServiceHealth>, impl IntoResponse> {
    match state.gateway().health().await {
        Ok(health) => Ok(Json(health)),
        Err(e) => {
            warn!("Discovery service health probe failed: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
