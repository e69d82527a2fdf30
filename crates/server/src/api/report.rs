//! Report API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use leadfinder_core::{DashboardView, SortKey};
use serde::Deserialize;
use tracing::{debug, error};

use super::handlers::ErrorResponse;
use crate::metrics::REPORT_EXPORTS_TOTAL;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SortRequest {
    /// Column to sort by; `null` or absent restores arrival order.
    #[serde(default)]
    pub key: Option<String>,
}

/// GET /api/v1/report
pub async fn get_report(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    Json(state.dashboard().read().await.view())
}

/// POST /api/v1/report/sort
///
/// Selecting the active column again flips its direction.
pub async fn sort_report(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SortRequest>,
) -> Result<Json<DashboardView>, impl IntoResponse> {
    let key = match body.key.as_deref().map(str::parse::<SortKey>).transpose() {
        Ok(key) => key,
        Err(e) => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            ))
        }
    };

    let mut dashboard = state.dashboard().write().await;
    match key {
        Some(key) => {
            dashboard.request_sort(key);
        }
        None => {
            dashboard.clear_sort();
        }
    }
    Ok(Json(dashboard.view()))
}

/// GET /api/v1/report/export
///
/// CSV of the current view as a file download.
pub async fn export_report(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let csv = state.dashboard().read().await.export_csv();
    match csv {
        Ok(body) => {
            REPORT_EXPORTS_TOTAL.inc();
            let filename = &state.config().report.export_filename;
            debug!("Exporting report as {}", filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                body,
            )
                .into_response()
        }
        Err(e) => {
            error!("Report export failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
