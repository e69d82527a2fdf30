//! Search API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use leadfinder_core::{run_search, Completion, DashboardView, SourceCount};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::handlers::ErrorResponse;
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Sources to analyze; clamped into range, defaults when absent.
    #[serde(default)]
    pub num_links: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(flatten)]
    pub completion: Completion,
    pub report: DashboardView,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/search
///
/// Submit a search and wait for the discovery service to answer.
/// A response that lost to a newer search reports `superseded` together with
/// the report as the newer search left it.
pub async fn search(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, impl IntoResponse> {
    let source_count = body
        .num_links
        .map(SourceCount::clamped)
        .unwrap_or_default();

    match run_search(
        state.dashboard(),
        state.gateway(),
        &body.query,
        source_count.get(),
    )
    .await
    {
        Ok(completion) => {
            if let Completion::Superseded { generation } = completion {
                info!("Search {} answered after a newer search", generation);
            }
            let report = state.dashboard().read().await.view();
            Ok(Json(SearchResponse { completion, report }))
        }
        Err(e) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}
