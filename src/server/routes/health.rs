use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    status: String,
    properties: usize,
    refresh: RefreshHealth,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshHealth {
    in_flight: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_refreshed: Option<DateTime<Utc>>,
}

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        properties: state.store.len().await,
        refresh: RefreshHealth {
            in_flight: state.refresher.is_refreshing(),
            last_refreshed: state.refresher.last_refreshed().await,
        },
    })
}
