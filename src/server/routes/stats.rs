use axum::extract::State;
use axum::Json;

use crate::models::PropertyStats;
use crate::server::app::AppState;

pub async fn get_stats(State(state): State<AppState>) -> Json<PropertyStats> {
    Json(state.store.stats().await)
}
