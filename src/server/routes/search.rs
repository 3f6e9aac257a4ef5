use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::{NewSearch, Property, Search, SearchFilters};
use crate::server::app::AppState;
use crate::server::extract::{ApiJson, ApiQuery};

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search: Search,
    pub properties: Vec<Property>,
    pub count: usize,
}

/// Save the search, then answer it like a listing query
pub async fn search(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewSearch>,
) -> Json<SearchResponse> {
    let filters = SearchFilters::from(&input);
    let search = state.store.create_search(input).await;
    let properties = state.listings(&filters).await;

    Json(SearchResponse {
        search,
        count: properties.len(),
        properties,
    })
}

#[derive(Debug, Deserialize)]
pub struct RecentSearchesQuery {
    pub limit: Option<usize>,
}

pub async fn recent_searches(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<RecentSearchesQuery>,
) -> Json<Vec<Search>> {
    Json(state.store.recent_searches(query.limit.unwrap_or(10)).await)
}
