use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::models::{NewProperty, Property, PropertyPatch, SearchFilters};
use crate::scrapers::SearchParams;
use crate::server::app::AppState;
use crate::server::extract::{ApiJson, ApiPath, ApiQuery, OptionalJson};

pub async fn list_properties(
    State(state): State<AppState>,
    ApiQuery(filters): ApiQuery<SearchFilters>,
) -> Json<Vec<Property>> {
    Json(state.listings(&filters).await)
}

pub async fn get_property(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<Json<Property>> {
    state
        .store
        .get(&id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound("Property"))
}

pub async fn create_property(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewProperty>,
) -> ApiResult<(StatusCode, Json<Property>)> {
    input.validate().map_err(ApiError::Validation)?;
    let property = state.store.create(input).await;
    Ok((StatusCode::CREATED, Json(property)))
}

pub async fn update_property(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<PropertyPatch>,
) -> ApiResult<Json<Property>> {
    state
        .store
        .update(&id, patch)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound("Property"))
}

pub async fn delete_property(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<StatusCode> {
    if state.store.delete(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("Property"))
    }
}

fn default_max_price() -> u32 {
    500_000
}

fn default_min_area() -> u32 {
    90
}

fn default_city() -> String {
    "Birmingham".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeRequest {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default = "default_max_price")]
    pub max_price: u32,
    #[serde(default = "default_min_area")]
    pub min_area: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeCriteria {
    pub city: String,
    pub max_price: u32,
    pub min_area: u32,
    pub excluded_article4: usize,
}

#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub message: String,
    pub properties: Vec<Property>,
    pub count: usize,
    pub criteria: ScrapeCriteria,
}

/// Generate listings for a city and make them the current snapshot
pub async fn scrape_properties(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ScrapeRequest>,
) -> ApiResult<Json<ScrapeResponse>> {
    let city = request
        .city
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| {
            ApiError::Validation("City is required for HMO property search".to_string())
        })?;

    info!(
        "Searching HMO properties in {} with max price £{} and min area {}sqm",
        city, request.max_price, request.min_area
    );

    let params = SearchParams {
        city: city.clone(),
        max_price: request.max_price,
        min_area: request.min_area,
    };
    let properties = state.refresher.refresh(&params).await.map_err(ApiError::Generator)?;
    let count = properties.len();
    let non_article4 = properties.iter().filter(|p| !p.is_article4).count();

    Ok(Json(ScrapeResponse {
        message: format!("Successfully found {} suitable HMO properties in {}", count, city),
        properties,
        count,
        criteria: ScrapeCriteria {
            city,
            max_price: request.max_price,
            min_area: request.min_area,
            excluded_article4: non_article4,
        },
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default = "default_city")]
    pub city: String,
    #[serde(default = "default_max_price")]
    pub max_price: u32,
    #[serde(default = "default_min_area")]
    pub min_area: u32,
}

impl Default for RefreshRequest {
    fn default() -> Self {
        Self {
            city: default_city(),
            max_price: default_max_price(),
            min_area: default_min_area(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub message: String,
    pub properties: Vec<Property>,
    pub count: usize,
}

/// Force a refresh now. An empty body refreshes the default city.
pub async fn refresh_properties(
    State(state): State<AppState>,
    OptionalJson(request): OptionalJson<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let request = request.unwrap_or_default();
    info!("Force refreshing properties for {}", request.city);

    let params = SearchParams {
        city: request.city.clone(),
        max_price: request.max_price,
        min_area: request.min_area,
    };
    state.refresher.refresh(&params).await.map_err(ApiError::Generator)?;

    let properties = state.store.list().await;
    let count = properties.len();
    Ok(Json(RefreshResponse {
        message: format!(
            "Successfully refreshed with {} new properties from {}",
            count, request.city
        ),
        properties,
        count,
    }))
}
