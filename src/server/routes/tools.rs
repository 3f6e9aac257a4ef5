//! Mock planning and rent lookups.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::scrapers::LhaRates;
use crate::server::extract::{ApiJson, ApiPath};

#[derive(Debug, Deserialize)]
pub struct Article4Request {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article4Response {
    pub latitude: f64,
    pub longitude: f64,
    pub is_article4: bool,
    pub message: String,
}

/// Article 4 lookup. There is no boundary data behind this: roughly one in
/// five locations comes back restricted.
pub async fn check_article4(
    ApiJson(request): ApiJson<Article4Request>,
) -> ApiResult<Json<Article4Response>> {
    let (Some(latitude), Some(longitude)) = (request.latitude, request.longitude) else {
        return Err(ApiError::Validation("Latitude and longitude required".to_string()));
    };

    let is_article4 = fastrand::f64() > 0.8;
    let message = if is_article4 {
        "Property is within an Article 4 direction area"
    } else {
        "Property is not within an Article 4 direction area"
    };

    Ok(Json(Article4Response {
        latitude,
        longitude,
        is_article4,
        message: message.to_string(),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LhaRatesResponse {
    pub postcode: String,
    pub rates: LhaRates,
    pub last_updated: DateTime<Utc>,
}

pub async fn lha_rates(ApiPath(postcode): ApiPath<String>) -> Json<LhaRatesResponse> {
    Json(LhaRatesResponse {
        rates: LhaRates::for_postcode(&postcode),
        postcode,
        last_updated: Utc::now(),
    })
}
