use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use hmo_scout::models::NewProperty;
use hmo_scout::refresh::{RefreshSettings, Refresher};
use hmo_scout::scrapers::{ListingGenerator, SearchParams, SyntheticGenerator};
use hmo_scout::server::{build_app, AppState};
use hmo_scout::storage::{FilterPolicy, PropertyStore};
use serde_json::{json, Value};
use tower::ServiceExt;

fn listing(address: &str, price: u32, size: u32) -> NewProperty {
    serde_json::from_value(json!({
        "address": address,
        "postcode": "B12 9QY",
        "price": price,
        "size": size,
        "bedrooms": 4,
        "bathrooms": 2
    }))
    .unwrap()
}

struct FixedGenerator;

#[async_trait]
impl ListingGenerator for FixedGenerator {
    async fn generate(&self, params: &SearchParams) -> Result<Vec<NewProperty>> {
        Ok((0..9)
            .map(|i| {
                let address = format!("{} Moseley Road, {}", i + 1, params.city);
                listing(&address, 200_000 + i * 10_000, 100)
            })
            .collect())
    }

    fn available_cities(&self) -> Vec<String> {
        vec!["Birmingham".into()]
    }

    fn source_name(&self) -> &'static str {
        "Fixed"
    }
}

struct FailingGenerator;

#[async_trait]
impl ListingGenerator for FailingGenerator {
    async fn generate(&self, _params: &SearchParams) -> Result<Vec<NewProperty>> {
        anyhow::bail!("portal unreachable")
    }

    fn available_cities(&self) -> Vec<String> {
        Vec::new()
    }

    fn source_name(&self) -> &'static str {
        "Failing"
    }
}

fn app_with(generator: Arc<dyn ListingGenerator>) -> (Router, Arc<PropertyStore>) {
    let store = Arc::new(PropertyStore::new());
    let refresher = Arc::new(Refresher::new(store.clone(), generator, RefreshSettings::default()));
    let app = build_app(AppState::new(store.clone(), refresher, FilterPolicy::default()));
    (app, store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn listing_an_empty_store_refills_it() {
    let (app, store) = app_with(Arc::new(FixedGenerator));

    let (status, body) = send(&app, Method::GET, "/api/properties", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 9);
    assert_eq!(store.len().await, 9);
}

#[tokio::test]
async fn listing_falls_back_to_sample_when_generator_fails() {
    let (app, _store) = app_with(Arc::new(FailingGenerator));

    let (status, body) = send(&app, Method::GET, "/api/properties", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn listing_applies_filters_and_sort() {
    let (app, store) = app_with(Arc::new(FailingGenerator));
    store
        .replace_all(vec![
            listing("1 High Street", 450_000, 100),
            listing("2 High Street", 150_000, 100),
            listing("3 High Street", 300_000, 100),
            listing("4 High Street", 900_000, 100),
            listing("5 High Street", 250_000, 100),
            listing("6 High Street", 800_000, 100),
            listing("7 High Street", 350_000, 100),
        ])
        .await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/properties?maxPrice=300000&sortBy=price&excludeArticle4=true",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let prices: Vec<u64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_u64().unwrap())
        .collect();
    // ceiling 350k keeps four, backfill pads with the excluded records in order
    assert_eq!(prices, vec![150_000, 250_000, 300_000, 350_000, 450_000, 900_000]);
}

#[tokio::test]
async fn malformed_filters_are_rejected() {
    let (app, _store) = app_with(Arc::new(FixedGenerator));

    let (status, body) = send(&app, Method::GET, "/api/properties?maxPrice=cheap", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request");

    let (status, _) = send(&app, Method::GET, "/api/properties?sortBy=colour", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn property_crud_round() {
    let (app, _store) = app_with(Arc::new(FixedGenerator));

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/properties",
        Some(json!({
            "address": "12 Brudenell Road, Leeds",
            "postcode": "LS6 1BD",
            "price": 289000,
            "size": 98,
            "bedrooms": 4,
            "bathrooms": 1,
            "description": "Mid-terrace student let"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["isArticle4"], false);

    let (status, fetched) = send(&app, Method::GET, &format!("/api/properties/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &format!("/api/properties/{}", id),
        Some(json!({ "price": 275000, "description": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 275000);
    assert_eq!(updated["description"], "Mid-terrace student let");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/properties/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/properties/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Property not found");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/properties/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_property_input_is_rejected() {
    let (app, store) = app_with(Arc::new(FixedGenerator));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/properties",
        Some(json!({ "address": "1 Mill Lane" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/properties",
        Some(json!({
            "address": " ",
            "postcode": "B1 1AA",
            "price": 1,
            "size": 1,
            "bedrooms": 1,
            "bathrooms": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "address must not be empty");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn update_unknown_property_is_not_found() {
    let (app, _store) = app_with(Arc::new(FixedGenerator));

    let (status, _) = send(&app, Method::PATCH, "/api/properties/nope", Some(json!({}))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_reflect_snapshot() {
    let (app, store) = app_with(Arc::new(FixedGenerator));

    let (_, empty) = send(&app, Method::GET, "/api/stats", None).await;
    assert_eq!(
        empty,
        json!({
            "totalProperties": 0,
            "nonArticle4Properties": 0,
            "averagePrice": 0.0,
            "averageSize": 0.0
        })
    );

    store
        .replace_all(vec![
            listing("1 Mill Lane", 200_000, 90),
            listing("2 Mill Lane", 400_000, 110),
        ])
        .await;

    let (status, stats) = send(&app, Method::GET, "/api/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalProperties"], 2);
    assert_eq!(stats["averagePrice"], 300_000.0);
    assert_eq!(stats["averageSize"], 100.0);
}

#[tokio::test]
async fn scrape_requires_city_and_replaces_snapshot() {
    let (app, store) = app_with(Arc::new(FixedGenerator));
    let old = store.create(listing("Old Road", 1, 1)).await;

    let (status, body) = send(&app, Method::POST, "/api/properties/scrape", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "City is required for HMO property search");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/properties/scrape",
        Some(json!({ "city": "Leeds", "maxPrice": 400000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 9);
    assert_eq!(body["criteria"]["city"], "Leeds");
    assert_eq!(body["criteria"]["minArea"], 90);
    assert!(store.get(&old.id).await.is_none());
}

#[tokio::test]
async fn scrape_with_huge_min_area_succeeds() {
    let (app, _store) = app_with(Arc::new(SyntheticGenerator::with_seed(11)));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/properties/scrape",
        Some(json!({ "city": "Leeds", "minArea": u32::MAX })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["properties"]
        .as_array()
        .unwrap()
        .iter()
        .all(|p| p["size"] == u32::MAX));
}

#[tokio::test]
async fn malformed_refresh_body_is_rejected() {
    let (app, store) = app_with(Arc::new(FixedGenerator));
    let kept = store.create(listing("Kept Road", 1, 1)).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/properties/refresh",
        Some(json!({ "city": "Leeds", "maxPrice": "cheap" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request");
    assert_eq!(store.list().await, vec![kept]);
}

#[tokio::test]
async fn failed_refresh_keeps_listings() {
    let (app, store) = app_with(Arc::new(FailingGenerator));
    store.create(listing("Kept Road", 1, 1)).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/properties/refresh",
        Some(json!({ "city": "Leeds" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("portal unreachable"));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn refresh_without_body_uses_defaults() {
    let (app, _store) = app_with(Arc::new(FixedGenerator));

    let (status, body) = send(&app, Method::POST, "/api/properties/refresh", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 9);
    assert!(body["message"].as_str().unwrap().ends_with("from Birmingham"));
}

#[tokio::test]
async fn searches_are_saved_and_listed() {
    let (app, _store) = app_with(Arc::new(FixedGenerator));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/search",
        Some(json!({ "query": "moseley", "radius": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["search"]["excludeArticle4"], true);
    assert_eq!(body["count"], body["properties"].as_array().unwrap().len());

    let (status, searches) = send(&app, Method::GET, "/api/searches?limit=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(searches.as_array().unwrap().len(), 1);
    assert_eq!(searches[0]["query"], "moseley");
}

#[tokio::test]
async fn article4_check_needs_coordinates() {
    let (app, _store) = app_with(Arc::new(FixedGenerator));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/check-article4",
        Some(json!({ "latitude": 52.48 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/check-article4",
        Some(json!({ "latitude": 52.48, "longitude": -1.89 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["isArticle4"].is_boolean());
}

#[tokio::test]
async fn lha_rates_by_postcode() {
    let (app, _store) = app_with(Arc::new(FixedGenerator));

    let (status, body) = send(&app, Method::GET, "/api/lha-rates/B3%202TA", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["postcode"], "B3 2TA");
    assert_eq!(body["rates"]["oneRoom"], 320);
}

#[tokio::test]
async fn health_reports_store_size() {
    let (app, store) = app_with(Arc::new(FixedGenerator));
    store.create(listing("1 Mill Lane", 1, 1)).await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["properties"], 1);
    assert_eq!(body["refresh"]["inFlight"], false);
}
