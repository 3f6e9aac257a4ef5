//! Application setup and router.

use std::sync::Arc;

use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::models::{Property, SearchFilters};
use crate::refresh::Refresher;
use crate::server::routes::{
    check_article4, create_property, delete_property, get_property, get_stats, health_handler,
    lha_rates, list_properties, recent_searches, refresh_properties, scrape_properties, search,
    update_property,
};
use crate::storage::{FilterPolicy, PropertyStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<PropertyStore>,
    pub refresher: Arc<Refresher>,
    pub policy: FilterPolicy,
}

impl AppState {
    pub fn new(store: Arc<PropertyStore>, refresher: Arc<Refresher>, policy: FilterPolicy) -> Self {
        Self {
            store,
            refresher,
            policy,
        }
    }

    /// Listing query: refill an empty store, then run the filter pipeline.
    pub async fn listings(&self, filters: &SearchFilters) -> Vec<Property> {
        self.refresher.ensure_populated().await;
        self.store.query(filters, &self.policy).await
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any);

    Router::new()
        .route("/api/properties", get(list_properties).post(create_property))
        .route("/api/properties/scrape", post(scrape_properties))
        .route("/api/properties/refresh", post(refresh_properties))
        .route(
            "/api/properties/:id",
            get(get_property).patch(update_property).delete(delete_property),
        )
        .route("/api/search", post(search))
        .route("/api/searches", get(recent_searches))
        .route("/api/stats", get(get_stats))
        .route("/api/check-article4", post(check_article4))
        .route("/api/lha-rates/:postcode", get(lha_rates))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
