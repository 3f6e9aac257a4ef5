use crate::models::NewProperty;
use crate::scrapers::types::SearchParams;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all listing sources.
/// The store and refresher only see this trait, so a real portal client can
/// replace the synthetic one without touching either.
#[async_trait]
pub trait ListingGenerator: Send + Sync {
    /// Produce candidate listings for the given criteria
    async fn generate(&self, params: &SearchParams) -> Result<Vec<NewProperty>>;

    /// Cities this source can produce listings for, in rotation order
    fn available_cities(&self) -> Vec<String>;

    /// Get the name of the source
    fn source_name(&self) -> &'static str;
}
