//! In-memory property store.
//!
//! One `PropertyStore` per process, shared through `Arc`. Every mutation runs
//! under the write lock, so readers only ever see whole snapshots.

pub mod query;
pub mod stats;

use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{
    NewProperty, NewSearch, Property, PropertyPatch, PropertyStats, Search, SearchFilters,
};

pub use query::FilterPolicy;

/// Current listings plus the saved-search history
#[derive(Default)]
pub struct PropertyStore {
    properties: RwLock<IndexMap<String, Property>>,
    searches: RwLock<Vec<Search>>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl PropertyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &str) -> Option<Property> {
        self.properties.read().await.get(id).cloned()
    }

    /// All current records. Insertion order, though callers should not rely on it.
    pub async fn list(&self) -> Vec<Property> {
        self.properties.read().await.values().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.properties.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.properties.read().await.is_empty()
    }

    pub async fn create(&self, input: NewProperty) -> Property {
        let property = input.into_property(new_id(), Utc::now());
        self.properties
            .write()
            .await
            .insert(property.id.clone(), property.clone());
        debug!(id = %property.id, "Created property");
        property
    }

    /// Merge `patch` over the stored record. `None` if the id is unknown.
    pub async fn update(&self, id: &str, patch: PropertyPatch) -> Option<Property> {
        let mut properties = self.properties.write().await;
        let property = properties.get_mut(id)?;
        property.apply(patch);
        Some(property.clone())
    }

    /// Returns whether a record was removed.
    pub async fn delete(&self, id: &str) -> bool {
        self.properties.write().await.shift_remove(id).is_some()
    }

    pub async fn clear(&self) {
        self.properties.write().await.clear();
    }

    /// Swap the whole snapshot in one step and return the stored records.
    pub async fn replace_all(&self, inputs: Vec<NewProperty>) -> Vec<Property> {
        let created_at = Utc::now();
        let fresh: IndexMap<String, Property> = inputs
            .into_iter()
            .map(|input| {
                let property = input.into_property(new_id(), created_at);
                (property.id.clone(), property)
            })
            .collect();
        let stored: Vec<Property> = fresh.values().cloned().collect();

        *self.properties.write().await = fresh;

        info!("Replaced store contents with {} properties", stored.len());
        stored
    }

    /// Answer a listing query against the current snapshot.
    pub async fn query(&self, filters: &SearchFilters, policy: &FilterPolicy) -> Vec<Property> {
        let snapshot = self.list().await;
        query::run(&snapshot, filters, policy)
    }

    pub async fn stats(&self) -> PropertyStats {
        let snapshot = self.list().await;
        stats::compute(&snapshot)
    }

    pub async fn create_search(&self, input: NewSearch) -> Search {
        let search = input.into_search(new_id(), Utc::now());
        self.searches.write().await.push(search.clone());
        search
    }

    /// Most recent searches first
    pub async fn recent_searches(&self, limit: usize) -> Vec<Search> {
        let mut searches: Vec<Search> = self.searches.read().await.iter().rev().cloned().collect();
        searches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        searches.truncate(limit);
        searches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::listing;
    use std::collections::HashSet;

    #[tokio::test]
    async fn create_assigns_unique_ids() {
        let store = PropertyStore::new();
        let a = store.create(listing("1 Mill Lane", 1, 1)).await;
        let b = store.create(listing("1 Mill Lane", 1, 1)).await;

        assert_ne!(a.id, b.id);
        assert_eq!(store.get(&a.id).await, Some(a));
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let store = PropertyStore::new();
        assert!(store.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn update_merges_and_reports_missing() {
        let store = PropertyStore::new();
        let created = store.create(listing("1 Mill Lane", 250_000, 100)).await;

        let unchanged = store.update(&created.id, PropertyPatch::default()).await;
        assert_eq!(unchanged.as_ref(), Some(&created));

        let updated = store
            .update(
                &created.id,
                PropertyPatch {
                    price: Some(240_000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.price, 240_000);
        assert_eq!(updated.address, created.address);
        assert_eq!(store.get(&created.id).await, Some(updated));

        assert!(store.update("missing", PropertyPatch::default()).await.is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_removed() {
        let store = PropertyStore::new();
        let created = store.create(listing("1 Mill Lane", 1, 1)).await;

        assert!(store.delete(&created.id).await);
        assert!(!store.delete(&created.id).await);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn clear_empties_store() {
        let store = PropertyStore::new();
        store.create(listing("1 Mill Lane", 1, 1)).await;
        store.clear().await;
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn replace_all_swaps_contents() {
        let store = PropertyStore::new();
        let old = store.create(listing("Old Road", 1, 1)).await;

        let stored = store
            .replace_all(vec![listing("A Street", 1, 1), listing("B Street", 2, 2)])
            .await;

        assert!(store.get(&old.id).await.is_none());
        let addresses: HashSet<String> =
            store.list().await.into_iter().map(|p| p.address).collect();
        assert_eq!(addresses, HashSet::from(["A Street".to_string(), "B Street".to_string()]));
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn stats_on_empty_store_are_zero() {
        let stats = PropertyStore::new().stats().await;
        assert_eq!(stats.total_properties, 0);
        assert_eq!(stats.average_price, 0.0);
    }

    #[tokio::test]
    async fn recent_searches_newest_first_and_limited() {
        let store = PropertyStore::new();
        for query in ["leeds", "manchester", "birmingham"] {
            store
                .create_search(NewSearch {
                    query: query.to_string(),
                    radius: 10,
                    max_price: None,
                    min_size: None,
                    exclude_article4: false,
                    sort_by: None,
                })
                .await;
        }

        let recent = store.recent_searches(2).await;
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].query, "birmingham");
        assert_eq!(recent[1].query, "manchester");
    }
}
