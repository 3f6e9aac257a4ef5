use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod filters;

pub use filters::{SearchFilters, SortBy};

/// Core property data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub address: String,
    pub postcode: String,
    /// Asking price in whole pounds
    pub price: u32,
    /// Floor area in square metres
    pub size: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub prime_location_url: Option<String>,
    pub description: Option<String>,
    pub has_garden: bool,
    pub has_parking: bool,
    /// Inside an Article 4 direction area
    pub is_article4: bool,
    pub yearly_profit: Option<i64>,
    pub left_in_deal: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// A property as produced by a generator or submitted by a client,
/// before the store assigns it an id and creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub address: String,
    pub postcode: String,
    pub price: u32,
    pub size: u32,
    pub bedrooms: u32,
    pub bathrooms: u32,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub prime_location_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub has_garden: bool,
    #[serde(default)]
    pub has_parking: bool,
    #[serde(default)]
    pub is_article4: bool,
    #[serde(default)]
    pub yearly_profit: Option<i64>,
    #[serde(default)]
    pub left_in_deal: Option<i64>,
}

impl NewProperty {
    /// Check the fields serde cannot check on its own.
    pub fn validate(&self) -> Result<(), String> {
        if self.address.trim().is_empty() {
            return Err("address must not be empty".to_string());
        }
        if self.postcode.trim().is_empty() {
            return Err("postcode must not be empty".to_string());
        }
        Ok(())
    }

    /// Attach identity and creation time.
    pub fn into_property(self, id: String, created_at: DateTime<Utc>) -> Property {
        Property {
            id,
            address: self.address,
            postcode: self.postcode,
            price: self.price,
            size: self.size,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            latitude: self.latitude,
            longitude: self.longitude,
            image_url: self.image_url,
            prime_location_url: self.prime_location_url,
            description: self.description,
            has_garden: self.has_garden,
            has_parking: self.has_parking,
            is_article4: self.is_article4,
            yearly_profit: self.yearly_profit,
            left_in_deal: self.left_in_deal,
            created_at,
        }
    }
}

/// Partial update. Absent or null fields leave the stored value alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyPatch {
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub price: Option<u32>,
    pub size: Option<u32>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub image_url: Option<String>,
    pub prime_location_url: Option<String>,
    pub description: Option<String>,
    pub has_garden: Option<bool>,
    pub has_parking: Option<bool>,
    pub is_article4: Option<bool>,
    pub yearly_profit: Option<i64>,
    pub left_in_deal: Option<i64>,
}

impl Property {
    /// Merge a patch over this record in place.
    pub fn apply(&mut self, patch: PropertyPatch) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }
        fn set_opt<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        set(&mut self.address, patch.address);
        set(&mut self.postcode, patch.postcode);
        set(&mut self.price, patch.price);
        set(&mut self.size, patch.size);
        set(&mut self.bedrooms, patch.bedrooms);
        set(&mut self.bathrooms, patch.bathrooms);
        set_opt(&mut self.latitude, patch.latitude);
        set_opt(&mut self.longitude, patch.longitude);
        set_opt(&mut self.image_url, patch.image_url);
        set_opt(&mut self.prime_location_url, patch.prime_location_url);
        set_opt(&mut self.description, patch.description);
        set(&mut self.has_garden, patch.has_garden);
        set(&mut self.has_parking, patch.has_parking);
        set(&mut self.is_article4, patch.is_article4);
        set_opt(&mut self.yearly_profit, patch.yearly_profit);
        set_opt(&mut self.left_in_deal, patch.left_in_deal);
    }
}

/// Aggregate figures over the current snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyStats {
    pub total_properties: usize,
    pub non_article4_properties: usize,
    pub average_price: f64,
    pub average_size: f64,
}

/// A saved search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Search {
    pub id: String,
    pub query: String,
    pub radius: u32,
    pub max_price: Option<u32>,
    pub min_size: Option<u32>,
    pub exclude_article4: bool,
    pub sort_by: Option<SortBy>,
    pub created_at: DateTime<Utc>,
}

/// Search submission. Defaults follow the saved-search table defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewSearch {
    pub query: String,
    pub radius: u32,
    #[serde(default = "default_search_max_price")]
    pub max_price: Option<u32>,
    #[serde(default = "default_search_min_size")]
    pub min_size: Option<u32>,
    #[serde(default = "default_exclude_article4")]
    pub exclude_article4: bool,
    #[serde(default)]
    pub sort_by: Option<SortBy>,
}

fn default_search_max_price() -> Option<u32> {
    Some(500_000)
}

fn default_search_min_size() -> Option<u32> {
    Some(90)
}

fn default_exclude_article4() -> bool {
    true
}

impl NewSearch {
    pub fn into_search(self, id: String, created_at: DateTime<Utc>) -> Search {
        Search {
            id,
            query: self.query,
            radius: self.radius,
            max_price: self.max_price,
            min_size: self.min_size,
            exclude_article4: self.exclude_article4,
            sort_by: self.sort_by,
            created_at,
        }
    }
}

impl From<&NewSearch> for SearchFilters {
    fn from(search: &NewSearch) -> Self {
        Self {
            query: search.query.clone(),
            radius: search.radius,
            max_price: search.max_price,
            min_size: search.min_size,
            exclude_article4: search.exclude_article4,
            sort_by: search.sort_by,
        }
    }
}
