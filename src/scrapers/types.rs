use serde::{Deserialize, Serialize};

/// Search parameters for listing generation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// City to search in
    pub city: String,
    /// Maximum price (GBP)
    pub max_price: u32,
    /// Minimum size in square meters
    pub min_area: u32,
}

impl SearchParams {
    pub fn for_city(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Default::default()
        }
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            city: "Birmingham".to_string(),
            max_price: 500_000,
            min_area: 90,
        }
    }
}
