use serde::{Deserialize, Serialize};

/// Result ordering requested by the client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Yearly profit, highest first
    Profit,
    /// Price, cheapest first
    Price,
    /// Size, largest first
    Size,
    /// Creation time, newest first
    Recent,
}

/// Query-time filters for a listing search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Free text matched against address, postcode and description
    #[serde(default)]
    pub query: String,
    /// Search radius in miles. Carried for clients, not used for filtering.
    #[serde(default = "default_radius")]
    pub radius: u32,
    #[serde(default)]
    pub max_price: Option<u32>,
    #[serde(default)]
    pub min_size: Option<u32>,
    #[serde(default)]
    pub exclude_article4: bool,
    #[serde(default)]
    pub sort_by: Option<SortBy>,
}

fn default_radius() -> u32 {
    10
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: String::new(),
            radius: default_radius(),
            max_price: None,
            min_size: None,
            exclude_article4: false,
            sort_by: None,
        }
    }
}
