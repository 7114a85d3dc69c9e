//! Restaurant types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A restaurant row as stored in the `restaurants` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub rating: f64,
    pub is_veg: bool,
    pub has_outdoor_seating: bool,
    pub is_luxury: bool,
    /// Stored columns without a typed field, keyed by column name
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Attribute filter for restaurants; every flag must match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestaurantFilter {
    pub is_veg: bool,
    pub has_outdoor_seating: bool,
    pub is_luxury: bool,
}
