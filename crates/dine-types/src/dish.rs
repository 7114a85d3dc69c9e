//! Dish types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A dish row as stored in the `dishes` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub is_veg: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Attribute filter for dishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DishFilter {
    pub is_veg: bool,
}
