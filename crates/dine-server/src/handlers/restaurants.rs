//! Restaurant handlers

use super::{first, non_empty, parse_id, require_flag};
use crate::error::ApiResult;
use crate::AppState;
use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use dine_types::{Restaurant, RestaurantFilter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct RestaurantListResponse {
    restaurants: Vec<Restaurant>,
}

#[derive(Debug, Serialize)]
pub struct RestaurantResponse {
    restaurant: Restaurant,
}

/// Cuisine lookups answer with the first match under the list key
#[derive(Debug, Serialize)]
pub struct CuisineResponse {
    restaurants: Restaurant,
}

/// Raw flag values; parsed in the handler so bad input gets a JSON envelope
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    is_veg: Option<String>,
    has_outdoor_seating: Option<String>,
    is_luxury: Option<String>,
}

impl FilterQuery {
    fn parse(&self) -> ApiResult<RestaurantFilter> {
        Ok(RestaurantFilter {
            is_veg: require_flag("isVeg", self.is_veg.as_deref())?,
            has_outdoor_seating: require_flag(
                "hasOutdoorSeating",
                self.has_outdoor_seating.as_deref(),
            )?,
            is_luxury: require_flag("isLuxury", self.is_luxury.as_deref())?,
        })
    }
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<RestaurantListResponse>> {
    let rows = state.db.list_all_restaurants().await?;
    let restaurants = non_empty(rows, || "No restaurants found".to_string())?;

    Ok(Json(RestaurantListResponse { restaurants }))
}

pub async fn sort_by_rating(
    State(state): State<AppState>,
) -> ApiResult<Json<RestaurantListResponse>> {
    let rows = state.db.list_restaurants_by_rating().await?;
    let restaurants = non_empty(rows, || "No restaurants found".to_string())?;

    Ok(Json(RestaurantListResponse { restaurants }))
}

pub async fn filter(
    State(state): State<AppState>,
    query: Result<Query<FilterQuery>, QueryRejection>,
) -> ApiResult<Json<RestaurantListResponse>> {
    let Query(query) = query?;
    let filter = query.parse()?;

    let rows = state.db.get_restaurants_by_filter(&filter).await?;
    let restaurants = non_empty(rows, || "No restaurants found".to_string())?;

    Ok(Json(RestaurantListResponse { restaurants }))
}

pub async fn by_cuisine(
    State(state): State<AppState>,
    cuisine_name: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<CuisineResponse>> {
    let Path(cuisine_name) = cuisine_name?;
    let rows = state.db.get_restaurants_by_cuisine(&cuisine_name).await?;
    let restaurant = first(rows, || {
        format!("No restaurant found with cuisine {}", cuisine_name)
    })?;

    Ok(Json(CuisineResponse {
        restaurants: restaurant,
    }))
}

pub async fn details(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<RestaurantResponse>> {
    let Path(id) = id?;
    let id = parse_id(&id)?;

    let rows = state.db.get_restaurant_by_id(id).await?;
    let restaurant = first(rows, || format!("No restaurant found with id {}", id))?;

    Ok(Json(RestaurantResponse { restaurant }))
}
