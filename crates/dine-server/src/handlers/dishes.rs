//! Dish handlers

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
use dine_types::{Dish, DishFilter};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct DishListResponse {
    dishes: Vec<Dish>,
}

#[derive(Debug, Serialize)]
pub struct DishResponse {
    dish: Dish,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    is_veg: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Json<DishListResponse>> {
    let rows = state.db.list_all_dishes().await?;
    let dishes = non_empty(rows, || "No dishes found".to_string())?;

    Ok(Json(DishListResponse { dishes }))
}

pub async fn sort_by_price(State(state): State<AppState>) -> ApiResult<Json<DishListResponse>> {
    let rows = state.db.list_dishes_by_price().await?;
    let dishes = non_empty(rows, || "No dishes found".to_string())?;

    Ok(Json(DishListResponse { dishes }))
}

pub async fn filter(
    State(state): State<AppState>,
    query: Result<Query<FilterQuery>, QueryRejection>,
) -> ApiResult<Json<DishListResponse>> {
    let Query(query) = query?;
    let filter = DishFilter {
        is_veg: require_flag("isVeg", query.is_veg.as_deref())?,
    };

    let rows = state.db.get_dishes_by_filter(&filter).await?;
    let dishes = non_empty(rows, || "No dishes found".to_string())?;

    Ok(Json(DishListResponse { dishes }))
}

pub async fn details(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<DishResponse>> {
    let Path(id) = id?;
    let id = parse_id(&id)?;

    let rows = state.db.get_dish_by_id(id).await?;
    let dish = first(rows, || format!("No dish found with id {}", id))?;

    Ok(Json(DishResponse { dish }))
}
