//! Health check

use crate::error::ApiResult;
use crate::AppState;
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Liveness plus a round trip to the catalog
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    state.db.ping().await?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    }))
}
