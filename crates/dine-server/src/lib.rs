//! Dine Catalog Server
//!
//! Read-only HTTP API over a SQLite catalog of restaurants and dishes.

pub mod config;
pub mod error;
pub mod handlers;
pub mod storage;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }
}

/// Build the HTTP router with CORS and request tracing
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(catalog_routes())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(handlers::restaurants::list))
        .route(
            "/restaurants/sort-by-rating",
            get(handlers::restaurants::sort_by_rating),
        )
        .route("/restaurants/filter", get(handlers::restaurants::filter))
        .route(
            "/restaurants/cuisine/:cuisine_name",
            get(handlers::restaurants::by_cuisine),
        )
        .route(
            "/restaurants/details/:id",
            get(handlers::restaurants::details),
        )
        .route("/dishes", get(handlers::dishes::list))
        .route("/dishes/sort-by-price", get(handlers::dishes::sort_by_price))
        .route("/dishes/filter", get(handlers::dishes::filter))
        .route("/dishes/details/:id", get(handlers::dishes::details))
}
