use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use dine_server::storage::Database;
use dine_server::{router, AppState};
use http_body_util::BodyExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::Executor;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt; // for oneshot

pub const CATALOG: &str = include_str!("../../fixtures/catalog.sql");

pub struct TestApp {
    // Keeps the catalog file alive for the duration of the test
    _dir: TempDir,
    pub db: Arc<Database>,
    pub app: Router,
}

/// Write `sql` into a fresh catalog file and serve it
pub async fn spawn_app(sql: &str) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.sqlite");
    let path = path.to_str().unwrap().to_string();

    let writer = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::new()
                .filename(&path)
                .create_if_missing(true),
        )
        .await
        .unwrap();
    writer.execute(sql).await.unwrap();
    writer.close().await;

    let state = AppState::new(Database::new(&path, 4).await.unwrap());
    let db = state.db.clone();

    TestApp {
        _dir: dir,
        db,
        app: router(state),
    }
}

pub async fn seeded_app() -> TestApp {
    spawn_app(CATALOG).await
}

/// Issue a GET and decode the JSON body
pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "non-JSON body for {}: {} ({})",
            uri,
            String::from_utf8_lossy(&bytes),
            e
        )
    });

    (status, body)
}
