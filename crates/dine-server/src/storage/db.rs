//! SQLite catalog queries (read-only, embedded)

use super::column::{extra_columns, StoredNumber};
use super::flag::{FlagEncoding, StoredFlag};
use anyhow::{Context, Result};
use dine_types::{Dish, DishFilter, Restaurant, RestaurantFilter};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Row, SqlitePool};
use std::sync::Arc;
use thiserror::Error;

/// Failure surfaced by the backing store during a query
#[derive(Error, Debug)]
#[error("store error: {0}")]
pub struct StoreError(#[from] sqlx::Error);

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Columns decoded into typed fields; anything else lands in `extra`
const RESTAURANT_COLUMNS: &[&str] = &[
    "id",
    "name",
    "cuisine",
    "rating",
    "isVeg",
    "hasOutdoorSeating",
    "isLuxury",
];
const DISH_COLUMNS: &[&str] = &["id", "name", "price", "isVeg"];

pub struct Database {
    pool: Arc<SqlitePool>,
    flag_encoding: FlagEncoding,
}

impl Database {
    /// Open an existing catalog file read-only.
    ///
    /// The first connection is established before returning, so a missing
    /// or unreadable file fails here instead of on the first request.
    pub async fn new(database_path: &str, max_connections: u32) -> Result<Self> {
        tracing::info!("Opening SQLite catalog at: {}", database_path);

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open SQLite catalog at: {}", database_path))?;

        tracing::info!("SQLite connection established");

        Ok(Self {
            pool: Arc::new(pool),
            flag_encoding: FlagEncoding::default(),
        })
    }

    /// Set how flag filter values are bound
    pub fn with_flag_encoding(mut self, flag_encoding: FlagEncoding) -> Self {
        self.flag_encoding = flag_encoding;
        self
    }

    /// Round trip to the store
    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&*self.pool).await?;
        Ok(())
    }

    /// Close every pooled connection; later queries fail with a [`StoreError`]
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // Restaurant queries
    pub async fn list_all_restaurants(&self) -> StoreResult<Vec<Restaurant>> {
        let rows: Vec<RestaurantRow> = sqlx::query_as("SELECT * FROM restaurants")
            .fetch_all(&*self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub async fn get_restaurant_by_id(&self, id: i64) -> StoreResult<Vec<Restaurant>> {
        let rows: Vec<RestaurantRow> = sqlx::query_as("SELECT * FROM restaurants WHERE id = ?1")
            .bind(id)
            .fetch_all(&*self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Exact, case-sensitive match on cuisine
    pub async fn get_restaurants_by_cuisine(&self, cuisine: &str) -> StoreResult<Vec<Restaurant>> {
        let rows: Vec<RestaurantRow> =
            sqlx::query_as("SELECT * FROM restaurants WHERE cuisine = ?1")
                .bind(cuisine)
                .fetch_all(&*self.pool)
                .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub async fn get_restaurants_by_filter(
        &self,
        filter: &RestaurantFilter,
    ) -> StoreResult<Vec<Restaurant>> {
        let query = sqlx::query_as(
            r#"
            SELECT * FROM restaurants
            WHERE isVeg = ?1 AND hasOutdoorSeating = ?2 AND isLuxury = ?3
            "#,
        );
        let query = self.flag_encoding.bind(query, filter.is_veg);
        let query = self.flag_encoding.bind(query, filter.has_outdoor_seating);
        let query = self.flag_encoding.bind(query, filter.is_luxury);

        let rows: Vec<RestaurantRow> = query.fetch_all(&*self.pool).await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Highest rating first
    pub async fn list_restaurants_by_rating(&self) -> StoreResult<Vec<Restaurant>> {
        let rows: Vec<RestaurantRow> =
            sqlx::query_as("SELECT * FROM restaurants ORDER BY rating DESC")
                .fetch_all(&*self.pool)
                .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    // Dish queries
    pub async fn list_all_dishes(&self) -> StoreResult<Vec<Dish>> {
        let rows: Vec<DishRow> = sqlx::query_as("SELECT * FROM dishes")
            .fetch_all(&*self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub async fn get_dish_by_id(&self, id: i64) -> StoreResult<Vec<Dish>> {
        let rows: Vec<DishRow> = sqlx::query_as("SELECT * FROM dishes WHERE id = ?1")
            .bind(id)
            .fetch_all(&*self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    pub async fn get_dishes_by_filter(&self, filter: &DishFilter) -> StoreResult<Vec<Dish>> {
        let query = sqlx::query_as("SELECT * FROM dishes WHERE isVeg = ?1");
        let query = self.flag_encoding.bind(query, filter.is_veg);

        let rows: Vec<DishRow> = query.fetch_all(&*self.pool).await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Cheapest first
    pub async fn list_dishes_by_price(&self) -> StoreResult<Vec<Dish>> {
        let rows: Vec<DishRow> = sqlx::query_as("SELECT * FROM dishes ORDER BY price ASC")
            .fetch_all(&*self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }
}

// Helper structs for sqlx query_as
struct RestaurantRow {
    id: i64,
    name: String,
    cuisine: String,
    rating: StoredNumber,
    is_veg: StoredFlag,
    has_outdoor_seating: StoredFlag,
    is_luxury: StoredFlag,
    extra: serde_json::Map<String, serde_json::Value>,
}

impl<'r> FromRow<'r, SqliteRow> for RestaurantRow {
    fn from_row(row: &'r SqliteRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(RestaurantRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            cuisine: row.try_get("cuisine")?,
            rating: row.try_get("rating")?,
            is_veg: row.try_get("isVeg")?,
            has_outdoor_seating: row.try_get("hasOutdoorSeating")?,
            is_luxury: row.try_get("isLuxury")?,
            extra: extra_columns(row, RESTAURANT_COLUMNS)?,
        })
    }
}

impl From<RestaurantRow> for Restaurant {
    fn from(r: RestaurantRow) -> Self {
        Restaurant {
            id: r.id,
            name: r.name,
            cuisine: r.cuisine,
            rating: r.rating.into(),
            is_veg: r.is_veg.into(),
            has_outdoor_seating: r.has_outdoor_seating.into(),
            is_luxury: r.is_luxury.into(),
            extra: r.extra,
        }
    }
}

struct DishRow {
    id: i64,
    name: String,
    price: StoredNumber,
    is_veg: StoredFlag,
    extra: serde_json::Map<String, serde_json::Value>,
}

impl<'r> FromRow<'r, SqliteRow> for DishRow {
    fn from_row(row: &'r SqliteRow) -> std::result::Result<Self, sqlx::Error> {
        Ok(DishRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            is_veg: row.try_get("isVeg")?,
            extra: extra_columns(row, DISH_COLUMNS)?,
        })
    }
}

impl From<DishRow> for Dish {
    fn from(r: DishRow) -> Self {
        Dish {
            id: r.id,
            name: r.name,
            price: r.price.into(),
            is_veg: r.is_veg.into(),
            extra: r.extra,
        }
    }
}
