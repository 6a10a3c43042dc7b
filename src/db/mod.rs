use async_trait::async_trait;

use crate::models::Stock;

pub mod stock_queries;

pub use stock_queries::PgStockStore;

/// Data access for the `stocks` table. Each method issues exactly one
/// statement.
#[async_trait]
pub trait StockStore: Send + Sync {
    /// Inserts a row and returns the id the database assigned to it.
    async fn insert(&self, stock: &Stock) -> Result<i64, sqlx::Error>;

    /// Returns the zero-valued stock when no row matches.
    async fn get_by_id(&self, id: i64) -> Result<Stock, sqlx::Error>;

    async fn get_all(&self) -> Result<Vec<Stock>, sqlx::Error>;

    /// Overwrites every column of the matching row. Returns rows affected.
    async fn update(&self, id: i64, stock: &Stock) -> Result<u64, sqlx::Error>;

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error>;
}
