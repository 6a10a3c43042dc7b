use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{Connection, FromRow, PgConnection};
use tracing::{info, warn};

use super::StockStore;
use crate::models::Stock;

const INSERT_STOCK: &str = "INSERT INTO stocks (name, price, company)
    VALUES ($1, $2, $3)
    RETURNING stockid::BIGINT";

// Ids and prices are cast so integer and NUMERIC columns decode as well.
const SELECT_STOCK: &str = "SELECT stockid::BIGINT AS stockid, name,
        price::DOUBLE PRECISION AS price, company
    FROM stocks
    WHERE stockid = $1";

const SELECT_ALL_STOCKS: &str = "SELECT stockid::BIGINT AS stockid, name,
        price::DOUBLE PRECISION AS price, company
    FROM stocks
    ORDER BY stockid";

const UPDATE_STOCK: &str = "UPDATE stocks
    SET name = $2, price = $3, company = $4
    WHERE stockid = $1";

const DELETE_STOCK: &str = "DELETE FROM stocks WHERE stockid = $1";

/// Postgres-backed store. Every call opens its own connection and closes it
/// before returning, whatever the outcome.
#[derive(Debug, Clone)]
pub struct PgStockStore {
    database_url: String,
}

impl PgStockStore {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Opens a connection, pings the server and closes it again.
    pub async fn check_connection(&self) -> Result<(), sqlx::Error> {
        let mut conn = self.connect().await?;
        let result = conn.ping().await;
        release(conn).await;
        result?;
        info!("Successfully connected to Postgres");
        Ok(())
    }

    async fn connect(&self) -> Result<PgConnection, sqlx::Error> {
        PgConnection::connect(&self.database_url).await
    }
}

async fn release(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        warn!("Failed to close database connection: {}", e);
    }
}

async fn scan_all(conn: &mut PgConnection) -> Result<Vec<Stock>, sqlx::Error> {
    let mut stocks = Vec::new();
    let mut rows = sqlx::query(SELECT_ALL_STOCKS).fetch(conn);

    while let Some(row) = rows.try_next().await? {
        match Stock::from_row(&row) {
            Ok(stock) => stocks.push(stock),
            Err(e) => warn!("Unable to scan stock row, skipping: {}", e),
        }
    }

    Ok(stocks)
}

#[async_trait]
impl StockStore for PgStockStore {
    async fn insert(&self, stock: &Stock) -> Result<i64, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result = sqlx::query_scalar::<_, i64>(INSERT_STOCK)
            .bind(&stock.name)
            .bind(stock.price)
            .bind(&stock.company)
            .fetch_one(&mut conn)
            .await;
        release(conn).await;

        let id = result?;
        info!("Inserted stock {}", id);
        Ok(id)
    }

    async fn get_by_id(&self, id: i64) -> Result<Stock, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result = sqlx::query_as::<_, Stock>(SELECT_STOCK)
            .bind(id)
            .fetch_optional(&mut conn)
            .await;
        release(conn).await;

        match result? {
            Some(stock) => Ok(stock),
            None => {
                info!("No stock found with id {}", id);
                Ok(Stock::default())
            }
        }
    }

    async fn get_all(&self) -> Result<Vec<Stock>, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result = scan_all(&mut conn).await;
        release(conn).await;
        result
    }

    async fn update(&self, id: i64, stock: &Stock) -> Result<u64, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(UPDATE_STOCK)
            .bind(id)
            .bind(&stock.name)
            .bind(stock.price)
            .bind(&stock.company)
            .execute(&mut conn)
            .await;
        release(conn).await;

        let rows = result?.rows_affected();
        info!("Updated stock {}, rows affected: {}", id, rows);
        Ok(rows)
    }

    async fn delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(DELETE_STOCK)
            .bind(id)
            .execute(&mut conn)
            .await;
        release(conn).await;

        let rows = result?.rows_affected();
        info!("Deleted stock {}, rows affected: {}", id, rows);
        Ok(rows)
    }
}
