use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// A single row of the `stocks` table. The id is assigned by the database and
// is ignored when a client sends one in a create or update body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Stock {
    #[serde(rename = "stockid", default)]
    #[sqlx(rename = "stockid")]
    pub stock_id: i64,
    pub name: String,
    pub price: f64,
    pub company: String,
}

/// Body returned by the create, update and delete handlers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockResponse {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

fn is_zero(id: &i64) -> bool {
    *id == 0
}

impl StockResponse {
    pub fn new(id: i64, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }

    pub fn created(id: i64) -> Self {
        Self::new(id, "stock created successfully")
    }

    pub fn updated(id: i64, rows_affected: u64) -> Self {
        Self::new(
            id,
            format!("stock updated successfully, rows affected: {}", rows_affected),
        )
    }

    pub fn deleted(id: i64, rows_affected: u64) -> Self {
        Self::new(
            id,
            format!("stock deleted successfully, rows affected: {}", rows_affected),
        )
    }
}
