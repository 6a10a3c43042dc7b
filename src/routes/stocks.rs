use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{Stock, StockResponse};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_stocks).post(create_stock))
        .route("/:id", get(get_stock).put(update_stock).delete(delete_stock))
}

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|e| {
        error!("Unable to convert {:?} into a stock id: {}", raw, e);
        AppError::InvalidInput(e.to_string())
    })
}

// The body is decoded by hand so that every malformed payload is a 400,
// whatever the content type.
fn decode_stock(body: &[u8]) -> Result<Stock, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        error!("Unable to decode the request body: {}", e);
        AppError::Decode(e)
    })
}

pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Stock>, AppError> {
    let id = parse_id(&id)?;
    info!("GET /stock/{} - Fetching stock", id);
    let stock = state.store.get_by_id(id).await.map_err(|e| {
        error!("Unable to get stock {}: {}", id, e);
        AppError::Persistence(e)
    })?;
    Ok(Json(stock))
}

pub async fn get_all_stocks(
    State(state): State<AppState>,
) -> Result<Json<Vec<Stock>>, AppError> {
    info!("GET /stock - Fetching all stocks");
    let stocks = state.store.get_all().await.map_err(|e| {
        error!("Unable to get all stocks: {}", e);
        AppError::Persistence(e)
    })?;
    Ok(Json(stocks))
}

pub async fn create_stock(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StockResponse>, AppError> {
    info!("POST /stock - Creating stock");
    let stock = decode_stock(&body)?;
    let id = state.store.insert(&stock).await.map_err(|e| {
        error!("Unable to create stock: {}", e);
        AppError::Persistence(e)
    })?;
    Ok(Json(StockResponse::created(id)))
}

/// Answers 400 for a bad id, a bad body, or a failed update statement.
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<StockResponse>, AppError> {
    let id = parse_id(&id)?;
    info!("PUT /stock/{} - Updating stock", id);
    let stock = decode_stock(&body)?;
    let rows = state.store.update(id, &stock).await.map_err(|e| {
        error!("Unable to update stock {}: {}", id, e);
        AppError::UpdateRejected(e)
    })?;
    Ok(Json(StockResponse::updated(id, rows)))
}

pub async fn delete_stock(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StockResponse>, AppError> {
    let id = parse_id(&id)?;
    info!("DELETE /stock/{} - Deleting stock", id);
    let rows = state.store.delete(id).await.map_err(|e| {
        error!("Unable to delete stock {}: {}", id, e);
        AppError::Persistence(e)
    })?;
    Ok(Json(StockResponse::deleted(id, rows)))
}
