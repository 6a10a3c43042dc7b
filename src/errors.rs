use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unable to convert the string into int: {0}")]
    InvalidInput(String),
    #[error("Unable to decode the request body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),
    #[error("Unable to update stock: {0}")]
    UpdateRejected(sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Decode(_) => StatusCode::BAD_REQUEST,
            AppError::UpdateRejected(_) => StatusCode::BAD_REQUEST,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status(), self.to_string()).into_response()
    }
}
