use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::routes::{health, stocks};
use crate::state::AppState;

pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/stock", stocks::router())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
