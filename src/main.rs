use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use stocks_api::app;
use stocks_api::config::Config;
use stocks_api::db::PgStockStore;
use stocks_api::logging::{self, LoggingConfig};
use stocks_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let logging_config = LoggingConfig::from_env().context("invalid logging configuration")?;
    logging::init_logging(&logging_config).context("failed to initialize logging")?;

    let config = Config::from_env().context("invalid configuration")?;

    let store = PgStockStore::new(config.database_url.clone());
    store
        .check_connection()
        .await
        .context("unable to reach Postgres at startup")?;

    let state = AppState::new(Arc::new(store));
    let app = app::create_app(state, config.request_timeout);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    tracing::info!("Starting server on http://{}/", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
