use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{parse_or, ConfigError};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter {filter:?}: {source}")]
    Filter {
        filter: String,
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("unable to install the global subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
    #[error("invalid LOKI_URL: {0}")]
    LokiUrl(#[from] url::ParseError),
    #[error("unable to build the Loki layer: {0}")]
    Loki(String),
}

/// Where the service's logs go. Read from `RUST_LOG`, `LOKI_ENABLED`,
/// `LOKI_URL`, `SERVICE_NAME` and `ENVIRONMENT`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub filter: String,
    pub loki: Option<LokiTarget>,
}

/// Loki push endpoint plus the labels attached to every stream.
#[derive(Debug, Clone, PartialEq)]
pub struct LokiTarget {
    pub url: String,
    pub service: String,
    pub environment: String,
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let filter = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let loki = if parse_or(&lookup, "LOKI_ENABLED", false)? {
            Some(LokiTarget {
                url: lookup("LOKI_URL").ok_or(ConfigError::Missing("LOKI_URL"))?,
                service: lookup("SERVICE_NAME").unwrap_or_else(|| "stocks-api".to_string()),
                environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            })
        } else {
            None
        };

        Ok(Self { filter, loki })
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        EnvFilter::try_new(&self.filter).map_err(|source| LoggingError::Filter {
            filter: self.filter.clone(),
            source,
        })
    }
}

/// Installs the global subscriber. With a Loki target this must run inside
/// the tokio runtime, which drives the shipping task.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = config.env_filter()?;

    match &config.loki {
        #[cfg(feature = "loki")]
        Some(target) => {
            let url = url::Url::parse(&target.url)?;
            let (loki_layer, task) = tracing_loki::builder()
                .label("service", &target.service)
                .and_then(|b| b.label("environment", &target.environment))
                .and_then(|b| b.build_url(url))
                .map_err(|e| LoggingError::Loki(e.to_string()))?;
            tokio::spawn(task);

            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .with(loki_layer)
                .try_init()?;
            tracing::info!("Shipping logs for {} to Loki at {}", target.service, target.url);
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .try_init()?;
            if config.loki.is_some() {
                tracing::warn!("LOKI_ENABLED is set but the loki feature is off, logging to stdout only");
            }
        }
    }

    Ok(())
}
