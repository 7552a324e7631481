//! Logging initialization
//!
//! Structured logging via `tracing`. The filter comes from `RUST_LOG` when
//! set, otherwise from `logging.level` in the configuration.

use crate::config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| anyhow::anyhow!("invalid log filter '{}': {e}", config.level))?;

    let registry = tracing_subscriber::registry().with(filter);

    match config.format.as_str() {
        "json" => registry.with(fmt::layer().json()).try_init()?,
        _ => registry.with(fmt::layer()).try_init()?,
    }

    Ok(())
}
