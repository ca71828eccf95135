//! Structured logging with tracing

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Initialize the global tracing subscriber.
///
/// The level comes from `RUST_LOG` when set, otherwise from
/// `logging.level`; the format (`json` or `pretty`) from `logging.format`.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.format == "json" {
        builder.json().try_init()?;
    } else {
        builder.pretty().try_init()?;
    }

    Ok(())
}
