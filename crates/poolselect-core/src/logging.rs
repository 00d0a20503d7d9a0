//! Tracing subscriber setup.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, LoggingConfig};

/// Installs the global tracing subscriber.
///
/// A valid `RUST_LOG` takes precedence over the configured level. If a
/// global subscriber is already installed this is a no-op.
///
/// # Errors
///
/// Returns an error if the configured level is not a valid filter directive,
/// whether or not `RUST_LOG` is set.
pub fn init_logging(config: &LoggingConfig) -> crate::Result<()> {
    let configured = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| crate::Error::Config(format!("invalid log level: {e}")))?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or(configured);

    let fmt_layer = tracing_subscriber::fmt::layer();

    // try_init fails only when a subscriber is already set.
    let _ = match config.format {
        LogFormat::Json => tracing_subscriber::registry().with(filter).with(fmt_layer.json()).try_init(),
        LogFormat::Pretty => tracing_subscriber::registry().with(filter).with(fmt_layer).try_init(),
    };

    Ok(())
}
