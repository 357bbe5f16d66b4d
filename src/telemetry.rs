//! Structured logging setup.

use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Neither `RUST_LOG` nor the configured level is a valid filter.
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Builds the log filter, preferring `RUST_LOG` over `log_level`.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when `RUST_LOG` is unusable and
/// `log_level` does not parse.
pub fn filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(TelemetryError::from)
}

/// Installs the global formatting subscriber.
///
/// # Errors
///
/// Returns an error when the filter does not parse or a subscriber is
/// already installed.
pub fn init(log_level: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(filter(log_level)?)
        .with(fmt::layer())
        .try_init()?;
    Ok(())
}
