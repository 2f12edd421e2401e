//! Tracing initialization
//!
//! Console logging with an environment-driven filter. `RUST_LOG` wins over
//! the configured filter when set.

use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    Init(String),
}

/// Install the global tracing subscriber
///
/// `filter` is a tracing directive string such as `"info"` or
/// `"lekgotla=debug,reqwest=warn"`.
pub fn init_telemetry(filter: &str) -> Result<(), TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))
}
