//! Tracing subscriber setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured filter.
///
/// Fails if a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| config.filter.as_str().into());

    tracing_subscriber::registry()
        .with(filter)
        .with(config.json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!config.json).then(tracing_subscriber::fmt::layer))
        .try_init()
}
