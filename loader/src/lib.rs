//! Dataset loading for the Univer tomato trial dashboard
//!
//! Reads the trial exports from a data directory or a static HTTP host and
//! hands them to the `trial-shared` pipeline.

pub mod config;
pub mod datasets;
pub mod error;
pub mod source;
pub mod summary;
pub mod telemetry;

use anyhow::Context;
use trial_shared::TrialDatasets;
use validator::Validate;

pub use config::Config;
pub use datasets::DatasetLoader;
pub use error::{LoadError, LoadResult};
pub use source::{DataSource, HttpSource};

/// Load `.env`, configuration and tracing, then every dataset
pub async fn bootstrap() -> anyhow::Result<(Config, TrialDatasets)> {
    dotenvy::dotenv().ok();
    let config = Config::load().map_err(LoadError::from)?;
    config.validate().map_err(LoadError::from)?;

    telemetry::init_tracing(&config.logging).context("Failed to initialise tracing")?;

    tracing::info!("Environment: {}", config.environment);

    let datasets = DatasetLoader::from_config(&config.data)
        .load_all()
        .await
        .context("Failed to load trial datasets")?;

    Ok((config, datasets))
}
