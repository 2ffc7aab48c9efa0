//! Configuration for the trial data loader
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (config/development.toml, config/production.toml)
//! 3. Environment variable overrides with TRIAL__ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use trial_shared::AccessLevel;
use validator::{Validate, ValidationError};

/// Main loader configuration
#[derive(Debug, Deserialize, Clone, Validate)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Where the datasets are read from
    #[validate]
    pub data: DataConfig,

    /// Tracing output
    pub logging: LoggingConfig,

    /// Dashboard view settings
    #[validate]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct DataConfig {
    /// Local directory holding the dataset files
    #[validate(length(min = 1))]
    pub dir: String,

    /// When set, datasets are fetched over HTTP instead of read from `dir`
    #[validate(url)]
    pub base_url: Option<String>,

    /// Primary spreadsheet export (vine retention)
    #[validate(length(min = 1))]
    pub primary_file: String,

    /// Sugar-content export
    #[validate(length(min = 1))]
    pub brix_file: String,

    /// 50-plant Lakitelek subplot export
    #[validate(length(min = 1))]
    pub subplot_file: String,

    /// Cumulative yield by trial location
    #[validate(length(min = 1))]
    pub cumulative_file: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directives, used when `RUST_LOG` is unset
    pub filter: String,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct DashboardConfig {
    /// Access level the summary is rendered for
    #[validate(custom = "validate_access_level")]
    pub access_level: String,
}

impl DashboardConfig {
    pub fn access_level(&self) -> AccessLevel {
        AccessLevel::parse(&self.access_level)
    }
}

fn validate_access_level(value: &str) -> Result<(), ValidationError> {
    if AccessLevel::parse(value).is_authenticated() {
        Ok(())
    } else {
        Err(ValidationError::new("unknown_access_level"))
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("TRIAL__ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("data.dir", "data")?
            .set_default("data.primary_file", "raw_excel_data.json")?
            .set_default("data.brix_file", "brix_data.json")?
            .set_default("data.subplot_file", "l50_data.json")?
            .set_default("data.cumulative_file", "halmozott_data.json")?
            .set_default("logging.filter", "trial_loader=debug,reqwest=warn")?
            .set_default("logging.json", false)?
            .set_default("dashboard.access_level", "total")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (TRIAL__ prefix)
            .add_source(
                Environment::with_prefix("TRIAL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
            base_url: None,
            primary_file: "raw_excel_data.json".to_string(),
            brix_file: "brix_data.json".to_string(),
            subplot_file: "l50_data.json".to_string(),
            cumulative_file: "halmozott_data.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "trial_loader=debug,reqwest=warn".to_string(),
            json: false,
        }
    }
}
