//! Error handling for dataset loading

use thiserror::Error;

/// Loader error types
#[derive(Error, Debug)]
pub enum LoadError {
    // Source errors
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    // Content errors
    #[error("Failed to parse {dataset}: {source}")]
    Parse {
        dataset: String,
        #[source]
        source: serde_json::Error,
    },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] validator::ValidationErrors),
}

impl LoadError {
    /// Whether the dataset was unreachable, as opposed to present but unreadable
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            LoadError::Io { .. } | LoadError::Transport { .. } | LoadError::Status { .. }
        )
    }
}

/// Result type alias for loader operations
pub type LoadResult<T> = Result<T, LoadError>;
