//! Where dataset files come from: a local directory or a static HTTP host

use std::path::PathBuf;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::DataConfig;
use crate::error::{LoadError, LoadResult};

/// HTTP client for datasets published as static files
#[derive(Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    /// Create a new HttpSource
    pub fn new(base_url: String) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a new HttpSource sharing an existing client
    pub fn with_client(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name)
    }

    /// Fetch a file body as text
    pub async fn fetch_text(&self, name: &str) -> LoadResult<String> {
        let url = self.url_for(name);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(LoadError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(|e| LoadError::Transport {
            url,
            message: format!("Failed to read body: {}", e),
        })
    }
}

/// Dataset origin
#[derive(Clone)]
pub enum DataSource {
    Directory(PathBuf),
    Http(HttpSource),
}

impl DataSource {
    /// HTTP when a base URL is configured, the data directory otherwise
    pub fn from_config(config: &DataConfig) -> Self {
        match &config.base_url {
            Some(base_url) => DataSource::Http(HttpSource::new(base_url.clone())),
            None => DataSource::Directory(PathBuf::from(&config.dir)),
        }
    }

    /// Human-readable location of a file, for logs
    pub fn describe(&self, name: &str) -> String {
        match self {
            DataSource::Directory(dir) => dir.join(name).display().to_string(),
            DataSource::Http(http) => http.url_for(name),
        }
    }

    pub async fn read_text(&self, name: &str) -> LoadResult<String> {
        match self {
            DataSource::Directory(dir) => {
                let path = dir.join(name);
                tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| LoadError::Io {
                        path: path.display().to_string(),
                        source,
                    })
            }
            DataSource::Http(http) => http.fetch_text(name).await,
        }
    }

    /// Read and deserialize a JSON file
    pub async fn read_json<T: DeserializeOwned>(&self, name: &str) -> LoadResult<T> {
        let text = self.read_text(name).await?;
        serde_json::from_str(&text).map_err(|source| LoadError::Parse {
            dataset: name.to_string(),
            source,
        })
    }
}
