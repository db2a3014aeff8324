//! Resource sources: where `config.json` and `jd.json` are fetched from.
//!
//! A source is either a directory on disk or an HTTP base URL. Both resolve a
//! relative resource path such as `data/config.json` against their root.
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

pub const CONFIG_RESOURCE: &str = "data/config.json";
pub const JD_RESOURCE: &str = "data/jd.json";

const FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{resource} responded with status {status}")]
    Status { resource: String, status: u16 },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("I/O error reading {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error fetching {resource}: {source}")]
    Http {
        resource: String,
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// HTTP-style status for logging. Missing files report 404.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::NotFound { .. } => Some(404),
            FetchError::Io { .. } => None,
            FetchError::Http { source, .. } => source.status().map(|s| s.as_u16()),
        }
    }
}

#[async_trait]
pub trait ResourceSource: Send + Sync {
    async fn fetch(&self, resource: &str) -> Result<Bytes, FetchError>;
}

/// Reads resources relative to a directory.
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResourceSource for FsSource {
    async fn fetch(&self, resource: &str) -> Result<Bytes, FetchError> {
        let path = self.root.join(resource);
        debug!(path = %path.display(), "reading resource");
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(FetchError::NotFound {
                resource: resource.to_string(),
            }),
            Err(e) => Err(FetchError::Io {
                resource: resource.to_string(),
                source: e,
            }),
        }
    }
}

/// Fetches resources relative to an HTTP base URL.
pub struct HttpSource {
    client: Client,
    base: String,
}

impl HttpSource {
    pub fn new(base: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
                .build()?,
            base: base.into(),
        })
    }

    fn url_for(&self, resource: &str) -> String {
        format!(
            "{}/{}",
            self.base.trim_end_matches('/'),
            resource.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl ResourceSource for HttpSource {
    async fn fetch(&self, resource: &str) -> Result<Bytes, FetchError> {
        let url = self.url_for(resource);
        debug!(%url, "fetching resource");
        let http_err = |source| FetchError::Http {
            resource: resource.to_string(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(http_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                resource: resource.to_string(),
                status: status.as_u16(),
            });
        }
        response.bytes().await.map_err(http_err)
    }
}

/// Picks a source for `ASSETS_ROOT`: `http(s)://` roots go over the network,
/// anything else is treated as a directory.
pub fn from_root(root: &str) -> anyhow::Result<Arc<dyn ResourceSource>> {
    if root.starts_with("http://") || root.starts_with("https://") {
        let source = HttpSource::new(root).context("Failed to build HTTP client for assets")?;
        Ok(Arc::new(source))
    } else {
        Ok(Arc::new(FsSource::new(root)))
    }
}
