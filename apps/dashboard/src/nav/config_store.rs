use std::sync::Arc;

use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{error, info, warn};

use crate::models::config::Configuration;
use crate::models::jd::JobDescriptions;
use crate::source::{FetchError, ResourceSource, CONFIG_RESOURCE, JD_RESOURCE};

/// Configuration could not be loaded. Blocks every protected view.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load {resource}: {source}")]
    Fetch {
        resource: &'static str,
        #[source]
        source: FetchError,
    },

    #[error("malformed {resource}: {source}")]
    Malformed {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn resource(&self) -> &'static str {
        match self {
            LoadError::Fetch { resource, .. } | LoadError::Malformed { resource, .. } => resource,
        }
    }
}

/// Loads `config.json` on first use and hands out the cached copy afterwards.
/// Concurrent first callers share a single fetch; a failed load is not cached.
pub struct ConfigStore {
    source: Arc<dyn ResourceSource>,
    config: OnceCell<Arc<Configuration>>,
}

impl ConfigStore {
    pub fn new(source: Arc<dyn ResourceSource>) -> Self {
        Self {
            source,
            config: OnceCell::new(),
        }
    }

    pub async fn ensure_loaded(&self) -> Result<Arc<Configuration>, LoadError> {
        self.config
            .get_or_try_init(|| self.load_config())
            .await
            .cloned()
    }

    async fn load_config(&self) -> Result<Arc<Configuration>, LoadError> {
        let body = self.source.fetch(CONFIG_RESOURCE).await.map_err(|e| {
            error!(
                resource = CONFIG_RESOURCE,
                status = ?e.status(),
                "Failed to load configuration: {e}"
            );
            LoadError::Fetch {
                resource: CONFIG_RESOURCE,
                source: e,
            }
        })?;

        let config: Configuration = serde_json::from_slice(&body).map_err(|e| {
            error!(resource = CONFIG_RESOURCE, "Malformed configuration: {e}");
            LoadError::Malformed {
                resource: CONFIG_RESOURCE,
                source: e,
            }
        })?;

        info!(
            departments = config.departments.len(),
            "Configuration loaded"
        );
        Ok(Arc::new(config))
    }

    /// Fetches `jd.json` fresh on every call. Descriptions are supplementary:
    /// any failure is logged and yields an empty mapping.
    pub async fn job_descriptions(&self) -> JobDescriptions {
        let body = match self.source.fetch(JD_RESOURCE).await {
            Ok(body) => body,
            Err(e) => {
                warn!(
                    resource = JD_RESOURCE,
                    status = ?e.status(),
                    "Job descriptions unavailable, continuing without them: {e}"
                );
                return JobDescriptions::new();
            }
        };

        match serde_json::from_slice::<JobDescriptions>(&body) {
            Ok(descriptions) => {
                info!(roles = descriptions.len(), "Job descriptions loaded");
                descriptions
            }
            Err(e) => {
                warn!(
                    resource = JD_RESOURCE,
                    "Malformed job descriptions, continuing without them: {e}"
                );
                JobDescriptions::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::fixtures::CONFIG_JSON;
    use crate::source::testing::MemorySource;

    #[tokio::test]
    async fn test_config_is_fetched_once() {
        let source = Arc::new(MemorySource::new().with(CONFIG_RESOURCE, CONFIG_JSON));
        let store = ConfigStore::new(source.clone());

        let first = store.ensure_loaded().await.unwrap();
        let second = store.ensure_loaded().await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.fetch_count(CONFIG_RESOURCE), 1);
    }

    #[tokio::test]
    async fn test_concurrent_first_loads_share_one_fetch() {
        let source = Arc::new(MemorySource::new().with(CONFIG_RESOURCE, CONFIG_JSON));
        let store = ConfigStore::new(source.clone());

        let (a, b) = tokio::join!(store.ensure_loaded(), store.ensure_loaded());

        assert!(a.is_ok() && b.is_ok());
        assert_eq!(source.fetch_count(CONFIG_RESOURCE), 1);
    }

    #[tokio::test]
    async fn test_unreachable_config_is_fatal_and_not_cached() {
        let source = Arc::new(MemorySource::new().failing(CONFIG_RESOURCE, 503));
        let store = ConfigStore::new(source.clone());

        let err = store.ensure_loaded().await.unwrap_err();
        assert_eq!(err.resource(), CONFIG_RESOURCE);
        assert!(matches!(
            err,
            LoadError::Fetch {
                source: FetchError::Status { status: 503, .. },
                ..
            }
        ));

        source.set(CONFIG_RESOURCE, CONFIG_JSON);
        assert!(store.ensure_loaded().await.is_ok());
        assert_eq!(source.fetch_count(CONFIG_RESOURCE), 2);
    }

    #[tokio::test]
    async fn test_malformed_config_is_fatal() {
        let source = Arc::new(MemorySource::new().with(CONFIG_RESOURCE, "{\"widgets\": 1"));
        let store = ConfigStore::new(source);
        assert!(matches!(
            store.ensure_loaded().await,
            Err(LoadError::Malformed { .. })
        ));
    }

    #[tokio::test]
    async fn test_job_descriptions_are_not_memoized() {
        let source = Arc::new(MemorySource::new().with(JD_RESOURCE, "{}"));
        let store = ConfigStore::new(source.clone());
        store.job_descriptions().await;
        store.job_descriptions().await;
        assert_eq!(source.fetch_count(JD_RESOURCE), 2);
    }

    #[tokio::test]
    async fn test_missing_job_descriptions_degrade_to_empty() {
        let store = ConfigStore::new(Arc::new(MemorySource::new()));
        assert!(store.job_descriptions().await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_job_descriptions_degrade_to_empty() {
        let source = MemorySource::new().with(JD_RESOURCE, r#"["not", "a", "map"]"#);
        let store = ConfigStore::new(Arc::new(source));
        assert!(store.job_descriptions().await.is_empty());
    }
}
