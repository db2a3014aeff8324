//! Persisted key/value storage. Holds the session marker and the
//! best-selection mapping across reloads and restarts.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context};
use async_trait::async_trait;
use thiserror::Error;

pub mod file;
pub mod redis_store;

pub use file::FileStore;
pub use redis_store::RedisStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// String-keyed string storage, read and written one key at a time.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-lifetime storage. Survives navigations, not restarts.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().unwrap_or_else(|e| e.into_inner()).get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).remove(key);
        Ok(())
    }
}

/// Opens the store named by `STORAGE_URL`: `memory`, `file:<path>` or `redis://...`.
pub fn open(url: &str) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    if url == "memory" {
        return Ok(Arc::new(MemoryStore::new()));
    }
    if let Some(path) = url.strip_prefix("file:") {
        if path.is_empty() {
            bail!("STORAGE_URL 'file:' requires a path");
        }
        return Ok(Arc::new(FileStore::new(path)));
    }
    if url.starts_with("redis://") || url.starts_with("rediss://") {
        let store = RedisStore::open(url).context("Failed to create Redis client")?;
        return Ok(Arc::new(store));
    }
    bail!("Unsupported STORAGE_URL '{url}' (expected memory, file:<path> or redis://)")
}
