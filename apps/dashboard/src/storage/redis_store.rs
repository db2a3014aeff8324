use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::OnceCell;

use super::{KeyValueStore, StorageError};

const KEY_PREFIX: &str = "dashboard:";

/// Redis-backed store. Keys are namespaced under `dashboard:`.
///
/// The connection is made on first use and shared by every later command;
/// the manager reconnects on its own if the server drops it.
pub struct RedisStore {
    client: redis::Client,
    conn: OnceCell<ConnectionManager>,
}

impl RedisStore {
    pub fn open(url: &str) -> Result<Self, StorageError> {
        Ok(Self {
            client: redis::Client::open(url)?,
            conn: OnceCell::new(),
        })
    }

    fn namespaced(key: &str) -> String {
        format!("{KEY_PREFIX}{key}")
    }

    async fn connection(&self) -> Result<ConnectionManager, StorageError> {
        let conn = self
            .conn
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await?;
        Ok(conn.clone())
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn.get(Self::namespaced(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(Self::namespaced(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(Self::namespaced(key)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_namespaced() {
        assert_eq!(RedisStore::namespaced("zr_best"), "dashboard:zr_best");
    }

    #[test]
    fn test_open_rejects_malformed_url() {
        assert!(RedisStore::open("not a url").is_err());
    }

    #[test]
    fn test_open_defers_connecting() {
        let store = RedisStore::open("redis://127.0.0.1:1/").unwrap();
        assert!(store.conn.get().is_none());
    }
}
