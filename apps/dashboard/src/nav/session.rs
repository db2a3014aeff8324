use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use crate::nav::best::BestSelectionStore;
use crate::nav::fragment;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the session marker.
pub const SESSION_KEY: &str = "zr_session";
/// The only stored value that counts as logged in.
pub const AUTHENTICATED: &str = "1";

/// Result of the auth check at the top of a protected view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Proceed,
    Redirect(String),
}

/// Local, advisory login state. The persisted marker is the source of truth;
/// the in-memory flag mirrors it as of the last `refresh`.
pub struct SessionGate {
    store: Arc<dyn KeyValueStore>,
    best: BestSelectionStore,
    logged_in: AtomicBool,
}

impl SessionGate {
    pub fn new(store: Arc<dyn KeyValueStore>, best: BestSelectionStore) -> Self {
        Self {
            store,
            best,
            logged_in: AtomicBool::new(false),
        }
    }

    /// Re-reads the persisted marker. Storage failures count as logged out.
    pub async fn refresh(&self) -> bool {
        let authenticated = match self.store.get(SESSION_KEY).await {
            Ok(value) => value.as_deref() == Some(AUTHENTICATED),
            Err(e) => {
                warn!("Could not read session marker, treating as logged out: {e}");
                false
            }
        };
        self.logged_in.store(authenticated, Ordering::SeqCst);
        authenticated
    }

    pub fn is_authenticated(&self) -> bool {
        self.logged_in.load(Ordering::SeqCst)
    }

    pub async fn login(&self) -> Result<(), StorageError> {
        self.store.set(SESSION_KEY, AUTHENTICATED).await?;
        self.logged_in.store(true, Ordering::SeqCst);
        info!("Session started");
        Ok(())
    }

    /// Clears the marker and every best selection.
    pub async fn logout(&self) -> Result<(), StorageError> {
        self.store.remove(SESSION_KEY).await?;
        self.best.clear().await?;
        self.logged_in.store(false, Ordering::SeqCst);
        info!("Session ended");
        Ok(())
    }

    pub fn require_auth(&self) -> Gate {
        if self.is_authenticated() {
            Gate::Proceed
        } else {
            Gate::Redirect(fragment::build(fragment::DEFAULT_PATH, &[]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn gate() -> (Arc<MemoryStore>, SessionGate) {
        let store = Arc::new(MemoryStore::new());
        let best = BestSelectionStore::new(store.clone());
        (store.clone(), SessionGate::new(store, best))
    }

    #[tokio::test]
    async fn test_starts_unauthenticated() {
        let (_, session) = gate();
        assert!(!session.refresh().await);
        assert_eq!(session.require_auth(), Gate::Redirect("#/login".into()));
    }

    #[tokio::test]
    async fn test_login_persists_marker() {
        let (store, session) = gate();
        session.login().await.unwrap();
        assert!(session.is_authenticated());
        assert_eq!(store.get(SESSION_KEY).await.unwrap().as_deref(), Some("1"));
        assert_eq!(session.require_auth(), Gate::Proceed);
    }

    #[tokio::test]
    async fn test_refresh_follows_storage() {
        let (store, session) = gate();
        store.set(SESSION_KEY, "1").await.unwrap();
        assert!(session.refresh().await);
        store.remove(SESSION_KEY).await.unwrap();
        assert!(!session.refresh().await);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_non_canonical_marker_is_unauthenticated() {
        let (store, session) = gate();
        for value in ["true", "0", "", "yes", " 1"] {
            store.set(SESSION_KEY, value).await.unwrap();
            assert!(!session.refresh().await, "value {value:?} must not authenticate");
        }
    }

    #[tokio::test]
    async fn test_logout_clears_marker_and_best_selections() {
        let (store, session) = gate();
        let best = BestSelectionStore::new(store.clone());
        session.login().await.unwrap();
        best.select("finance", "fpa-analyst", 2).await.unwrap();

        session.logout().await.unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(store.get(SESSION_KEY).await.unwrap(), None);
        assert!(best.load().await.unwrap().is_empty());
    }
}
