use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the serialized best-selection mapping.
pub const BEST_KEY: &str = "zr_best";

/// `"deptKey:roleKey"` -> chosen image index.
pub type Selections = BTreeMap<String, usize>;

/// Remembers which resume was marked best for each department/designation.
/// The whole mapping is read, changed and written back on every selection.
#[derive(Clone)]
pub struct BestSelectionStore {
    store: Arc<dyn KeyValueStore>,
}

impl BestSelectionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn selection_key(dept_key: &str, role_key: &str) -> String {
        format!("{dept_key}:{role_key}")
    }

    /// Current selections. Unreadable content counts as no selections.
    pub async fn load(&self) -> Result<Selections, StorageError> {
        let Some(raw) = self.store.get(BEST_KEY).await? else {
            return Ok(Selections::new());
        };
        match serde_json::from_str(&raw) {
            Ok(selections) => Ok(selections),
            Err(e) => {
                warn!("Discarding unreadable best-selection store: {e}");
                Ok(Selections::new())
            }
        }
    }

    /// Records `index` as best for `dept_key:role_key`, replacing any earlier pick.
    pub async fn select(
        &self,
        dept_key: &str,
        role_key: &str,
        index: usize,
    ) -> Result<(), StorageError> {
        let mut selections = self.load().await?;
        let key = Self::selection_key(dept_key, role_key);
        debug!(%key, index, "recording best selection");
        selections.insert(key, index);
        let raw = serde_json::to_string(&selections)?;
        self.store.set(BEST_KEY, &raw).await
    }

    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(BEST_KEY).await
    }
}
