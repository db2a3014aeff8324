use std::sync::Arc;

use crate::config::Config;
use crate::shell::Shell;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub shell: Arc<Shell>,
    pub config: Config,
}
