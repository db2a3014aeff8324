//! The application shell: owns the navigation state, follows redirects,
//! mounts rendered views and dispatches user actions against them.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::nav::best::BestSelectionStore;
use crate::nav::config_store::{ConfigStore, LoadError};
use crate::nav::context::BrowseContext;
use crate::nav::fragment;
use crate::nav::router::{Route, Router};
use crate::nav::session::SessionGate;
use crate::source::ResourceSource;
use crate::storage::{KeyValueStore, StorageError};
use crate::views::jobs::JobsBoard;
use crate::views::viewer::ViewerCommand;
use crate::views::{Outcome, Rendered, View, ViewDeps};

/// Redirect chains never need more than two hops; anything longer is a loop.
const MAX_REDIRECTS: usize = 4;

pub const BEST_SELECTED_NOTICE: &str = "Best resume selected for this designation.";

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Navigation to {0} was superseded by a newer navigation")]
    Superseded(String),

    #[error("Redirect loop detected at {0}")]
    RedirectLoop(String),

    #[error("Action '{0}' is not available on the current view")]
    Unavailable(&'static str),

    #[error("Unknown {kind} '{key}'")]
    UnknownKey { kind: &'static str, key: String },
}

/// User actions. Each one names the control it comes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Login,
    Logout,
    SelectDepartment { dept: String },
    SelectDesignation { role: String },
    Prev,
    Next,
    SelectBest,
    BackToDesignation,
    Key { key: String },
    FilterJobs { query: String },
    ToggleDescription { dept: String, role: String },
    Screen,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Login => "login",
            Action::Logout => "logout",
            Action::SelectDepartment { .. } => "select_department",
            Action::SelectDesignation { .. } => "select_designation",
            Action::Prev => "prev",
            Action::Next => "next",
            Action::SelectBest => "select_best",
            Action::BackToDesignation => "back_to_designation",
            Action::Key { .. } => "key",
            Action::FilterJobs { .. } => "filter_jobs",
            Action::ToggleDescription { .. } => "toggle_description",
            Action::Screen => "screen",
        }
    }
}

impl From<ViewerCommand> for Action {
    fn from(command: ViewerCommand) -> Self {
        match command {
            ViewerCommand::Prev => Action::Prev,
            ViewerCommand::Next => Action::Next,
            ViewerCommand::SelectBest => Action::SelectBest,
            ViewerCommand::Back => Action::BackToDesignation,
        }
    }
}

/// The mounted view and the location that produced it.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    pub fragment: String,
    pub view: View,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionOutcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(flatten)]
    pub page: Page,
}

impl From<Page> for ActionOutcome {
    fn from(page: Page) -> Self {
        Self { notice: None, page }
    }
}

#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub resume_base: String,
    pub full_routes: bool,
}

#[derive(Default)]
struct ShellState {
    context: BrowseContext,
    mounted: Option<Mounted>,
}

struct Mounted {
    page: Page,
    jobs: Option<JobsBoard>,
}

pub struct Shell {
    router: Router,
    config: ConfigStore,
    session: SessionGate,
    best: BestSelectionStore,
    resume_base: String,
    generation: AtomicU64,
    state: Mutex<ShellState>,
}

impl Shell {
    pub fn new(
        source: Arc<dyn ResourceSource>,
        store: Arc<dyn KeyValueStore>,
        options: ShellOptions,
    ) -> Self {
        let best = BestSelectionStore::new(store.clone());
        Self {
            router: Router::new(options.full_routes),
            config: ConfigStore::new(source),
            session: SessionGate::new(store, best.clone()),
            best,
            resume_base: options.resume_base,
            generation: AtomicU64::new(0),
            state: Mutex::new(ShellState::default()),
        }
    }

    pub fn context(&self) -> BrowseContext {
        self.lock().context.clone()
    }

    pub fn current(&self) -> Option<Page> {
        self.lock().mounted.as_ref().map(|m| m.page.clone())
    }

    fn lock(&self) -> MutexGuard<'_, ShellState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn deps(&self) -> ViewDeps<'_> {
        ViewDeps {
            config: &self.config,
            session: &self.session,
            resume_base: &self.resume_base,
        }
    }

    /// Handles one navigation event, following redirects until a view renders.
    ///
    /// A navigation that finishes after a newer one has started is dropped
    /// without touching the mounted view.
    pub async fn navigate(&self, raw: &str) -> Result<Page, ShellError> {
        let mut target = raw.to_string();

        for _ in 0..MAX_REDIRECTS {
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            let deps = self.deps();
            let (route, outcome) = self.router.evaluate(&target, &deps).await;

            let mut state = self.lock();
            if self.generation.load(Ordering::SeqCst) != generation {
                debug!(fragment = %target, "Dropping superseded navigation");
                return Err(ShellError::Superseded(target));
            }

            match outcome {
                Ok(Outcome::Redirect(to)) => {
                    debug!(from = %target, to = %to, "Redirecting");
                    target = to;
                }
                Ok(Outcome::Render(rendered)) => {
                    return Ok(Self::mount(&mut state, target, rendered));
                }
                Err(e) => {
                    warn!(fragment = %target, resource = e.resource(), "Leaving {route:?} unpopulated");
                    Self::mount(&mut state, target, Rendered::new(View::Shell { route }));
                    return Err(e.into());
                }
            }
        }

        Err(ShellError::RedirectLoop(target))
    }

    fn mount(state: &mut ShellState, fragment: String, rendered: Rendered) -> Page {
        let Rendered {
            view,
            context,
            jobs,
        } = rendered;
        if let Some(context) = context {
            state.context = context;
        }
        let page = Page { fragment, view };
        state.mounted = Some(Mounted {
            page: page.clone(),
            jobs,
        });
        page
    }

    /// Route of the mounted view, if it rendered. A bare shell left by a
    /// failed load has no controls to act on.
    fn mounted_route(&self) -> Option<Route> {
        self.lock()
            .mounted
            .as_ref()
            .filter(|m| !matches!(m.page.view, View::Shell { .. }))
            .map(|m| m.page.view.route())
    }

    fn require_mounted(&self, route: Route, action: &Action) -> Result<(), ShellError> {
        if self.mounted_route() == Some(route) {
            Ok(())
        } else {
            Err(ShellError::Unavailable(action.name()))
        }
    }

    /// Runs a user action against the mounted view.
    pub async fn dispatch(&self, action: Action) -> Result<ActionOutcome, ShellError> {
        let action = match action {
            Action::Key { key } => {
                let command = (self.mounted_route() == Some(Route::Viewer))
                    .then(|| ViewerCommand::from_key(&key))
                    .flatten();
                match command {
                    Some(command) => Action::from(command),
                    None => {
                        debug!(%key, "Ignoring key");
                        return self
                            .current()
                            .map(ActionOutcome::from)
                            .ok_or(ShellError::Unavailable("key"));
                    }
                }
            }
            other => other,
        };
        self.apply(action).await
    }

    async fn apply(&self, action: Action) -> Result<ActionOutcome, ShellError> {
        match action {
            Action::Login => {
                self.session.login().await?;
                Ok(self.navigate(&Route::Home.fragment()).await?.into())
            }
            Action::Logout => {
                self.session.logout().await?;
                Ok(self.navigate(&Route::Login.fragment()).await?.into())
            }
            Action::SelectDepartment { ref dept } => {
                self.require_mounted(Route::Candidates, &action)?;
                Ok(self.navigate(&fragment::designation(dept)).await?.into())
            }
            Action::SelectDesignation { ref role } => {
                self.require_mounted(Route::Designation, &action)?;
                let dept = self
                    .context()
                    .dept_key
                    .ok_or(ShellError::Unavailable(action.name()))?;
                let config = self.config.ensure_loaded().await?;
                if config.images(&dept, role).is_none() {
                    return Err(ShellError::UnknownKey {
                        kind: "designation",
                        key: role.clone(),
                    });
                }
                Ok(self.navigate(&fragment::viewer(&dept, role, 0)).await?.into())
            }
            Action::Prev | Action::Next | Action::SelectBest | Action::BackToDesignation => {
                self.require_mounted(Route::Viewer, &action)?;
                self.apply_viewer(action).await
            }
            Action::FilterJobs { ref query } => {
                self.update_jobs(&action, |board| {
                    board.set_query(query);
                    Ok(())
                })
            }
            Action::ToggleDescription { ref dept, ref role } => {
                self.update_jobs(&action, |board| {
                    board
                        .toggle(dept, role)
                        .map(|_| ())
                        .ok_or_else(|| ShellError::UnknownKey {
                            kind: "job card",
                            key: format!("{dept}:{role}"),
                        })
                })
            }
            Action::Screen => {
                self.require_mounted(Route::Jobs, &action)?;
                Ok(self.navigate(&Route::Candidates.fragment()).await?.into())
            }
            Action::Key { .. } => Err(ShellError::Unavailable(action.name())),
        }
    }

    async fn apply_viewer(&self, action: Action) -> Result<ActionOutcome, ShellError> {
        let ctx = self.context();
        let (Some(dept), Some(role)) = (ctx.dept_key.as_deref(), ctx.role_key.as_deref()) else {
            return Err(ShellError::Unavailable(action.name()));
        };

        match action {
            Action::Prev => Ok(self
                .navigate(&fragment::viewer(dept, role, ctx.prev_index()))
                .await?
                .into()),
            Action::Next => Ok(self
                .navigate(&fragment::viewer(dept, role, ctx.next_index()))
                .await?
                .into()),
            Action::SelectBest => {
                self.best.select(dept, role, ctx.index).await?;
                info!(dept, role, index = ctx.index, "Best resume selected");
                let page = self.navigate(&fragment::designation(dept)).await?;
                Ok(ActionOutcome {
                    notice: Some(BEST_SELECTED_NOTICE.to_string()),
                    page,
                })
            }
            _ => Ok(self.navigate(&fragment::designation(dept)).await?.into()),
        }
    }

    /// Applies `change` to the mounted jobs board and re-renders it in place.
    fn update_jobs<F>(&self, action: &Action, change: F) -> Result<ActionOutcome, ShellError>
    where
        F: FnOnce(&mut JobsBoard) -> Result<(), ShellError>,
    {
        let mut state = self.lock();
        let mounted = state
            .mounted
            .as_mut()
            .ok_or(ShellError::Unavailable(action.name()))?;
        let board = mounted
            .jobs
            .as_mut()
            .ok_or(ShellError::Unavailable(action.name()))?;

        change(board)?;
        mounted.page.view = View::Jobs(board.render());
        Ok(mounted.page.clone().into())
    }
}
