//! View handlers. Each one turns route parameters plus configuration into a
//! serializable view-model; binding that model to a screen happens elsewhere.

pub mod candidates;
pub mod charts;
pub mod home;
pub mod interviews;
pub mod jobs;
pub mod reports;
pub mod viewer;

use serde::Serialize;

use crate::nav::config_store::ConfigStore;
use crate::nav::context::BrowseContext;
use crate::nav::router::Route;
use crate::nav::session::{Gate, SessionGate};

use self::candidates::{DepartmentsView, DesignationView};
use self::home::HomeView;
use self::interviews::InterviewsView;
use self::jobs::{JobsBoard, JobsView};
use self::reports::ReportsView;
use self::viewer::ViewerView;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Login,
    Home(HomeView),
    Candidates(DepartmentsView),
    Designation(DesignationView),
    Viewer(ViewerView),
    Jobs(JobsView),
    Interviews(InterviewsView),
    Reports(ReportsView),
    /// Bare template of `route`, left in place when its data failed to load.
    Shell { route: Route },
}

impl View {
    pub fn route(&self) -> Route {
        match self {
            View::Login => Route::Login,
            View::Home(_) => Route::Home,
            View::Candidates(_) => Route::Candidates,
            View::Designation(_) => Route::Designation,
            View::Viewer(_) => Route::Viewer,
            View::Jobs(_) => Route::Jobs,
            View::Interviews(_) => Route::Interviews,
            View::Reports(_) => Route::Reports,
            View::Shell { route } => *route,
        }
    }
}

/// A finished view plus whatever state it wants mounted alongside it.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub view: View,
    pub context: Option<BrowseContext>,
    pub jobs: Option<JobsBoard>,
}

impl Rendered {
    pub fn new(view: View) -> Self {
        Self {
            view,
            context: None,
            jobs: None,
        }
    }

    pub fn with_context(mut self, context: BrowseContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_jobs(mut self, board: JobsBoard) -> Self {
        self.jobs = Some(board);
        self
    }
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Render(Rendered),
    Redirect(String),
}

impl From<Rendered> for Outcome {
    fn from(rendered: Rendered) -> Self {
        Outcome::Render(rendered)
    }
}

impl From<View> for Outcome {
    fn from(view: View) -> Self {
        Outcome::Render(Rendered::new(view))
    }
}

/// Everything a view handler may read.
pub struct ViewDeps<'a> {
    pub config: &'a ConfigStore,
    pub session: &'a SessionGate,
    pub resume_base: &'a str,
}

impl ViewDeps<'_> {
    /// `Some(redirect)` when the caller must stop rendering.
    pub fn guard(&self) -> Option<Outcome> {
        match self.session.require_auth() {
            Gate::Proceed => None,
            Gate::Redirect(to) => Some(Outcome::Redirect(to)),
        }
    }
}

/// Display form of a role key: `fpa-analyst` -> `fpa analyst`.
pub fn display_label(key: &str) -> String {
    key.replace('-', " ")
}
