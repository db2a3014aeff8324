use serde::Serialize;
use tracing::debug;

use crate::nav::config_store::LoadError;
use crate::nav::fragment::{self, Fragment};
use crate::views::{self, Outcome, ViewDeps};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Login,
    Home,
    Candidates,
    Designation,
    Viewer,
    Jobs,
    Interviews,
    Reports,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Login,
        Route::Home,
        Route::Candidates,
        Route::Designation,
        Route::Viewer,
        Route::Jobs,
        Route::Interviews,
        Route::Reports,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Home => "/home",
            Route::Candidates => "/candidates",
            Route::Designation => "/designation",
            Route::Viewer => "/viewer",
            Route::Jobs => "/jobs",
            Route::Interviews => "/interviews",
            Route::Reports => "/reports",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Parameterless fragment for this route, e.g. `#/home`.
    pub fn fragment(self) -> String {
        fragment::build(self.path(), &[])
    }

    /// Routes that exist in the minimal route set, without the jobs,
    /// interviews and reports views.
    pub fn is_core(self) -> bool {
        !matches!(self, Route::Jobs | Route::Interviews | Route::Reports)
    }
}

/// Maps fragments to view handlers. Holds no state of its own.
#[derive(Debug, Clone, Copy)]
pub struct Router {
    full_routes: bool,
}

impl Router {
    pub fn new(full_routes: bool) -> Self {
        Self { full_routes }
    }

    /// Route for `path`; anything unknown or disabled lands on login.
    pub fn resolve(&self, path: &str) -> Route {
        Route::from_path(path)
            .filter(|route| self.full_routes || route.is_core())
            .unwrap_or(Route::Login)
    }

    /// One navigation edge: re-read the session, parse the fragment, pick the
    /// handler and run it with the query parameters.
    pub async fn evaluate(
        &self,
        raw: &str,
        deps: &ViewDeps<'_>,
    ) -> (Route, Result<Outcome, LoadError>) {
        let logged_in = deps.session.refresh().await;
        let fragment = Fragment::parse(raw);
        let route = self.resolve(&fragment.path);
        debug!(path = %fragment.path, ?route, logged_in, "dispatching route");

        let outcome = match route {
            Route::Login => Ok(views::View::Login.into()),
            Route::Home => views::home::render(deps).await,
            Route::Candidates => views::candidates::render_departments(deps).await,
            Route::Designation => views::candidates::render_designation(deps, &fragment).await,
            Route::Viewer => views::viewer::render(deps, &fragment).await,
            Route::Jobs => views::jobs::render(deps).await,
            Route::Interviews => views::interviews::render(deps).await,
            Route::Reports => views::reports::render(deps).await,
        };
        (route, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{deps_parts, fixture_source, RESUME_BASE};
    use crate::views::View;

    #[test]
    fn test_every_route_resolves_to_itself() {
        let router = Router::new(true);
        for route in Route::ALL {
            assert_eq!(router.resolve(route.path()), route);
        }
    }

    #[test]
    fn test_unknown_paths_fall_back_to_login() {
        let router = Router::new(true);
        assert_eq!(router.resolve("/admin"), Route::Login);
        assert_eq!(router.resolve("//home"), Route::Login);
        assert_eq!(router.resolve("/Home"), Route::Login);
    }

    #[test]
    fn test_minimal_route_set_disables_extra_views() {
        let router = Router::new(false);
        assert_eq!(router.resolve("/viewer"), Route::Viewer);
        assert_eq!(router.resolve("/jobs"), Route::Login);
        assert_eq!(router.resolve("/interviews"), Route::Login);
        assert_eq!(router.resolve("/reports"), Route::Login);
    }

    #[test]
    fn test_route_fragments() {
        assert_eq!(Route::Home.fragment(), "#/home");
        assert_eq!(Route::Candidates.fragment(), "#/candidates");
    }

    #[tokio::test]
    async fn test_evaluate_rereads_session_before_dispatch() {
        let (config, session) = deps_parts(fixture_source()).await;
        let deps = ViewDeps {
            config: &config,
            session: &session,
            resume_base: RESUME_BASE,
        };
        let router = Router::new(true);

        let (route, outcome) = router.evaluate("#/reports", &deps).await;
        assert_eq!(route, Route::Reports);
        assert!(matches!(
            outcome.unwrap(),
            Outcome::Render(ref r) if matches!(r.view, View::Reports(_))
        ));

        session.logout().await.unwrap();
        let (_, outcome) = router.evaluate("#/reports", &deps).await;
        assert!(matches!(outcome.unwrap(), Outcome::Redirect(ref to) if to == "#/login"));
    }

    #[tokio::test]
    async fn test_unknown_route_renders_login_even_when_logged_in() {
        let (config, session) = deps_parts(fixture_source()).await;
        let deps = ViewDeps {
            config: &config,
            session: &session,
            resume_base: RESUME_BASE,
        };
        let (route, outcome) = Router::new(true).evaluate("#/nowhere", &deps).await;
        assert_eq!(route, Route::Login);
        assert!(matches!(
            outcome.unwrap(),
            Outcome::Render(ref r) if matches!(r.view, View::Login)
        ));
    }
}
