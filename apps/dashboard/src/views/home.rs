use serde::Serialize;
use serde_json::Number;

use crate::models::config::Widgets;
use crate::nav::config_store::LoadError;
use crate::views::charts::ChartInput;
use crate::views::{Outcome, View, ViewDeps};

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub open_reqs: Number,
    pub new_candidates: Number,
    pub interviews: Vec<String>,
    pub tasks: Vec<String>,
    pub pipeline: ChartInput,
    pub stages: ChartInput,
}

impl From<&Widgets> for HomeView {
    fn from(widgets: &Widgets) -> Self {
        HomeView {
            open_reqs: widgets.open_reqs.clone(),
            new_candidates: widgets.new_candidates.clone(),
            interviews: widgets.interviews.clone(),
            tasks: widgets.tasks.clone(),
            pipeline: ChartInput::pipeline(&widgets.pipeline),
            stages: ChartInput::doughnut(
                widgets.stages.keys().cloned().collect(),
                widgets.stages.values().cloned().collect(),
            ),
        }
    }
}

pub async fn render(deps: &ViewDeps<'_>) -> Result<Outcome, LoadError> {
    if let Some(redirect) = deps.guard() {
        return Ok(redirect);
    }
    let config = deps.config.ensure_loaded().await?;
    Ok(View::Home(HomeView::from(&config.widgets)).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::charts::ChartKind;
    use crate::views::testing::{deps_parts, fixture_source, RESUME_BASE};

    fn numbers(values: &[u32]) -> Vec<Number> {
        values.iter().copied().map(Number::from).collect()
    }

    #[tokio::test]
    async fn test_home_binds_widgets() {
        let (config, session) = deps_parts(fixture_source()).await;
        let deps = ViewDeps {
            config: &config,
            session: &session,
            resume_base: RESUME_BASE,
        };

        let Outcome::Render(rendered) = render(&deps).await.unwrap() else {
            panic!("expected a rendered view");
        };
        let View::Home(home) = rendered.view else {
            panic!("expected the home view");
        };
        assert_eq!(home.open_reqs, Number::from(12));
        assert_eq!(home.new_candidates, Number::from(37));
        assert_eq!(home.tasks, vec!["Review FP&A shortlist".to_string()]);
        assert_eq!(home.pipeline.kind, ChartKind::Bar);
        assert_eq!(home.pipeline.labels[0], "Sourced");
        assert_eq!(home.pipeline.values, numbers(&[320, 220, 140, 75, 30, 18]));
        assert_eq!(home.stages.kind, ChartKind::Doughnut);
        assert_eq!(home.stages.labels, vec!["Screen", "Interview", "Offer"]);
        assert_eq!(home.stages.values, numbers(&[40, 25, 8]));
    }

    #[tokio::test]
    async fn test_home_redirects_when_logged_out() {
        let (config, session) = deps_parts(fixture_source()).await;
        session.logout().await.unwrap();
        let deps = ViewDeps {
            config: &config,
            session: &session,
            resume_base: RESUME_BASE,
        };
        assert!(matches!(render(&deps).await.unwrap(), Outcome::Redirect(to) if to == "#/login"));
    }
}
