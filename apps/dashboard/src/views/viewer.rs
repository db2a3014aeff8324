//! Resume viewer: one image at a time for a department/designation pair.
//!
//! The viewer rebuilds its whole state from the URL on every entry, so a
//! bookmarked or reloaded `#/viewer?...` renders exactly the same thing.
use serde::Serialize;
use tracing::warn;

use crate::nav::config_store::LoadError;
use crate::nav::context::BrowseContext;
use crate::nav::fragment::{self, Fragment};
use crate::nav::router::Route;
use crate::views::{display_label, Outcome, Rendered, View, ViewDeps};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerView {
    pub dept_key: String,
    pub role_key: String,
    pub title: String,
    pub hud_dept: String,
    pub hud_role: String,
    pub hud_index: String,
    pub index: usize,
    pub total: usize,
    /// Image reference for the renderer; `None` when the role has no resumes.
    pub image: Option<String>,
    pub prev: String,
    pub next: String,
    pub back: String,
}

/// Viewer commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerCommand {
    Prev,
    Next,
    SelectBest,
    Back,
}

impl ViewerCommand {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(ViewerCommand::Prev),
            "ArrowRight" => Some(ViewerCommand::Next),
            "Enter" | " " | "Space" => Some(ViewerCommand::SelectBest),
            "Escape" => Some(ViewerCommand::Back),
            _ => None,
        }
    }
}

/// `<base>/<deptKey>/<roleKey>/<file>`
pub fn image_ref(base: &str, dept_key: &str, role_key: &str, file: &str) -> String {
    format!("{}/{dept_key}/{role_key}/{file}", base.trim_end_matches('/'))
}

/// Index from the `i` parameter. Missing or unparseable values mean 0.
pub fn parse_index(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}

pub fn build(ctx: &BrowseContext, dept_name: &str, resume_base: &str) -> Option<ViewerView> {
    let dept_key = ctx.dept_key.as_deref()?;
    let role_key = ctx.role_key.as_deref()?;
    let role_label = display_label(role_key);

    Some(ViewerView {
        dept_key: dept_key.to_string(),
        role_key: role_key.to_string(),
        title: format!("{dept_name} / {role_label}"),
        hud_dept: dept_name.to_string(),
        hud_role: role_label,
        hud_index: ctx.position_label(),
        index: ctx.index,
        total: ctx.images.len(),
        image: ctx
            .current_image()
            .map(|file| image_ref(resume_base, dept_key, role_key, file)),
        prev: fragment::viewer(dept_key, role_key, ctx.prev_index()),
        next: fragment::viewer(dept_key, role_key, ctx.next_index()),
        back: fragment::designation(dept_key),
    })
}

pub async fn render(deps: &ViewDeps<'_>, fragment: &Fragment) -> Result<Outcome, LoadError> {
    if let Some(redirect) = deps.guard() {
        return Ok(redirect);
    }
    let config = deps.config.ensure_loaded().await?;

    let dept_key = fragment.param("dept").unwrap_or_default();
    let role_key = fragment.param("role").unwrap_or_default();

    let Some(dept) = config.department(dept_key) else {
        warn!(dept = dept_key, "Unknown department in viewer, returning to department list");
        return Ok(Outcome::Redirect(Route::Candidates.fragment()));
    };
    let Some(images) = dept.designations.get(role_key) else {
        warn!(dept = dept_key, role = role_key, "Unknown designation in viewer");
        return Ok(Outcome::Redirect(fragment::designation(dept_key)));
    };

    let ctx = BrowseContext::at(dept_key, role_key, images, parse_index(fragment.param("i")));
    match build(&ctx, &dept.name, deps.resume_base) {
        Some(view) => Ok(Rendered::new(View::Viewer(view)).with_context(ctx).into()),
        None => Ok(Outcome::Redirect(Route::Candidates.fragment())),
    }
}
