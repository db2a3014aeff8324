//! Candidate browsing: department tiles, then designation tiles per department.
use serde::Serialize;
use tracing::warn;

use crate::models::config::Configuration;
use crate::nav::config_store::LoadError;
use crate::nav::context::BrowseContext;
use crate::nav::fragment::Fragment;
use crate::nav::router::Route;
use crate::views::{display_label, Outcome, Rendered, View, ViewDeps};

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentTile {
    pub key: String,
    pub name: String,
    pub designations: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepartmentsView {
    pub tiles: Vec<DepartmentTile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DesignationTile {
    /// Raw role key, used in URLs and storage.
    pub key: String,
    pub label: String,
    pub resumes: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DesignationView {
    pub dept_key: String,
    pub dept_name: String,
    pub title: String,
    pub tiles: Vec<DesignationTile>,
}

pub fn departments(config: &Configuration) -> DepartmentsView {
    DepartmentsView {
        tiles: config
            .departments
            .iter()
            .map(|(key, dept)| DepartmentTile {
                key: key.to_string(),
                name: dept.name.clone(),
                designations: dept.designations.len(),
            })
            .collect(),
    }
}

/// Designation tiles for `dept_key`, in stored order. `None` for unknown departments.
pub fn designations(config: &Configuration, dept_key: &str) -> Option<DesignationView> {
    let dept = config.department(dept_key)?;
    Some(DesignationView {
        dept_key: dept_key.to_string(),
        dept_name: dept.name.clone(),
        title: format!("{}: Select designation", dept.name),
        tiles: dept
            .designations
            .iter()
            .map(|(key, images)| DesignationTile {
                key: key.to_string(),
                label: display_label(key),
                resumes: images.len(),
            })
            .collect(),
    })
}

pub async fn render_departments(deps: &ViewDeps<'_>) -> Result<Outcome, LoadError> {
    if let Some(redirect) = deps.guard() {
        return Ok(redirect);
    }
    let config = deps.config.ensure_loaded().await?;
    Ok(View::Candidates(departments(&config)).into())
}

pub async fn render_designation(
    deps: &ViewDeps<'_>,
    fragment: &Fragment,
) -> Result<Outcome, LoadError> {
    if let Some(redirect) = deps.guard() {
        return Ok(redirect);
    }
    let config = deps.config.ensure_loaded().await?;

    let dept_key = fragment.param("dept").unwrap_or_default();
    let Some(view) = designations(&config, dept_key) else {
        warn!(dept = dept_key, "Unknown department, returning to department list");
        return Ok(Outcome::Redirect(Route::Candidates.fragment()));
    };

    Ok(Rendered::new(View::Designation(view))
        .with_context(BrowseContext::for_department(dept_key))
        .into())
}
