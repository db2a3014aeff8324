//! Open roles with their job descriptions.
//!
//! The board keeps the flattened role list and the descriptions fetched on
//! entry, so filtering and expanding cards never fetch again.
use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::models::config::Configuration;
use crate::models::jd::{JobDescription, JobDescriptions};
use crate::nav::config_store::LoadError;
use crate::nav::router::Route;
use crate::views::{display_label, Outcome, Rendered, View, ViewDeps};

/// Shown in place of an empty description section.
pub const SECTION_PLACEHOLDER: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleEntry {
    pub dept_key: String,
    pub dept_name: String,
    pub role_key: String,
    pub role_name: String,
    pub openings: u32,
}

/// Every department/designation pair, departments first, both in stored order.
pub fn flatten_roles(config: &Configuration) -> Vec<RoleEntry> {
    config
        .departments
        .iter()
        .flat_map(|(dept_key, dept)| {
            dept.designations.keys().map(move |role_key| RoleEntry {
                dept_key: dept_key.to_string(),
                dept_name: dept.name.clone(),
                role_key: role_key.to_string(),
                role_name: display_label(role_key),
                openings: 1,
            })
        })
        .collect()
}

/// Case-insensitive substring match on role name or department name.
pub fn matches_query(role: &RoleEntry, query: &str) -> bool {
    let query = query.to_lowercase();
    role.role_name.to_lowercase().contains(&query) || role.dept_name.to_lowercase().contains(&query)
}

#[derive(Debug, Clone, Serialize)]
pub struct JdSection {
    pub heading: &'static str,
    pub items: Vec<String>,
    pub placeholder: bool,
}

impl JdSection {
    fn new(heading: &'static str, items: &[String]) -> Self {
        if items.is_empty() {
            Self {
                heading,
                items: vec![SECTION_PLACEHOLDER.to_string()],
                placeholder: true,
            }
        } else {
            Self {
                heading,
                items: items.to_vec(),
                placeholder: false,
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct JobCard {
    pub dept_key: String,
    pub role_key: String,
    pub title: String,
    pub department: String,
    pub openings: u32,
    pub open: bool,
    pub has_description: bool,
    pub summary: Option<String>,
    /// Set in place of the summary when the role has no description entry or
    /// the entry has no summary.
    pub notice: Option<String>,
    pub sections: Vec<JdSection>,
    pub screen: String,
}

impl JobCard {
    fn new(role: &RoleEntry, description: Option<&JobDescription>, open: bool) -> Self {
        let empty = JobDescription::default();
        let jd = description.unwrap_or(&empty);
        let summary = non_empty(&jd.summary);
        let notice = summary.is_none().then(|| {
            format!(
                "JD not found for {}. Check jd.json key \"{}\".",
                role.role_name, role.role_key
            )
        });

        JobCard {
            dept_key: role.dept_key.clone(),
            role_key: role.role_key.clone(),
            title: non_empty(&jd.title).unwrap_or_else(|| role.role_name.clone()),
            department: non_empty(&jd.department).unwrap_or_else(|| role.dept_name.clone()),
            openings: role.openings,
            open,
            has_description: description.is_some(),
            summary,
            notice,
            sections: vec![
                JdSection::new("Key Responsibilities", &jd.responsibilities),
                JdSection::new("Required Skills and Competencies", &jd.requirements),
                JdSection::new("Qualifications", &jd.qualifications),
                JdSection::new("Performance Metrics", &jd.metrics),
            ],
            screen: Route::Candidates.fragment(),
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field.as_ref().filter(|s| !s.is_empty()).cloned()
}

#[derive(Debug, Clone, Serialize)]
pub struct JobsView {
    pub query: String,
    pub total: usize,
    pub cards: Vec<JobCard>,
}

/// Interaction state of a mounted jobs view.
#[derive(Debug, Clone)]
pub struct JobsBoard {
    roles: Vec<RoleEntry>,
    descriptions: JobDescriptions,
    query: String,
    open: HashSet<(String, String)>,
}

impl JobsBoard {
    pub fn new(roles: Vec<RoleEntry>, descriptions: JobDescriptions) -> Self {
        for role in &roles {
            if !descriptions.contains_key(&role.role_key) {
                warn!(role = %role.role_key, dept = %role.dept_key, "Missing job description");
            }
        }
        Self {
            roles,
            descriptions,
            query: String::new(),
            open: HashSet::new(),
        }
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Flips one card's description open or closed. Returns the new state,
    /// or `None` when no such card exists.
    pub fn toggle(&mut self, dept_key: &str, role_key: &str) -> Option<bool> {
        if !self
            .roles
            .iter()
            .any(|r| r.dept_key == dept_key && r.role_key == role_key)
        {
            return None;
        }
        let card = (dept_key.to_string(), role_key.to_string());
        if self.open.remove(&card) {
            Some(false)
        } else {
            self.open.insert(card);
            Some(true)
        }
    }

    pub fn render(&self) -> JobsView {
        let cards = self
            .roles
            .iter()
            .filter(|role| matches_query(role, &self.query))
            .map(|role| {
                let open = self
                    .open
                    .contains(&(role.dept_key.clone(), role.role_key.clone()));
                JobCard::new(role, self.descriptions.get(&role.role_key), open)
            })
            .collect();

        JobsView {
            query: self.query.clone(),
            total: self.roles.len(),
            cards,
        }
    }
}

pub async fn render(deps: &ViewDeps<'_>) -> Result<Outcome, LoadError> {
    if let Some(redirect) = deps.guard() {
        return Ok(redirect);
    }
    let config = deps.config.ensure_loaded().await?;
    let descriptions = deps.config.job_descriptions().await;

    let board = JobsBoard::new(flatten_roles(&config), descriptions);
    Ok(Rendered::new(View::Jobs(board.render()))
        .with_jobs(board)
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::fixtures::CONFIG_JSON;

    const JD_JSON: &str = r#"{
        "fpa-analyst": {
            "title": "FP&A Analyst",
            "department": "Finance & Planning",
            "summary": "Owns the monthly forecast.",
            "responsibilities": ["Build forecasts", "Variance analysis"],
            "requirements": ["Excel"],
            "qualifications": ["B.Com"],
            "metrics": ["Forecast accuracy"]
        },
        "operations-team-lead": {
            "responsibilities": ["Run the floor"]
        }
    }"#;

    fn board() -> JobsBoard {
        let config: Configuration = serde_json::from_str(CONFIG_JSON).unwrap();
        let jd: JobDescriptions = serde_json::from_str(JD_JSON).unwrap();
        JobsBoard::new(flatten_roles(&config), jd)
    }

    fn role_keys(view: &JobsView) -> Vec<&str> {
        view.cards.iter().map(|c| c.role_key.as_str()).collect()
    }

    #[test]
    fn test_flatten_lists_every_pair_in_order() {
        let config: Configuration = serde_json::from_str(CONFIG_JSON).unwrap();
        let roles = flatten_roles(&config);
        let pairs: Vec<(&str, &str)> = roles
            .iter()
            .map(|r| (r.dept_key.as_str(), r.role_key.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("finance", "financial-analyst"),
                ("finance", "fpa-analyst"),
                ("finance", "accounts-payable-clerk"),
                ("operations", "operations-team-lead"),
                ("operations", "logistics-coordinator"),
            ]
        );
        assert_eq!(roles[1].role_name, "fpa analyst");
        assert!(roles.iter().all(|r| r.openings == 1));
    }

    #[test]
    fn test_unfiltered_board_shows_all_cards_closed() {
        let view = board().render();
        assert_eq!(view.cards.len(), 5);
        assert_eq!(view.total, 5);
        assert!(view.cards.iter().all(|c| !c.open));
    }

    #[test]
    fn test_filter_matching_nothing_is_empty() {
        let mut board = board();
        board.set_query("zzz-no-such-role");
        let view = board.render();
        assert!(view.cards.is_empty());
        assert_eq!(view.total, 5);
    }

    #[test]
    fn test_filter_on_department_name_lists_whole_department() {
        let mut board = board();
        board.set_query("OPERAT");
        let view = board.render();
        assert_eq!(role_keys(&view), vec!["operations-team-lead", "logistics-coordinator"]);

        board.set_query("finance");
        assert_eq!(board.render().cards.len(), 3);
    }

    #[test]
    fn test_filter_on_role_name_is_case_insensitive() {
        let mut board = board();
        board.set_query("Clerk");
        assert_eq!(role_keys(&board.render()), vec!["accounts-payable-clerk"]);
        // Role names are matched in their display form.
        board.set_query("payable clerk");
        assert_eq!(board.render().cards.len(), 1);
    }

    #[test]
    fn test_toggle_is_per_card() {
        let mut board = board();
        assert_eq!(board.toggle("finance", "fpa-analyst"), Some(true));
        assert_eq!(board.toggle("operations", "logistics-coordinator"), Some(true));
        assert_eq!(board.toggle("finance", "fpa-analyst"), Some(false));

        let view = board.render();
        let open: Vec<&str> = view
            .cards
            .iter()
            .filter(|c| c.open)
            .map(|c| c.role_key.as_str())
            .collect();
        assert_eq!(open, vec!["logistics-coordinator"]);
    }

    #[test]
    fn test_toggle_state_survives_filtering() {
        let mut board = board();
        board.toggle("finance", "fpa-analyst");
        board.set_query("zzz");
        board.set_query("");
        let view = board.render();
        assert!(view.cards.iter().find(|c| c.role_key == "fpa-analyst").unwrap().open);
    }

    #[test]
    fn test_toggle_unknown_card() {
        assert_eq!(board().toggle("finance", "cfo"), None);
    }

    #[test]
    fn test_card_with_description() {
        let view = board().render();
        let card = view.cards.iter().find(|c| c.role_key == "fpa-analyst").unwrap();
        assert!(card.has_description);
        assert_eq!(card.title, "FP&A Analyst");
        assert_eq!(card.department, "Finance & Planning");
        assert_eq!(card.summary.as_deref(), Some("Owns the monthly forecast."));
        assert!(card.notice.is_none());
        assert_eq!(card.sections[0].items, vec!["Build forecasts", "Variance analysis"]);
        assert!(card.sections.iter().all(|s| !s.placeholder));
        assert_eq!(card.screen, "#/candidates");
    }

    #[test]
    fn test_card_without_description_uses_placeholders() {
        let view = board().render();
        let card = view
            .cards
            .iter()
            .find(|c| c.role_key == "accounts-payable-clerk")
            .unwrap();
        assert!(!card.has_description);
        assert_eq!(card.title, "accounts payable clerk");
        assert_eq!(card.department, "Finance");
        assert_eq!(
            card.notice.as_deref(),
            Some("JD not found for accounts payable clerk. Check jd.json key \"accounts-payable-clerk\".")
        );
        assert_eq!(card.sections.len(), 4);
        for section in &card.sections {
            assert!(section.placeholder);
            assert_eq!(section.items, vec![SECTION_PLACEHOLDER]);
        }
    }

    #[test]
    fn test_partial_description_mixes_content_and_placeholders() {
        let view = board().render();
        let card = view
            .cards
            .iter()
            .find(|c| c.role_key == "operations-team-lead")
            .unwrap();
        assert!(card.has_description);
        assert!(card.summary.is_none());
        assert_eq!(
            card.notice.as_deref(),
            Some("JD not found for operations team lead. Check jd.json key \"operations-team-lead\".")
        );
        assert_eq!(card.title, "operations team lead");
        assert!(!card.sections[0].placeholder);
        assert!(card.sections[1..].iter().all(|s| s.placeholder));
    }

    #[test]
    fn test_empty_descriptions_never_fail() {
        let config: Configuration = serde_json::from_str(CONFIG_JSON).unwrap();
        let board = JobsBoard::new(flatten_roles(&config), JobDescriptions::new());
        let view = board.render();
        assert_eq!(view.cards.len(), 5);
        assert!(view.cards.iter().all(|c| c.notice.is_some()));
    }

    #[test]
    fn test_description_without_summary_shows_notice() {
        let config: Configuration = serde_json::from_str(CONFIG_JSON).unwrap();
        let jd: JobDescriptions =
            serde_json::from_str(r#"{"fpa-analyst": {"responsibilities": ["x"]}}"#).unwrap();
        let view = JobsBoard::new(flatten_roles(&config), jd).render();
        let card = view.cards.iter().find(|c| c.role_key == "fpa-analyst").unwrap();
        assert!(card.has_description);
        assert!(card.summary.is_none());
        assert_eq!(
            card.notice.as_deref(),
            Some("JD not found for fpa analyst. Check jd.json key \"fpa-analyst\".")
        );
        assert_eq!(card.sections[0].items, vec!["x"]);
    }

    #[test]
    fn test_empty_strings_fall_back_to_config_names() {
        let config: Configuration = serde_json::from_str(CONFIG_JSON).unwrap();
        let jd: JobDescriptions = serde_json::from_str(
            r#"{"fpa-analyst": {"title": "", "department": "", "summary": ""}}"#,
        )
        .unwrap();
        let view = JobsBoard::new(flatten_roles(&config), jd).render();
        let card = view.cards.iter().find(|c| c.role_key == "fpa-analyst").unwrap();
        assert_eq!(card.title, "fpa analyst");
        assert_eq!(card.department, "Finance");
        assert!(card.summary.is_none());
        assert!(card.notice.is_some());
    }
}
