use serde::Serialize;

use crate::nav::config_store::LoadError;
use crate::views::{Outcome, View, ViewDeps};

#[derive(Debug, Clone, Serialize)]
pub struct InterviewRow {
    pub department: &'static str,
    pub designation: &'static str,
    pub candidate: &'static str,
    pub stage: &'static str,
    pub interviewer: &'static str,
    pub date: &'static str,
    pub time: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterviewsView {
    pub rows: Vec<InterviewRow>,
}

impl From<[&'static str; 8]> for InterviewRow {
    fn from(
        [department, designation, candidate, stage, interviewer, date, time, status]: [&'static str; 8],
    ) -> Self {
        InterviewRow {
            department,
            designation,
            candidate,
            stage,
            interviewer,
            date,
            time,
            status,
        }
    }
}

/// Demonstration tracker rows.
const SCHEDULE: [[&str; 8]; 4] = [
    ["Finance", "financial analyst", "ANJALI JOSEPH", "HR Screen", "Priya S", "2025-09-01", "15:00", "Scheduled"],
    ["Marketing", "marketing manager", "AKSHIN", "Panel", "Ravi T", "2025-09-01", "16:30", "Scheduled"],
    ["Operations", "operations team lead", "PRIYA SHARMA", "Tech", "Divya N", "2025-09-02", "11:00", "Completed"],
    ["Finance", "fpa analyst", "MICHAEL MORONNE", "Final", "CFO", "2025-09-03", "12:00", "Pending"],
];

pub async fn render(deps: &ViewDeps<'_>) -> Result<Outcome, LoadError> {
    if let Some(redirect) = deps.guard() {
        return Ok(redirect);
    }
    Ok(View::Interviews(InterviewsView {
        rows: SCHEDULE.into_iter().map(InterviewRow::from).collect(),
    })
    .into())
}
