use serde::Serialize;
use serde_json::Number;

/// Funnel stages shared by the dashboard and report pipeline charts.
pub const PIPELINE_STAGES: [&str; 6] = ["Sourced", "Applied", "Screen", "Interview", "Offer", "Hired"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Doughnut,
}

/// Data handed to the chart renderer. Styling is the renderer's business.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartInput {
    pub kind: ChartKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    pub labels: Vec<String>,
    pub values: Vec<Number>,
}

impl ChartInput {
    pub fn bar(series: &str, labels: Vec<String>, values: Vec<Number>) -> Self {
        Self {
            kind: ChartKind::Bar,
            series: Some(series.to_string()),
            labels,
            values,
        }
    }

    pub fn doughnut(labels: Vec<String>, values: Vec<Number>) -> Self {
        Self {
            kind: ChartKind::Doughnut,
            series: None,
            labels,
            values,
        }
    }

    pub fn pipeline(values: &[Number]) -> Self {
        Self::bar(
            "Pipeline",
            PIPELINE_STAGES.iter().map(|s| s.to_string()).collect(),
            values.to_vec(),
        )
    }
}
