use serde::Serialize;
use serde_json::Number;

use crate::nav::config_store::LoadError;
use crate::views::charts::ChartInput;
use crate::views::{Outcome, View, ViewDeps};

#[derive(Debug, Clone, Serialize)]
pub struct Kpi {
    pub id: &'static str,
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportsView {
    pub kpis: Vec<Kpi>,
    pub funnel: ChartInput,
    pub sources: ChartInput,
}

const KPIS: [Kpi; 4] = [
    Kpi { id: "kpiTTF", label: "Time to fill (days)", value: "24" },
    Kpi { id: "kpiOAR", label: "Offer acceptance rate", value: "78%" },
    Kpi { id: "kpiI2H", label: "Interview to hire", value: "4.2:1" },
    Kpi { id: "kpiConv", label: "Pipeline conversion", value: "12%" },
];

const FUNNEL: [u32; 6] = [320, 220, 140, 75, 30, 18];
const SOURCES: [(&str, u32); 5] = [
    ("LinkedIn", 42),
    ("Referral", 18),
    ("Job Board", 22),
    ("Campus", 10),
    ("Direct", 8),
];

pub fn build() -> ReportsView {
    ReportsView {
        kpis: KPIS.to_vec(),
        funnel: ChartInput::pipeline(&FUNNEL.map(Number::from)),
        sources: ChartInput::doughnut(
            SOURCES.iter().map(|(label, _)| label.to_string()).collect(),
            SOURCES.iter().map(|(_, n)| Number::from(*n)).collect(),
        ),
    }
}

pub async fn render(deps: &ViewDeps<'_>) -> Result<Outcome, LoadError> {
    if let Some(redirect) = deps.guard() {
        return Ok(redirect);
    }
    Ok(View::Reports(build()).into())
}
