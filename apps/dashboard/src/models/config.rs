use serde::{Deserialize, Serialize};
use serde_json::Number;

use indexmap::IndexMap;

/// The dashboard configuration document (`data/config.json`).
/// Loaded once per process and never mutated afterwards. Maps keep the order
/// keys were written in, which is the order they are listed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(default)]
    pub widgets: Widgets,
    pub departments: IndexMap<String, Department>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    /// roleKey -> resume image file names, in viewing order.
    pub designations: IndexMap<String, Vec<String>>,
}

/// Demonstration metrics shown on the home dashboard. Numbers are kept as
/// written in the document, integer or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Widgets {
    pub open_reqs: Number,
    pub new_candidates: Number,
    pub interviews: Vec<String>,
    pub tasks: Vec<String>,
    /// One value per funnel stage.
    pub pipeline: Vec<Number>,
    pub stages: IndexMap<String, Number>,
}

impl Default for Widgets {
    fn default() -> Self {
        Self {
            open_reqs: Number::from(0),
            new_candidates: Number::from(0),
            interviews: Vec::new(),
            tasks: Vec::new(),
            pipeline: Vec::new(),
            stages: IndexMap::new(),
        }
    }
}

impl Configuration {
    pub fn department(&self, dept_key: &str) -> Option<&Department> {
        self.departments.get(dept_key)
    }

    /// Resume image list for a department/designation pair, if both exist.
    pub fn images(&self, dept_key: &str, role_key: &str) -> Option<&[String]> {
        self.department(dept_key)?
            .designations
            .get(role_key)
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Two departments, the second listed out of alphabetical order on purpose.
    pub const CONFIG_JSON: &str = r#"{
        "widgets": {
            "openReqs": 12,
            "newCandidates": 37,
            "interviews": ["Mon - Finance panel", "Wed - Ops tech round"],
            "tasks": ["Review FP&A shortlist"],
            "pipeline": [320, 220, 140, 75, 30, 18],
            "stages": {"Screen": 40, "Interview": 25, "Offer": 8}
        },
        "departments": {
            "finance": {
                "name": "Finance",
                "designations": {
                    "financial-analyst": ["fa1.png", "fa2.png", "fa3.png", "fa4.png"],
                    "fpa-analyst": ["fp1.png", "fp2.png", "fp3.png", "fp4.png"],
                    "accounts-payable-clerk": ["ap1.png", "ap2.png", "ap3.png", "ap4.png"]
                }
            },
            "operations": {
                "name": "Operations",
                "designations": {
                    "operations-team-lead": ["ol1.png", "ol2.png", "ol3.png", "ol4.png"],
                    "logistics-coordinator": ["lc1.png", "lc2.png"]
                }
            }
        }
    }"#;
}
