use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A job description entry from `data/jd.json`. Every field is optional:
/// partially written entries render with placeholders for what is missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDescription {
    pub title: Option<String>,
    pub department: Option<String>,
    pub summary: Option<String>,
    pub responsibilities: Vec<String>,
    pub requirements: Vec<String>,
    pub qualifications: Vec<String>,
    pub metrics: Vec<String>,
}

/// roleKey -> description.
pub type JobDescriptions = HashMap<String, JobDescription>;
