use std::collections::HashMap;

use url::form_urlencoded;

/// Path used when the fragment is empty.
pub const DEFAULT_PATH: &str = "/login";

/// A parsed location fragment: `#/viewer?dept=finance&role=fpa-analyst&i=2`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub path: String,
    pub params: HashMap<String, String>,
}

impl Fragment {
    /// Parses a raw fragment. The leading `#` is optional, the path is split
    /// from the query at the first `?`, and a missing path means `/login`.
    /// Duplicate query keys resolve to the last occurrence.
    pub fn parse(raw: &str) -> Self {
        let body = raw.strip_prefix('#').unwrap_or(raw);
        let (path, query) = body.split_once('?').unwrap_or((body, ""));

        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let path = if trimmed.is_empty() {
            DEFAULT_PATH.to_string()
        } else {
            format!("/{trimmed}")
        };

        let params = form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect::<HashMap<_, _>>();

        Fragment { path, params }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Builds `#<path>?k=v&...` with query values form-encoded.
pub fn build(path: &str, params: &[(&str, &str)]) -> String {
    if params.is_empty() {
        return format!("#{path}");
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params)
        .finish();
    format!("#{path}?{query}")
}

pub fn designation(dept_key: &str) -> String {
    build("/designation", &[("dept", dept_key)])
}

pub fn viewer(dept_key: &str, role_key: &str, index: usize) -> String {
    build(
        "/viewer",
        &[("dept", dept_key), ("role", role_key), ("i", &index.to_string())],
    )
}
