use serde::Serialize;

/// What the user is currently browsing. Rebuilt wholesale whenever the
/// designation or viewer views are entered; never persisted.
///
/// Invariant: `index < images.len()` whenever `images` is non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BrowseContext {
    pub dept_key: Option<String>,
    pub role_key: Option<String>,
    pub images: Vec<String>,
    pub index: usize,
}

impl BrowseContext {
    /// Context for the designation list of one department.
    pub fn for_department(dept_key: &str) -> Self {
        Self {
            dept_key: Some(dept_key.to_string()),
            ..Self::default()
        }
    }

    /// Context for the viewer. `requested` comes straight from the URL and is
    /// wrapped into range, so negative and oversized indexes are accepted.
    pub fn at(dept_key: &str, role_key: &str, images: &[String], requested: i64) -> Self {
        Self {
            dept_key: Some(dept_key.to_string()),
            role_key: Some(role_key.to_string()),
            images: images.to_vec(),
            index: wrap_index(requested, images.len()),
        }
    }

    pub fn current_image(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    pub fn next_index(&self) -> usize {
        match self.images.len() {
            0 => 0,
            len => (self.index + 1) % len,
        }
    }

    pub fn prev_index(&self) -> usize {
        match self.images.len() {
            0 => 0,
            len => (self.index + len - 1) % len,
        }
    }

    /// `"<i+1>/<len>"`, as shown in the viewer HUD.
    pub fn position_label(&self) -> String {
        match self.images.len() {
            0 => "0/0".to_string(),
            len => format!("{}/{}", self.index + 1, len),
        }
    }
}

pub fn wrap_index(requested: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    requested.rem_euclid(len as i64) as usize
}
