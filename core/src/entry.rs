use serde::{Deserialize, Serialize};

/// One file to be placed in an image: a forward-slash relative path and its raw bytes.
///
/// Path uniqueness across a set of entries is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEntry {
    pub path: String,
    pub content: Vec<u8>,
}

impl InputEntry {
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Everything before the last `/`, or `""` for entries in the root.
    pub fn parent_path(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[..idx],
            None => "",
        }
    }

    /// The last path component.
    pub fn file_name(&self) -> &str {
        match self.path.rfind('/') {
            Some(idx) => &self.path[idx + 1..],
            None => &self.path,
        }
    }

    /// All strict directory prefixes of this entry's path, shortest first.
    /// The root (`""`) is implicit and never returned.
    pub fn ancestor_dirs(&self) -> impl Iterator<Item = &str> + '_ {
        self.path
            .match_indices('/')
            .map(move |(idx, _)| &self.path[..idx])
    }
}

/// Total content bytes across a set of entries.
pub fn total_content_size(entries: &[InputEntry]) -> u64 {
    entries.iter().map(|e| e.content.len() as u64).sum()
}
