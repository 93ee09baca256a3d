use std::fmt;
use std::path::{Path, PathBuf};

/// Stable identifier for one open project root. The host hands these out;
/// the engine only compares and hashes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeId(String);

impl ScopeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One open project root the host editor recognizes. Configured settings-file
/// paths are resolved relative to `root`.
#[derive(Debug, Clone)]
pub struct ProjectScope {
    pub id: ScopeId,
    pub root: PathBuf,
}

impl ProjectScope {
    pub fn new(id: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            id: ScopeId::new(id),
            root: root.into(),
        }
    }

    /// Resolves a configured relative path against this scope's root.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }
}
