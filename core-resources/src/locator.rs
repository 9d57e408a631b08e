//! Resource identity and path resolution

use std::fmt;
use std::path::{Path, PathBuf};

/// File extension of every bundled resource
pub const RESOURCE_EXTENSION: &str = "json";

/// Logical identity of a bundled resource
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub name: String,
    pub folder: Option<String>,
}

impl ResourceId {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folder: None,
        }
    }

    pub fn in_folder(name: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folder: Some(folder.into()),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.folder {
            Some(folder) => write!(f, "{}/{}", folder, self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl From<&str> for ResourceId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Resolves [`ResourceId`]s against a bundle root directory
///
/// Resolution never touches the filesystem; whether the file exists is
/// checked by whoever reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLocator {
    root: PathBuf,
}

impl ResourceLocator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/<name>.json` or `<root>/<folder>/<name>.json`
    pub fn locate(&self, id: &ResourceId) -> PathBuf {
        let mut path = self.root.clone();
        if let Some(folder) = &id.folder {
            path.push(folder);
        }
        path.push(format!("{}.{}", id.name, RESOURCE_EXTENSION));
        path
    }
}
