use serde::{Deserialize, Serialize};

/// Versioned wrapper some resource files use instead of a bare array
///
/// ```json
/// { "version": "2", "content": [ ... ] }
/// ```
///
/// The loader does not interpret `version`; callers compare it themselves
/// when the item shape changed between versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceEnvelope<T> {
    pub version: String,
    pub content: Vec<T>,
}

impl<T> ResourceEnvelope<T> {
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Convert every item, keeping the version
    pub fn map<U, F>(self, f: F) -> ResourceEnvelope<U>
    where
        F: FnMut(T) -> U,
    {
        ResourceEnvelope {
            version: self.version,
            content: self.content.into_iter().map(f).collect(),
        }
    }
}

impl<T> IntoIterator for ResourceEnvelope<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}
