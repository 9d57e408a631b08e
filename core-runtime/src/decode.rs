//! # JSON Decoding with Structural Diagnostics
//!
//! Every JSON document the core reads (bundled resources, HTTP bodies) goes
//! through [`decode_json`]. On failure the caller gets a [`DecodeError`]
//! that says *what* went wrong (missing key, wrong type, broken syntax) and
//! *where*: a [`CodingPath`] of object keys and array indices from the
//! document root to the failing value.
//!
//! ```
//! use core_runtime::decode::{decode_json, DecodeError};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Color {
//!     name: String,
//! }
//!
//! let err = decode_json::<Vec<Color>>(br#"[{"name": "red"}, {"name": 7}]"#).unwrap_err();
//! assert!(matches!(err, DecodeError::TypeMismatch { .. }));
//! assert_eq!(err.path().to_string(), "$[1].name");
//! ```

use serde::de::DeserializeOwned;
use serde_json::error::Category;
use std::fmt;
use thiserror::Error;

/// One step in a [`CodingPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CodingKey {
    /// Object member or enum variant name
    Key(String),
    /// Array element position
    Index(usize),
    /// The document itself, for failures before any member or element
    Root,
}

/// Location of a value inside a JSON document, root first
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CodingPath(Vec<CodingKey>);

impl CodingPath {
    pub fn new(keys: Vec<CodingKey>) -> Self {
        Self(keys)
    }

    /// Path of a failure located at the document root
    pub fn root() -> Self {
        Self(vec![CodingKey::Root])
    }

    pub fn keys(&self) -> &[CodingKey] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn from_tracked(path: &serde_path_to_error::Path) -> Self {
        use serde_path_to_error::Segment;

        let keys = path
            .iter()
            .filter_map(|segment| match segment {
                Segment::Seq { index } => Some(CodingKey::Index(*index)),
                Segment::Map { key } => Some(CodingKey::Key(key.clone())),
                Segment::Enum { variant } => Some(CodingKey::Key(variant.clone())),
                Segment::Unknown => None,
            })
            .collect::<Vec<_>>();

        if keys.is_empty() {
            Self::root()
        } else {
            Self(keys)
        }
    }
}

impl fmt::Display for CodingPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for key in &self.0 {
            match key {
                CodingKey::Key(name) => write!(f, ".{}", name)?,
                CodingKey::Index(index) => write!(f, "[{}]", index)?,
                CodingKey::Root => {}
            }
        }
        Ok(())
    }
}

/// Why a JSON document could not be decoded into the requested type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Not valid JSON, or a value the target type rejects outright
    #[error("Data corrupted at {path} (line {line}, column {column}): {description}")]
    DataCorrupted {
        path: CodingPath,
        description: String,
        line: usize,
        column: usize,
    },

    /// A required object member is absent; `path` points at the object
    #[error("Key '{key}' not found at {path}: {description}")]
    KeyNotFound {
        key: String,
        path: CodingPath,
        description: String,
    },

    /// A required value is `null`
    #[error("Value not found at {path}: {description}")]
    ValueNotFound { path: CodingPath, description: String },

    /// The value exists but has the wrong JSON type, range or length
    #[error("Type mismatch at {path}: {description}")]
    TypeMismatch { path: CodingPath, description: String },

    #[error("Decoding failed at {path}: {description}")]
    Unknown { path: CodingPath, description: String },
}

impl DecodeError {
    pub fn path(&self) -> &CodingPath {
        match self {
            Self::DataCorrupted { path, .. }
            | Self::KeyNotFound { path, .. }
            | Self::ValueNotFound { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::Unknown { path, .. } => path,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::DataCorrupted { description, .. }
            | Self::KeyNotFound { description, .. }
            | Self::ValueNotFound { description, .. }
            | Self::TypeMismatch { description, .. }
            | Self::Unknown { description, .. } => description,
        }
    }

    fn classify(path: CodingPath, error: &serde_json::Error) -> Self {
        let description = message_without_position(error);

        match error.classify() {
            Category::Syntax | Category::Eof => Self::DataCorrupted {
                path,
                description,
                line: error.line(),
                column: error.column(),
            },
            Category::Io => Self::Unknown { path, description },
            Category::Data => {
                if let Some(key) = missing_field(&description) {
                    Self::KeyNotFound {
                        key,
                        path,
                        description,
                    }
                } else if description.starts_with("invalid type: null") {
                    Self::ValueNotFound { path, description }
                } else if description.starts_with("invalid type")
                    || description.starts_with("invalid value")
                    || description.starts_with("invalid length")
                {
                    Self::TypeMismatch { path, description }
                } else if description.starts_with("unknown variant")
                    || description.starts_with("unknown field")
                {
                    Self::DataCorrupted {
                        path,
                        description,
                        line: error.line(),
                        column: error.column(),
                    }
                } else {
                    Self::Unknown { path, description }
                }
            }
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for DecodeError {
    fn from(error: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = CodingPath::from_tracked(error.path());
        Self::classify(path, error.inner())
    }
}

/// Decode `bytes` as a complete JSON document of type `T`
///
/// Trailing non-whitespace after the document is rejected, same as
/// `serde_json::from_slice`.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    let value: T = serde_path_to_error::deserialize(&mut deserializer)?;
    deserializer
        .end()
        .map_err(|e| DecodeError::classify(CodingPath::root(), &e))?;
    Ok(value)
}

// serde_json appends " at line L column C" to positioned messages.
fn message_without_position(error: &serde_json::Error) -> String {
    let full = error.to_string();
    let suffix = format!(" at line {} column {}", error.line(), error.column());
    match full.strip_suffix(&suffix) {
        Some(message) => message.to_string(),
        None => full,
    }
}

fn missing_field(description: &str) -> Option<String> {
    description
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
        .map(str::to_string)
}
