use core_runtime::decode::DecodeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResourceError {
    #[error("Resource not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode resource '{resource}': {source}")]
    Decode {
        resource: String,
        #[source]
        source: DecodeError,
    },

    #[error("Conversion failed for item {index}: {message}")]
    Conversion { index: usize, message: String },

    #[error("No item named '{name}' in resource '{resource}'")]
    NameNotFound { name: String, resource: String },
}

impl ResourceError {
    /// Decode diagnostics, when the failure happened while decoding
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Self::Decode { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ResourceError>;
