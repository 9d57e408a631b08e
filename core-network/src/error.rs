use bridge_traits::{BridgeError, UnsatisfiedReason};
use core_runtime::decode::DecodeError;
use std::time::Duration;
use thiserror::Error;

/// Why the transport produced no response
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request cancelled")]
    Cancelled,

    #[error("request timed out after {0:?}")]
    TimedOut(Duration),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Invalid URL: {0:?}")]
    InvalidUrl(String),

    #[error("Server responded with status {code}")]
    InternalServerError { code: u16 },

    #[error("Empty response: {0}")]
    EmptyResponse(#[source] TransportError),

    #[error("Network unavailable{}", reason.map(|r| format!(" ({:?})", r)).unwrap_or_default())]
    NetworkUnavailable { reason: Option<UnsatisfiedReason> },

    #[error("Reachability monitor has not been started")]
    MonitorNotConfigured,

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] DecodeError),
}

impl From<TransportError> for NetworkError {
    fn from(error: TransportError) -> Self {
        Self::EmptyResponse(error)
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;
