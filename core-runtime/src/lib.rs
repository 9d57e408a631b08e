//! # Core Runtime Module
//!
//! Foundational infrastructure shared by the DevCore crates:
//! - Configuration management ([`config`])
//! - Logging and tracing setup ([`logging`])
//! - JSON decoding with structural error paths ([`decode`])
//! - Typed access to the settings store ([`settings`])

pub mod config;
pub mod decode;
pub mod error;
pub mod logging;
pub mod settings;

pub use error::{Error, Result};
