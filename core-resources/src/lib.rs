//! # Bundled Resource Loading
//!
//! Resolves logical resource names to JSON files under a bundle root and
//! decodes them into typed collections.
//!
//! ```ignore
//! use core_resources::{LocalJsonLoader, ResourceId, ResourceLocator};
//!
//! let loader = LocalJsonLoader::new(ResourceLocator::new("/path/to/Resources"));
//! let colors: Vec<Color> = loader.load_all(&ResourceId::in_folder("colors", "palettes"))?;
//! ```
//!
//! Decode failures carry a [`DecodeError`](core_runtime::decode::DecodeError)
//! with the structural path of the offending value.

pub mod envelope;
pub mod error;
pub mod loader;
pub mod locator;
pub mod text;

pub use envelope::ResourceEnvelope;
pub use error::{ResourceError, Result};
pub use loader::{Loadable, LocalJsonLoader, Named};
pub use locator::{ResourceId, ResourceLocator};
