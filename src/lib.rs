//! Umbrella crate for the DevCore workspace.
//!
//! Hosts depend on `devcore-workspace` and pick a feature instead of wiring
//! each crate by hand:
//!
//! - `desktop-shims` (default): the full [`core_service::CoreService`] façade
//!   with desktop bridge defaults.
//! - `resources-only`: just the bundled JSON loader.
//! - `network-only`: just the reachability monitor and fetch service.

#[cfg(feature = "desktop-shims")]
pub use core_service as service;

#[cfg(feature = "resources-only")]
pub use core_resources as resources;

#[cfg(feature = "network-only")]
pub use core_network as network;
