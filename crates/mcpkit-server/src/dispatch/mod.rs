//! Registry module exports.
//!
//! Re-exports the registry so downstream consumers can depend on this module
//! directly.

pub mod registry;

pub use registry::Registry;
