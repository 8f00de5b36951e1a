//! mcpkit core: transport-agnostic request/response types and the error surface.
//!
//! This crate defines the value types exchanged with action, data-read and
//! template handlers, plus the error type shared by the server crate. It
//! carries no runtime dependencies so it can be reused by clients and tests.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `McpError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{ClientCode, McpError, Result};
