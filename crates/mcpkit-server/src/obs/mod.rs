//! Observability: invocation metrics and log sink setup.
//!
//! Metrics live in-process for the lifetime of the server and are read via
//! snapshots by the `/metrics` and `/v1/stats` handlers.

pub mod logging;
pub mod metrics;
