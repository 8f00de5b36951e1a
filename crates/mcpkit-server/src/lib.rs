//! mcpkit server library entry.
//!
//! This crate wires the handler middleware (metrics, logging, fault
//! recovery), the handler registry, the built-in handlers and the HTTP
//! surface into one server. It is consumed by the binary (`main.rs`) and by
//! integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod app_state;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod middleware;
pub mod obs;
pub mod ops;
pub mod router;
pub mod services;
pub mod transport;
