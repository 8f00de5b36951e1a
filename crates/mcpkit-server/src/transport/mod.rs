//! Transport layer (HTTP).
//!
//! Thin JSON endpoints that turn requests into registry calls. The handler
//! middleware does not depend on anything here.

pub mod http;
