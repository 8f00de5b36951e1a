//! Top-level facade crate for mcpkit.
//!
//! Re-exports the protocol types and the server library so users can depend on a single crate.

pub mod core {
    pub use mcpkit_core::*;
}

pub mod server {
    pub use mcpkit_server::*;
}
