//! Log sink bootstrap.
//!
//! Stdout may belong to the protocol, so logs go to the configured file
//! (append, created if missing) or to stderr. `RUST_LOG` overrides the
//! configured filter.

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use mcpkit_core::error::{McpError, Result};

use crate::config::LoggingSection;

pub fn init(cfg: &LoggingSection) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.filter));
    let builder = fmt().with_env_filter(filter).with_target(false);

    let res = match &cfg.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| McpError::Internal(format!("open log file {path} failed: {e}")))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
        None => builder.with_writer(std::io::stderr).try_init(),
    };

    res.map_err(|e| McpError::Internal(format!("logging init failed: {e}")))
}
