use std::net::SocketAddr;

use serde::Deserialize;
use mcpkit_core::error::{McpError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub logging: LoggingSection,

    #[serde(default)]
    pub resources: ResourcesSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(McpError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.logging.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(McpError::BadRequest("server.name must not be empty".into()));
        }
        self.listen_addr()?;
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            McpError::BadRequest(format!("server.listen must be a valid socket address: {e}"))
        })
    }
}

fn default_name() -> String {
    "hello-mcp".into()
}
fn default_version() -> String {
    "0.1.0".into()
}
fn default_listen() -> String {
    "127.0.0.1:8080".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingSection {
    /// Log file path. `None` logs to stderr.
    #[serde(default = "default_log_file")]
    pub file: Option<String>,

    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            filter: default_filter(),
        }
    }
}

impl LoggingSection {
    pub fn validate(&self) -> Result<()> {
        if self.filter.trim().is_empty() {
            return Err(McpError::BadRequest("logging.filter must not be empty".into()));
        }
        if matches!(&self.file, Some(f) if f.trim().is_empty()) {
            return Err(McpError::BadRequest(
                "logging.file must not be empty (omit it or set null for stderr)".into(),
            ));
        }
        Ok(())
    }
}

fn default_log_file() -> Option<String> {
    Some("mcp-server.log".into())
}
fn default_filter() -> String {
    "info".into()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourcesSection {
    #[serde(default = "default_readme_path")]
    pub readme_path: String,
}

impl Default for ResourcesSection {
    fn default() -> Self {
        Self {
            readme_path: default_readme_path(),
        }
    }
}

fn default_readme_path() -> String {
    "resources/static/README.md".into()
}
