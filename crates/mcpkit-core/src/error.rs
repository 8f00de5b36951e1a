//! Shared error type across mcpkit crates.

use thiserror::Error;

use crate::protocol::Category;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / malformed request.
    BadRequest,
    /// No handler or backing resource under that name.
    NotFound,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, McpError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("required argument \"{0}\" not found")]
    MissingArgument(String),
    #[error("argument \"{name}\" is not a {expected}")]
    InvalidArgument { name: String, expected: &'static str },
    #[error("unknown {category} handler: {name}")]
    UnknownHandler { category: Category, name: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("read {path} failed: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read resource {uri}: {source}")]
    ResourceFailed {
        uri: String,
        #[source]
        source: Box<McpError>,
    },
    #[error("failed to get prompt {name}: {source}")]
    PromptFailed {
        name: String,
        #[source]
        source: Box<McpError>,
    },
    #[error("{} {handler} encountered an internal error", .category.noun())]
    Fault { category: Category, handler: String },
    #[error("internal: {0}")]
    Internal(String),
}

impl McpError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            McpError::BadRequest(_)
            | McpError::MissingArgument(_)
            | McpError::InvalidArgument { .. } => ClientCode::BadRequest,
            McpError::UnknownHandler { .. } | McpError::NotFound(_) => ClientCode::NotFound,
            McpError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ClientCode::NotFound
            }
            McpError::ResourceFailed { source, .. } | McpError::PromptFailed { source, .. } => {
                source.client_code()
            }
            McpError::Io { .. } | McpError::Fault { .. } | McpError::Internal(_) => {
                ClientCode::Internal
            }
        }
    }

    /// Whether this error stands for a recovered fault, looking through the
    /// context added on the way up.
    pub fn is_fault(&self) -> bool {
        match self {
            McpError::Fault { .. } => true,
            McpError::ResourceFailed { source, .. } | McpError::PromptFailed { source, .. } => {
                source.is_fault()
            }
            _ => false,
        }
    }
}
