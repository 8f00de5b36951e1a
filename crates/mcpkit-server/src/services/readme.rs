use std::path::PathBuf;

use async_trait::async_trait;

use mcpkit_core::error::{McpError, Result};
use mcpkit_core::protocol::{ReadResourceRequest, ResourceContents, ResourceDef};

use crate::context::CallCtx;
use crate::middleware::{DataRead, Handler};

pub const README_URI: &str = "file://README.md";

/// Serves a markdown file from disk. The file is read on every request.
pub struct ReadmeResource {
    path: PathBuf,
}

impl ReadmeResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn definition() -> ResourceDef {
        ResourceDef {
            uri: README_URI.into(),
            name: "Local README".into(),
            mime_type: "text/plain".into(),
        }
    }
}

#[async_trait]
impl Handler<DataRead> for ReadmeResource {
    async fn call(&self, _ctx: CallCtx, _req: ReadResourceRequest) -> Result<Vec<ResourceContents>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| McpError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        Ok(vec![ResourceContents {
            uri: "docs://readme".into(),
            mime_type: "text/markdown".into(),
            text,
        }])
    }
}
