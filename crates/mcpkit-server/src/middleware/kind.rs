//! Handler categories as types.
//!
//! Each decorator is written once, generic over [`Kind`]. A kind fixes the
//! request/response types of its category and how failures are represented
//! for it: actions always answer with an in-band failure result, data-reads
//! and templates fail with a propagated error.

use std::fmt;

use mcpkit_core::error::{McpError, Result};
use mcpkit_core::protocol::{
    CallToolRequest, CallToolResult, Category, GetPromptRequest, GetPromptResult,
    ReadResourceRequest, ResourceContents,
};

use crate::obs::metrics::Outcome;

pub trait Kind: Send + Sync + 'static {
    type Request: fmt::Debug + Send + 'static;
    type Response: Send + 'static;

    const CATEGORY: Category;

    /// Resolve a handler-reported error at the logging layer.
    fn on_handler_error(name: &str, err: McpError) -> Result<Self::Response>;

    /// Synthetic outcome substituted for a recovered fault.
    fn on_fault(name: &str) -> Result<Self::Response>;

    /// Item count logged on success.
    fn items(resp: &Self::Response) -> usize;

    /// Whether a successfully returned response still reports a failure.
    fn reports_failure(_resp: &Self::Response) -> bool {
        false
    }

    fn outcome(result: &Result<Self::Response>) -> Outcome {
        match result {
            Err(e) if e.is_fault() => Outcome::RecoveredFault,
            Err(_) => Outcome::HandlerError,
            Ok(resp) if Self::reports_failure(resp) => Outcome::HandlerError,
            Ok(_) => Outcome::Success,
        }
    }
}

/// Tool calls.
pub struct Action;

/// Resource reads.
pub struct DataRead;

/// Prompt generation.
pub struct Template;

impl Kind for Action {
    type Request = CallToolRequest;
    type Response = CallToolResult;

    const CATEGORY: Category = Category::Action;

    fn on_handler_error(name: &str, err: McpError) -> Result<CallToolResult> {
        Ok(CallToolResult::error(format!("Tool {name} failed: {err}")))
    }

    // A converted fault is indistinguishable from any other in-band failure
    // once it leaves the recovery layer.
    fn on_fault(name: &str) -> Result<CallToolResult> {
        Ok(CallToolResult::error(format!(
            "Tool {name} encountered an internal error"
        )))
    }

    fn items(resp: &CallToolResult) -> usize {
        resp.content.len()
    }

    fn reports_failure(resp: &CallToolResult) -> bool {
        resp.is_error
    }
}

impl Kind for DataRead {
    type Request = ReadResourceRequest;
    type Response = Vec<ResourceContents>;

    const CATEGORY: Category = Category::DataRead;

    fn on_handler_error(name: &str, err: McpError) -> Result<Vec<ResourceContents>> {
        Err(McpError::ResourceFailed {
            uri: name.to_string(),
            source: Box::new(err),
        })
    }

    fn on_fault(name: &str) -> Result<Vec<ResourceContents>> {
        Err(McpError::Fault {
            category: Self::CATEGORY,
            handler: name.to_string(),
        })
    }

    fn items(resp: &Vec<ResourceContents>) -> usize {
        resp.len()
    }
}

impl Kind for Template {
    type Request = GetPromptRequest;
    type Response = GetPromptResult;

    const CATEGORY: Category = Category::Template;

    fn on_handler_error(name: &str, err: McpError) -> Result<GetPromptResult> {
        Err(McpError::PromptFailed {
            name: name.to_string(),
            source: Box::new(err),
        })
    }

    fn on_fault(name: &str) -> Result<GetPromptResult> {
        Err(McpError::Fault {
            category: Self::CATEGORY,
            handler: name.to_string(),
        })
    }

    fn items(resp: &GetPromptResult) -> usize {
        resp.messages.len()
    }
}
