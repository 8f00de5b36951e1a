use async_trait::async_trait;

use mcpkit_core::error::Result;
use mcpkit_core::protocol::{CallToolRequest, CallToolResult, ToolDef, ToolParam};

use crate::context::CallCtx;
use crate::middleware::{Action, Handler};

/// Greets the `name` argument back.
#[derive(Default)]
pub struct EchoTool;

impl EchoTool {
    pub const NAME: &'static str = "echo";

    pub fn new() -> Self {
        Self
    }

    pub fn definition() -> ToolDef {
        ToolDef {
            name: Self::NAME.into(),
            description: "Echo back the provided text".into(),
            params: vec![ToolParam {
                name: "name".into(),
                description: "Name of the person to greet".into(),
                required: true,
            }],
        }
    }
}

#[async_trait]
impl Handler<Action> for EchoTool {
    async fn call(&self, _ctx: CallCtx, req: CallToolRequest) -> Result<CallToolResult> {
        // Bad input is the caller's problem: answer in-band, don't fail the call.
        let name = match req.require_string("name") {
            Ok(name) => name,
            Err(e) => return Ok(CallToolResult::error(e.to_string())),
        };
        Ok(CallToolResult::text(format!("Hello, {name}!")))
    }
}
