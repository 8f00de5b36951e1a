use async_trait::async_trait;

use mcpkit_core::error::Result;
use mcpkit_core::protocol::{
    GetPromptRequest, GetPromptResult, PromptArgument, PromptDef, PromptMessage, Role,
};

use crate::context::CallCtx;
use crate::middleware::{Handler, Template};

/// Conversation opener, optionally personalized with `name`.
#[derive(Default)]
pub struct GreetingPrompt;

impl GreetingPrompt {
    pub const NAME: &'static str = "greeting";

    pub fn new() -> Self {
        Self
    }

    pub fn definition() -> PromptDef {
        PromptDef {
            name: Self::NAME.into(),
            description: "A friendly greeting prompt".into(),
            arguments: vec![PromptArgument {
                name: "name".into(),
                description: "Name of the person to greet".into(),
                required: false,
            }],
        }
    }
}

#[async_trait]
impl Handler<Template> for GreetingPrompt {
    async fn call(&self, _ctx: CallCtx, req: GetPromptRequest) -> Result<GetPromptResult> {
        let name = req.arg("name").unwrap_or("friend");
        Ok(GetPromptResult {
            description: "A friendly greeting".into(),
            messages: vec![PromptMessage::new(
                Role::Assistant,
                format!("Hello, {name}! How can I help you today?"),
            )],
        })
    }
}
