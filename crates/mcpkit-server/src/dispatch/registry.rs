use dashmap::DashMap;

use mcpkit_core::error::{McpError, Result};
use mcpkit_core::protocol::{
    CallToolRequest, CallToolResult, GetPromptRequest, GetPromptResult, PromptDef,
    ReadResourceRequest, ResourceContents, ResourceDef, ToolDef,
};

use crate::context::CallCtx;
use crate::middleware::{Action, DataRead, Kind, Middleware, SharedHandler, Template};

/// A registered handler: its advertised definition plus the decorated handler.
struct Entry<D, K: Kind> {
    def: D,
    handler: SharedHandler<K>,
}

/// Named handlers for all three categories.
///
/// Handlers are decorated by the [`Middleware`] once, at registration, and
/// looked up by name (URI for resources) on every call.
pub struct Registry {
    middleware: Middleware,
    tools: DashMap<String, Entry<ToolDef, Action>>,
    resources: DashMap<String, Entry<ResourceDef, DataRead>>,
    prompts: DashMap<String, Entry<PromptDef, Template>>,
}

impl Registry {
    pub fn new(middleware: Middleware) -> Self {
        Self {
            middleware,
            tools: DashMap::new(),
            resources: DashMap::new(),
            prompts: DashMap::new(),
        }
    }

    pub fn middleware(&self) -> &Middleware {
        &self.middleware
    }

    /// Register (or replace) a tool under `def.name`.
    pub fn register_tool(&self, def: ToolDef, handler: SharedHandler<Action>) {
        let handler = self.middleware.wrap_action(def.name.as_str(), handler);
        tracing::debug!(tool = %def.name, "registered tool");
        self.tools.insert(def.name.clone(), Entry { def, handler });
    }

    /// Register (or replace) a resource under `def.uri`.
    pub fn register_resource(&self, def: ResourceDef, handler: SharedHandler<DataRead>) {
        let handler = self.middleware.wrap_data_read(def.uri.as_str(), handler);
        tracing::debug!(resource = %def.uri, "registered resource");
        self.resources.insert(def.uri.clone(), Entry { def, handler });
    }

    /// Register (or replace) a prompt under `def.name`.
    pub fn register_prompt(&self, def: PromptDef, handler: SharedHandler<Template>) {
        let handler = self.middleware.wrap_template(def.name.as_str(), handler);
        tracing::debug!(prompt = %def.name, "registered prompt");
        self.prompts.insert(def.name.clone(), Entry { def, handler });
    }

    pub fn tools(&self) -> Vec<ToolDef> {
        let mut defs: Vec<_> = self.tools.iter().map(|e| e.value().def.clone()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    pub fn resources(&self) -> Vec<ResourceDef> {
        let mut defs: Vec<_> = self.resources.iter().map(|e| e.value().def.clone()).collect();
        defs.sort_by(|a, b| a.uri.cmp(&b.uri));
        defs
    }

    pub fn prompts(&self) -> Vec<PromptDef> {
        let mut defs: Vec<_> = self.prompts.iter().map(|e| e.value().def.clone()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    pub async fn call_tool(&self, ctx: CallCtx, req: CallToolRequest) -> Result<CallToolResult> {
        let handler = lookup(&self.tools, &req.name)?;
        handler.call(ctx, req).await
    }

    pub async fn read_resource(
        &self,
        ctx: CallCtx,
        req: ReadResourceRequest,
    ) -> Result<Vec<ResourceContents>> {
        let handler = lookup(&self.resources, &req.uri)?;
        handler.call(ctx, req).await
    }

    pub async fn get_prompt(&self, ctx: CallCtx, req: GetPromptRequest) -> Result<GetPromptResult> {
        let handler = lookup(&self.prompts, &req.name)?;
        handler.call(ctx, req).await
    }
}

// Clone the handler out so no map guard is held across the call.
fn lookup<D, K: Kind>(map: &DashMap<String, Entry<D, K>>, name: &str) -> Result<SharedHandler<K>> {
    map.get(name)
        .map(|e| e.value().handler.clone())
        .ok_or_else(|| McpError::UnknownHandler {
            category: K::CATEGORY,
            name: name.to_string(),
        })
}
