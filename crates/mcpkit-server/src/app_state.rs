//! Shared application state for the mcpkit server.
//!
//! Owns the metrics aggregator and the handler registry, and registers the
//! built-in handlers. Cloned into every HTTP request.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::context::CallCtx;
use crate::dispatch::Registry;
use crate::middleware::Middleware;
use crate::obs::metrics::Metrics;
use crate::services::{EchoTool, GreetingPrompt, ReadmeResource};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    metrics: Arc<Metrics>,
    registry: Arc<Registry>,
}

struct AppStateInner {
    cfg: ServerConfig,
    next_request_id: AtomicU64,
}

impl AppState {
    /// Build application state with the built-in handlers registered.
    pub fn new(cfg: ServerConfig) -> Self {
        let metrics = Arc::new(Metrics::new());
        let registry = Registry::new(Middleware::new(Arc::clone(&metrics)));

        registry.register_tool(EchoTool::definition(), Arc::new(EchoTool::new()));

        let readme_path = &cfg.resources.readme_path;
        if !Path::new(readme_path).is_file() {
            // Not fatal: every read will fail (and be counted) until the file appears.
            tracing::warn!(path = %readme_path, "readme resource file not found");
        }
        registry.register_resource(
            ReadmeResource::definition(),
            Arc::new(ReadmeResource::new(readme_path.as_str())),
        );

        registry.register_prompt(GreetingPrompt::definition(), Arc::new(GreetingPrompt::new()));

        tracing::info!(
            tools = registry.tools().len(),
            resources = registry.resources().len(),
            prompts = registry.prompts().len(),
            "handlers registered"
        );

        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                next_request_id: AtomicU64::new(1),
            }),
            metrics,
            registry: Arc::new(registry),
        }
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }

    /// Fresh context for an invocation arriving over `origin`.
    pub fn next_ctx(&self, origin: &'static str) -> CallCtx {
        let id = self.inner.next_request_id.fetch_add(1, Ordering::Relaxed);
        CallCtx::new(id, origin)
    }
}
