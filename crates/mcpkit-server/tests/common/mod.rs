//! Test handlers and a log capture shared by the integration tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use mcpkit_core::error::{McpError, Result};
use mcpkit_core::protocol::{CallToolRequest, CallToolResult};
use mcpkit_server::context::CallCtx;
use mcpkit_server::middleware::{Action, Handler, Kind};

/// Panics on every call, whatever the kind.
pub struct Explodes;

#[async_trait]
impl<K: Kind> Handler<K> for Explodes {
    async fn call(&self, _ctx: CallCtx, _req: K::Request) -> Result<K::Response> {
        panic!("kaboom")
    }
}

/// Reports a handler error on every call.
pub struct Fails;

#[async_trait]
impl<K: Kind> Handler<K> for Fails {
    async fn call(&self, _ctx: CallCtx, _req: K::Request) -> Result<K::Response> {
        Err(McpError::NotFound("gone".into()))
    }
}

/// Sleeps, then succeeds unless the request carries `fail: true`.
pub struct Slow(pub Duration);

#[async_trait]
impl Handler<Action> for Slow {
    async fn call(&self, _ctx: CallCtx, req: CallToolRequest) -> Result<CallToolResult> {
        tokio::time::sleep(self.0).await;
        if req.arguments.get("fail").and_then(|v| v.as_bool()) == Some(true) {
            return Err(McpError::Internal("asked to fail".into()));
        }
        Ok(CallToolResult::text("done"))
    }
}

/// Collects formatted log output for the current thread.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LogCapture {
    /// Route this thread's events into the capture until the guard drops.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let buf = Arc::clone(&self.0);
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || CaptureWriter(Arc::clone(&buf)))
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}
