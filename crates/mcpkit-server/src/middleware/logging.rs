use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use mcpkit_core::error::Result;

use super::{Handler, Kind, SharedHandler};
use crate::context::CallCtx;

/// Structured start/finish logging around a handler.
///
/// A handler error is resolved here per kind: actions turn it into an
/// in-band failure result, the other kinds propagate it with the handler
/// name attached.
pub struct WithLogging<K: Kind> {
    name: Arc<str>,
    inner: SharedHandler<K>,
}

impl<K: Kind> WithLogging<K> {
    pub fn new(name: Arc<str>, inner: SharedHandler<K>) -> Self {
        Self { name, inner }
    }
}

#[async_trait]
impl<K: Kind> Handler<K> for WithLogging<K> {
    async fn call(&self, ctx: CallCtx, req: K::Request) -> Result<K::Response> {
        let request_id = ctx.request_id();
        let started = Instant::now();
        tracing::info!(
            category = %K::CATEGORY,
            handler = %self.name,
            request_id,
            args = ?req,
            "invocation started"
        );

        let result = self.inner.call(ctx, req).await;
        let elapsed_us = started.elapsed().as_micros() as u64;

        match result {
            Ok(resp) if K::reports_failure(&resp) => {
                tracing::warn!(
                    category = %K::CATEGORY,
                    handler = %self.name,
                    request_id,
                    elapsed_us,
                    "invocation reported failure"
                );
                Ok(resp)
            }
            Ok(resp) => {
                tracing::info!(
                    category = %K::CATEGORY,
                    handler = %self.name,
                    request_id,
                    elapsed_us,
                    items = K::items(&resp),
                    "invocation completed"
                );
                Ok(resp)
            }
            Err(err) => {
                tracing::warn!(
                    category = %K::CATEGORY,
                    handler = %self.name,
                    request_id,
                    elapsed_us,
                    error = %err,
                    "invocation failed"
                );
                K::on_handler_error(&self.name, err)
            }
        }
    }
}
