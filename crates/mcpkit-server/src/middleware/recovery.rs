use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::FutureExt;

use mcpkit_core::error::Result;

use super::{Handler, Kind, SharedHandler};
use crate::context::CallCtx;

/// Innermost layer: contains panics raised while the handler runs.
///
/// Completed calls pass through untouched, whether they succeeded or
/// reported an error. A panic is logged once and replaced by the kind's
/// fault outcome. Nothing is retried.
pub struct WithRecovery<K: Kind> {
    name: Arc<str>,
    inner: SharedHandler<K>,
}

impl<K: Kind> WithRecovery<K> {
    pub fn new(name: Arc<str>, inner: SharedHandler<K>) -> Self {
        Self { name, inner }
    }
}

#[async_trait]
impl<K: Kind> Handler<K> for WithRecovery<K> {
    async fn call(&self, ctx: CallCtx, req: K::Request) -> Result<K::Response> {
        let inner = &self.inner;
        // The call itself goes inside the guarded future so a panic before
        // the first poll is caught as well.
        let guarded = AssertUnwindSafe(async move { inner.call(ctx, req).await });

        match guarded.catch_unwind().await {
            Ok(result) => result,
            Err(payload) => {
                tracing::error!(
                    category = %K::CATEGORY,
                    handler = %self.name,
                    fault = %panic_message(payload.as_ref()),
                    "handler panicked"
                );
                K::on_fault(&self.name)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&'static str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
