use std::sync::Arc;

use async_trait::async_trait;

use mcpkit_core::error::Result;

use super::{Handler, Kind, SharedHandler};
use crate::context::CallCtx;
use crate::obs::metrics::Metrics;

/// Outermost layer: counts the call and its elapsed time.
///
/// The lock is never held while the inner handler runs. If the call never
/// completes (future dropped, or an unwind that got past recovery) the
/// in-flight guard still commits it as a failure.
pub struct WithMetrics<K: Kind> {
    name: Arc<str>,
    metrics: Arc<Metrics>,
    inner: SharedHandler<K>,
}

impl<K: Kind> WithMetrics<K> {
    pub fn new(name: Arc<str>, metrics: Arc<Metrics>, inner: SharedHandler<K>) -> Self {
        Self {
            name,
            metrics,
            inner,
        }
    }
}

#[async_trait]
impl<K: Kind> Handler<K> for WithMetrics<K> {
    async fn call(&self, ctx: CallCtx, req: K::Request) -> Result<K::Response> {
        let guard = self.metrics.begin(K::CATEGORY, Arc::clone(&self.name));
        let result = self.inner.call(ctx, req).await;
        guard.finish(K::outcome(&result));
        result
    }
}
