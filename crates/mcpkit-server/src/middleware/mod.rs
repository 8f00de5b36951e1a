//! Handler middleware: metrics, logging and fault recovery.
//!
//! Every registered handler is wrapped in the same fixed chain, outermost
//! first:
//!
//! ```text
//! metrics -> logging -> recovery -> handler
//! ```
//!
//! Recovery sits directly around the user handler so that the two outer
//! layers only ever see a converted outcome, never an unwinding panic.
//! Metrics sits outside logging so elapsed time includes logging and no
//! invocation can leave the chain without being counted.

pub mod kind;
mod logging;
mod metrics;
mod recovery;

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use mcpkit_core::error::Result;

use crate::context::CallCtx;
use crate::obs::metrics::Metrics;

pub use kind::{Action, DataRead, Kind, Template};
pub use logging::WithLogging;
pub use metrics::WithMetrics;
pub use recovery::WithRecovery;

/// A request handler of category `K`.
#[async_trait]
pub trait Handler<K: Kind>: Send + Sync {
    async fn call(&self, ctx: CallCtx, req: K::Request) -> Result<K::Response>;
}

pub type SharedHandler<K> = Arc<dyn Handler<K>>;

/// Adapter turning an async closure into a [`Handler`].
pub struct FnHandler<F>(F);

pub fn handler_fn<F>(f: F) -> FnHandler<F> {
    FnHandler(f)
}

#[async_trait]
impl<K, F, Fut> Handler<K> for FnHandler<F>
where
    K: Kind,
    F: Fn(CallCtx, K::Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<K::Response>> + Send + 'static,
{
    async fn call(&self, ctx: CallCtx, req: K::Request) -> Result<K::Response> {
        (self.0)(ctx, req).await
    }
}

/// One decorator in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Metrics,
    Logging,
    Recovery,
}

/// Composition order, outermost first.
pub const LAYER_ORDER: [LayerKind; 3] = [LayerKind::Metrics, LayerKind::Logging, LayerKind::Recovery];

/// Builds fully decorated handlers. Cheap to clone.
#[derive(Clone)]
pub struct Middleware {
    metrics: Arc<Metrics>,
}

impl Middleware {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub fn layer_order() -> &'static [LayerKind] {
        &LAYER_ORDER
    }

    /// Wrap `handler` in every layer of [`LAYER_ORDER`].
    pub fn wrap<K: Kind>(
        &self,
        name: impl Into<Arc<str>>,
        handler: SharedHandler<K>,
    ) -> SharedHandler<K> {
        let name = name.into();
        LAYER_ORDER
            .iter()
            .rev()
            .fold(handler, |inner, layer| self.apply(*layer, &name, inner))
    }

    fn apply<K: Kind>(
        &self,
        layer: LayerKind,
        name: &Arc<str>,
        inner: SharedHandler<K>,
    ) -> SharedHandler<K> {
        match layer {
            LayerKind::Metrics => Arc::new(WithMetrics::new(
                Arc::clone(name),
                Arc::clone(&self.metrics),
                inner,
            )),
            LayerKind::Logging => Arc::new(WithLogging::new(Arc::clone(name), inner)),
            LayerKind::Recovery => Arc::new(WithRecovery::new(Arc::clone(name), inner)),
        }
    }

    pub fn wrap_action(
        &self,
        name: impl Into<Arc<str>>,
        handler: SharedHandler<Action>,
    ) -> SharedHandler<Action> {
        self.wrap(name, handler)
    }

    pub fn wrap_data_read(
        &self,
        uri: impl Into<Arc<str>>,
        handler: SharedHandler<DataRead>,
    ) -> SharedHandler<DataRead> {
        self.wrap(uri, handler)
    }

    pub fn wrap_template(
        &self,
        name: impl Into<Arc<str>>,
        handler: SharedHandler<Template>,
    ) -> SharedHandler<Template> {
        self.wrap(name, handler)
    }
}
