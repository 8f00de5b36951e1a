//! Invocation metrics aggregator.
//!
//! Per category, a table from handler name to call count, error count and
//! cumulative duration. A completed invocation commits all three under one
//! write lock; `snapshot()` copies the tables under the read lock, so a
//! reader never sees a call counted without its duration. The lock is only
//! held for the table update itself, never across a handler call.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use mcpkit_core::protocol::Category;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// How one invocation ended, as seen by the metrics layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    HandlerError,
    RecoveredFault,
    /// The call never completed: its future was dropped or unwound.
    Abandoned,
}

impl Outcome {
    pub fn is_failure(self) -> bool {
        !matches!(self, Outcome::Success)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::HandlerError => "handler_error",
            Outcome::RecoveredFault => "recovered_fault",
            Outcome::Abandoned => "abandoned",
        }
    }
}

/// One finished invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub category: Category,
    pub handler: Arc<str>,
    pub started: Instant,
    pub outcome: Outcome,
    pub elapsed: Duration,
}

/// Counters for one handler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandlerStats {
    pub calls: u64,
    pub errors: u64,
    pub duration: Duration,
    /// Started but not yet committed. Not part of the committed triple.
    pub in_flight: u64,
}

impl HandlerStats {
    /// Mean latency of committed calls.
    pub fn average(&self) -> Option<Duration> {
        if self.calls == 0 {
            return None;
        }
        let nanos = self.duration.as_nanos() / u128::from(self.calls);
        Some(Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX)))
    }
}

type Table = HashMap<Arc<str>, HandlerStats>;

fn slot(category: Category) -> usize {
    match category {
        Category::Action => 0,
        Category::DataRead => 1,
        Category::Template => 2,
    }
}

#[derive(Default)]
pub struct Metrics {
    tables: RwLock<[Table; 3]>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an invocation as started. Commit it with [`InFlight::finish`].
    pub fn begin(&self, category: Category, handler: Arc<str>) -> InFlight<'_> {
        {
            let mut tables = self.tables.write();
            let stats = tables[slot(category)]
                .entry(Arc::clone(&handler))
                .or_default();
            stats.in_flight += 1;
        }
        InFlight {
            metrics: self,
            category,
            handler,
            started: Instant::now(),
            committed: false,
        }
    }

    /// Record an invocation that was not started through [`Metrics::begin`].
    pub fn record(&self, inv: &Invocation) {
        self.commit(inv, false);
    }

    fn commit(&self, inv: &Invocation, tracked: bool) {
        let mut tables = self.tables.write();
        let stats = tables[slot(inv.category)]
            .entry(Arc::clone(&inv.handler))
            .or_default();
        stats.calls += 1;
        stats.duration += inv.elapsed;
        if inv.outcome.is_failure() {
            stats.errors += 1;
        }
        if tracked {
            stats.in_flight = stats.in_flight.saturating_sub(1);
        }
    }

    /// Point-in-time copy of every table.
    pub fn snapshot(&self) -> MetricsSnapshot {
        let tables = self.tables.read();
        let copy = |t: &Table| -> BTreeMap<String, HandlerStats> {
            t.iter().map(|(k, v)| (k.to_string(), *v)).collect()
        };
        MetricsSnapshot {
            tables: [copy(&tables[0]), copy(&tables[1]), copy(&tables[2])],
        }
    }
}

/// An invocation between `begin` and commit.
///
/// Dropping it without calling [`InFlight::finish`] commits the call as
/// [`Outcome::Abandoned`].
pub struct InFlight<'a> {
    metrics: &'a Metrics,
    category: Category,
    handler: Arc<str>,
    started: Instant,
    committed: bool,
}

impl InFlight<'_> {
    pub fn finish(mut self, outcome: Outcome) -> Invocation {
        self.committed = true;
        self.commit(outcome)
    }

    fn commit(&self, outcome: Outcome) -> Invocation {
        let inv = Invocation {
            category: self.category,
            handler: Arc::clone(&self.handler),
            started: self.started,
            outcome,
            elapsed: self.started.elapsed(),
        };
        self.metrics.commit(&inv, true);
        inv
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.committed {
            let inv = self.commit(Outcome::Abandoned);
            tracing::warn!(
                category = %inv.category,
                handler = %inv.handler,
                elapsed_us = inv.elapsed.as_micros() as u64,
                "invocation abandoned before completion"
            );
        }
    }
}

/// Immutable copy of the aggregator state.
#[derive(Debug, Clone, Default)]
pub struct MetricsSnapshot {
    tables: [BTreeMap<String, HandlerStats>; 3],
}

impl MetricsSnapshot {
    pub fn category(&self, category: Category) -> &BTreeMap<String, HandlerStats> {
        &self.tables[slot(category)]
    }

    pub fn get(&self, category: Category, handler: &str) -> Option<&HandlerStats> {
        self.category(category).get(handler)
    }

    /// All entries, categories in declaration order, names sorted.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &str, &HandlerStats)> {
        Category::ALL.into_iter().flat_map(move |c| {
            self.category(c)
                .iter()
                .map(move |(name, stats)| (c, name.as_str(), stats))
        })
    }

    /// Render in Prometheus text exposition format (durations in microseconds).
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_family(&mut out, "mcpkit_invocations_total", "counter", |s| s.calls);
        self.render_family(&mut out, "mcpkit_invocation_errors_total", "counter", |s| s.errors);
        self.render_family(
            &mut out,
            "mcpkit_invocation_duration_micros_sum",
            "counter",
            |s| s.duration.as_micros() as u64,
        );
        self.render_family(&mut out, "mcpkit_invocations_in_flight", "gauge", |s| s.in_flight);
        out
    }

    fn render_family(
        &self,
        out: &mut String,
        name: &str,
        ty: &str,
        value: impl Fn(&HandlerStats) -> u64,
    ) {
        let _ = writeln!(out, "# TYPE {} {}", name, ty);
        for (category, handler, stats) in self.iter() {
            let _ = writeln!(
                out,
                "{}{{category=\"{}\",handler=\"{}\"}} {}",
                name,
                category,
                escape_label(handler),
                value(stats)
            );
        }
    }
}
