//! Operational HTTP endpoints.
//!
//! - `/healthz`  : liveness
//! - `/metrics`  : Prometheus text format
//! - `/v1/stats` : JSON snapshot with derived average latency

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Map, Value};

use mcpkit_core::protocol::Category;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().snapshot().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}

pub async fn stats(State(state): State<AppState>) -> Json<Value> {
    let snap = state.metrics().snapshot();
    let server = &state.cfg().server;

    let mut by_category = Map::new();
    for category in Category::ALL {
        let handlers: Map<String, Value> = snap
            .category(category)
            .iter()
            .map(|(name, s)| {
                let v = json!({
                    "calls": s.calls,
                    "errors": s.errors,
                    "duration_us": s.duration.as_micros() as u64,
                    "avg_us": s.average().map(|d| d.as_micros() as u64),
                    "in_flight": s.in_flight,
                });
                (name.clone(), v)
            })
            .collect();
        by_category.insert(category.to_string(), Value::Object(handlers));
    }

    Json(json!({
        "server": { "name": server.name, "version": server.version },
        "handlers": by_category,
    }))
}
