//! Axum router wiring.
//!
//! Ops endpoints plus the JSON invocation surface.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport::http};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .route("/v1/stats", get(ops::stats))
        .route("/v1/tools", get(http::list_tools))
        .route("/v1/tools/:name", post(http::call_tool))
        .route("/v1/resources", get(http::list_resources))
        .route("/v1/resources/read", get(http::read_resource))
        .route("/v1/prompts", get(http::list_prompts))
        .route("/v1/prompts/:name", post(http::get_prompt))
        .with_state(state)
}
