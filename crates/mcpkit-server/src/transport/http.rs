//! JSON-over-HTTP invocation endpoints.
//!
//! - `GET  /v1/tools`, `POST /v1/tools/:name` (body: argument object)
//! - `GET  /v1/resources`, `GET /v1/resources/read?uri=...`
//! - `GET  /v1/prompts`, `POST /v1/prompts/:name` (body: string map)
//!
//! Tool failures come back as a normal 200 result with `is_error` set;
//! resource and prompt failures come back as `{code, msg}` with a 4xx/5xx.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use mcpkit_core::error::{ClientCode, McpError};
use mcpkit_core::protocol::{
    CallToolRequest, GetPromptRequest, PromptDef, ReadResourceRequest, ResourceDef, ToolDef,
};

use crate::app_state::AppState;

const ORIGIN: &str = "http";

#[derive(Debug, Deserialize)]
pub struct ReadQuery {
    pub uri: String,
}

fn error_response(err: &McpError) -> Response {
    let code = err.client_code();
    let status = match code {
        ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        ClientCode::NotFound => StatusCode::NOT_FOUND,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = json!({ "code": code.as_str(), "msg": err.to_string() });
    (status, Json(body)).into_response()
}

pub async fn list_tools(State(app): State<AppState>) -> Json<Vec<ToolDef>> {
    Json(app.registry().tools())
}

pub async fn call_tool(
    State(app): State<AppState>,
    Path(name): Path<String>,
    Json(arguments): Json<Map<String, Value>>,
) -> Response {
    let req = CallToolRequest { name, arguments };
    match app.registry().call_tool(app.next_ctx(ORIGIN), req).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => error_response(&e),
    }
}

pub async fn list_resources(State(app): State<AppState>) -> Json<Vec<ResourceDef>> {
    Json(app.registry().resources())
}

pub async fn read_resource(State(app): State<AppState>, Query(q): Query<ReadQuery>) -> Response {
    let req = ReadResourceRequest::new(q.uri);
    match app.registry().read_resource(app.next_ctx(ORIGIN), req).await {
        Ok(contents) => Json(json!({ "contents": contents })).into_response(),
        Err(e) => error_response(&e),
    }
}

pub async fn list_prompts(State(app): State<AppState>) -> Json<Vec<PromptDef>> {
    Json(app.registry().prompts())
}

pub async fn get_prompt(
    State(app): State<AppState>,
    Path(name): Path<String>,
    Json(arguments): Json<HashMap<String, String>>,
) -> Response {
    let req = GetPromptRequest { name, arguments };
    match app.registry().get_prompt(app.next_ctx(ORIGIN), req).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => error_response(&e),
    }
}
