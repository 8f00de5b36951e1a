//! Behavior of the composed metrics -> logging -> recovery chain.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::sync::Arc;

use common::{Explodes, Fails, LogCapture};
use mcpkit_core::error::McpError;
use mcpkit_core::protocol::{
    CallToolRequest, CallToolResult, Category, GetPromptRequest, ReadResourceRequest,
};
use mcpkit_server::context::CallCtx;
use mcpkit_server::middleware::{
    handler_fn, Action, Handler, LayerKind, Middleware, SharedHandler,
};
use mcpkit_server::obs::metrics::Metrics;
use mcpkit_server::services::{EchoTool, GreetingPrompt, ReadmeResource, README_URI};

fn middleware() -> (Arc<Metrics>, Middleware) {
    let metrics = Arc::new(Metrics::new());
    (Arc::clone(&metrics), Middleware::new(metrics))
}

#[test]
fn layers_compose_metrics_outermost_recovery_innermost() {
    assert_eq!(
        Middleware::layer_order(),
        &[LayerKind::Metrics, LayerKind::Logging, LayerKind::Recovery]
    );
}

#[tokio::test]
async fn echo_greets_by_name() {
    let (metrics, mw) = middleware();
    let echo = mw.wrap_action("echo", Arc::new(EchoTool::new()));

    let res = echo
        .call(CallCtx::default(), CallToolRequest::new("echo").with_arg("name", "Ada"))
        .await
        .unwrap();

    assert!(!res.is_error);
    assert_eq!(res.first_text(), Some("Hello, Ada!"));

    let stats = *metrics.snapshot().get(Category::Action, "echo").unwrap();
    assert_eq!(stats.calls, 1);
    assert_eq!(stats.errors, 0);
    assert_eq!(stats.in_flight, 0);
}

#[tokio::test]
async fn echo_without_name_answers_in_band_and_counts_error() {
    let (metrics, mw) = middleware();
    let echo = mw.wrap_action("echo", Arc::new(EchoTool::new()));

    let res = echo
        .call(CallCtx::default(), CallToolRequest::new("echo"))
        .await
        .unwrap();

    assert!(res.is_error);
    let text = res.first_text().unwrap();
    assert!(text.starts_with("required argument \"name\" not found"), "{text}");

    let stats = *metrics.snapshot().get(Category::Action, "echo").unwrap();
    assert_eq!((stats.calls, stats.errors), (1, 1));
}

#[tokio::test]
async fn action_error_is_converted_not_propagated() {
    let (metrics, mw) = middleware();
    let broken = mw.wrap_action("broken", Arc::new(Fails));

    let res = broken
        .call(CallCtx::default(), CallToolRequest::new("broken"))
        .await
        .unwrap();

    assert_eq!(
        res,
        CallToolResult::error("Tool broken failed: not found: gone")
    );
    assert_eq!(metrics.snapshot().get(Category::Action, "broken").unwrap().errors, 1);
}

#[tokio::test]
async fn missing_readme_propagates_error_naming_the_resource() {
    let (metrics, mw) = middleware();
    let readme = mw.wrap_data_read(
        README_URI,
        Arc::new(ReadmeResource::new("tests/fixtures/does-not-exist.md")),
    );

    let err = readme
        .call(CallCtx::default(), ReadResourceRequest::new(README_URI))
        .await
        .unwrap_err();

    assert!(matches!(err, McpError::ResourceFailed { ref uri, .. } if uri == README_URI));
    assert!(err.to_string().contains("file://README.md"));
    assert!(!err.is_fault());
    assert_eq!(err.client_code().as_str(), "NOT_FOUND");

    let stats = *metrics.snapshot().get(Category::DataRead, README_URI).unwrap();
    assert_eq!((stats.calls, stats.errors), (1, 1));
}

#[tokio::test]
async fn readme_served_from_disk() {
    let (_, mw) = middleware();
    let readme = mw.wrap_data_read(
        README_URI,
        Arc::new(ReadmeResource::new("tests/fixtures/README.md")),
    );

    let contents = readme
        .call(CallCtx::default(), ReadResourceRequest::new(README_URI))
        .await
        .unwrap();

    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0].uri, "docs://readme");
    assert_eq!(contents[0].mime_type, "text/markdown");
    assert!(contents[0].text.contains("fixture readme"));
}

#[tokio::test]
async fn template_error_is_wrapped_with_prompt_name() {
    let (metrics, mw) = middleware();
    let prompt = mw.wrap_template("broken", Arc::new(Fails));

    let err = prompt
        .call(CallCtx::default(), GetPromptRequest::new("broken"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "failed to get prompt broken: not found: gone");
    assert_eq!(metrics.snapshot().get(Category::Template, "broken").unwrap().errors, 1);
}

#[tokio::test]
async fn greeting_defaults_to_friend() {
    let (_, mw) = middleware();
    let greeting = mw.wrap_template("greeting", Arc::new(GreetingPrompt::new()));

    let res = greeting
        .call(CallCtx::default(), GetPromptRequest::new("greeting"))
        .await
        .unwrap();
    assert_eq!(res.description, "A friendly greeting");
    assert_eq!(
        res.messages[0].content.as_text(),
        Some("Hello, friend! How can I help you today?")
    );

    let res = greeting
        .call(
            CallCtx::default(),
            GetPromptRequest::new("greeting").with_arg("name", "Lin"),
        )
        .await
        .unwrap();
    assert_eq!(
        res.messages[0].content.as_text(),
        Some("Hello, Lin! How can I help you today?")
    );
}

#[tokio::test]
async fn panicking_action_is_contained_and_logged_once() {
    let logs = LogCapture::default();
    let _guard = logs.install();

    let (metrics, mw) = middleware();
    let boom = mw.wrap_action("boom", Arc::new(Explodes));

    let res = boom
        .call(CallCtx::default(), CallToolRequest::new("boom"))
        .await
        .unwrap();

    assert!(res.is_error);
    assert_eq!(res.first_text(), Some("Tool boom encountered an internal error"));

    let out = logs.contents();
    assert_eq!(out.matches("handler panicked").count(), 1, "{out}");
    let fault_line = out.lines().find(|l| l.contains("handler panicked")).unwrap();
    assert!(fault_line.contains("handler=boom"), "{fault_line}");
    assert!(fault_line.contains("kaboom"), "{fault_line}");

    let stats = *metrics.snapshot().get(Category::Action, "boom").unwrap();
    assert_eq!((stats.calls, stats.errors), (1, 1));
}

#[tokio::test]
async fn panicking_reads_and_prompts_fail_with_fault_errors() {
    let (metrics, mw) = middleware();

    let read = mw.wrap_data_read("mem://x", Arc::new(Explodes));
    let err = read
        .call(CallCtx::default(), ReadResourceRequest::new("mem://x"))
        .await
        .unwrap_err();
    assert!(err.is_fault());
    assert_eq!(
        err.to_string(),
        "failed to read resource mem://x: resource mem://x encountered an internal error"
    );

    let prompt = mw.wrap_template("p", Arc::new(Explodes));
    for _ in 0..3 {
        let err = prompt
            .call(CallCtx::default(), GetPromptRequest::new("p"))
            .await
            .unwrap_err();
        assert!(err.is_fault());
        assert_eq!(err.client_code().as_str(), "INTERNAL");
    }

    let snap = metrics.snapshot();
    assert_eq!(snap.get(Category::DataRead, "mem://x").unwrap().errors, 1);
    let p = snap.get(Category::Template, "p").unwrap();
    assert_eq!((p.calls, p.errors), (3, 3));
}

#[tokio::test]
async fn repeated_successes_accumulate_without_errors() {
    let (metrics, mw) = middleware();
    let greeting = mw.wrap_template("greeting", Arc::new(GreetingPrompt::new()));

    let mut last = std::time::Duration::ZERO;
    for n in 1..=25u64 {
        greeting
            .call(CallCtx::default(), GetPromptRequest::new("greeting"))
            .await
            .unwrap();
        let stats = *metrics.snapshot().get(Category::Template, "greeting").unwrap();
        assert_eq!(stats.calls, n);
        assert_eq!(stats.errors, 0);
        assert!(stats.duration >= last);
        last = stats.duration;
    }
}

#[tokio::test]
async fn always_failing_handler_counts_every_call() {
    let (metrics, mw) = middleware();
    let broken = mw.wrap_data_read("mem://broken", Arc::new(Fails));

    for _ in 0..10 {
        let _ = broken
            .call(CallCtx::default(), ReadResourceRequest::new("mem://broken"))
            .await;
    }

    let stats = *metrics.snapshot().get(Category::DataRead, "mem://broken").unwrap();
    assert_eq!((stats.calls, stats.errors), (10, 10));
}

#[tokio::test]
async fn logging_records_start_and_completion() {
    let logs = LogCapture::default();
    let _guard = logs.install();

    let (_, mw) = middleware();
    let echo = mw.wrap_action("echo", Arc::new(EchoTool::new()));
    echo.call(
        CallCtx::new(7, "test"),
        CallToolRequest::new("echo").with_arg("name", "Ada"),
    )
    .await
    .unwrap();

    let out = logs.contents();
    let started = out.lines().find(|l| l.contains("invocation started")).unwrap();
    assert!(started.contains("category=action"), "{started}");
    assert!(started.contains("request_id=7"), "{started}");
    assert!(started.contains("Ada"), "{started}");

    let done = out.lines().find(|l| l.contains("invocation completed")).unwrap();
    assert!(done.contains("items=1"), "{done}");
    assert!(done.contains("elapsed_us="), "{done}");
}

#[tokio::test]
async fn context_reaches_handler_untouched() {
    let (_, mw) = middleware();
    let who: SharedHandler<Action> = Arc::new(handler_fn(
        |ctx: CallCtx, _req: CallToolRequest| async move {
            Ok::<_, McpError>(CallToolResult::text(format!(
                "{}#{}",
                ctx.origin(),
                ctx.request_id()
            )))
        },
    ));
    let who = mw.wrap_action("who", who);

    let res = who
        .call(CallCtx::new(42, "http"), CallToolRequest::new("who"))
        .await
        .unwrap();
    assert_eq!(res.first_text(), Some("http#42"));
}
