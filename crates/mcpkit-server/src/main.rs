//! mcpkit server binary.
//!
//! - Config: `mcpkit.yaml`, or the path given as the first argument
//! - Logs: configured file (stdout is left alone)
//! - HTTP: ops + invocation endpoints, graceful shutdown on Ctrl-C

use std::process::ExitCode;

use mcpkit_core::error::{McpError, Result};
use mcpkit_server::{app_state, config, obs, router};

#[tokio::main]
async fn main() -> ExitCode {
    let path = std::env::args().nth(1).unwrap_or_else(|| "mcpkit.yaml".to_string());

    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("config load failed ({path}): {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = obs::logging::init(&cfg.logging) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    match run(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cfg: config::ServerConfig) -> Result<()> {
    let listen = cfg.server.listen_addr()?;
    tracing::info!(name = %cfg.server.name, version = %cfg.server.version, "=== mcpkit server starting ===");

    let state = app_state::AppState::new(cfg);
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| McpError::Internal(format!("bind {listen} failed: {e}")))?;
    tracing::info!(%listen, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| McpError::Internal(format!("serve failed: {e}")))?;

    tracing::info!("=== mcpkit server stopped ===");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
