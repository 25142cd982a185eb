//! # Transports
//!
//! Serves `HttpxServer` over stdio (one client, the parent process) or over
//! streamable HTTP (one server instance per session, mounted on an axum router).

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};

use crate::application::handler::ScanHandler;
use crate::domain::config::ServerConfig;
use crate::infrastructure::mcp::server::HttpxServer;
use crate::strings::logs;

pub async fn serve_stdio(handler: ScanHandler) -> Result<()> {
    let service = HttpxServer::new(handler)
        .serve(stdio())
        .await
        .context("Failed to start MCP stdio service")?;
    tracing::info!("{}", logs::STDIO_READY);

    tokio::select! {
        result = service.waiting() => {
            let reason = result.context("MCP stdio service failed")?;
            tracing::info!(?reason, "MCP client disconnected");
        }
        _ = shutdown_signal() => {}
    }
    Ok(())
}

pub async fn serve_http(handler: ScanHandler, config: &ServerConfig) -> Result<()> {
    let service = StreamableHttpService::new(
        move || Ok(HttpxServer::new(handler.clone())),
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );
    let router = axum::Router::new().nest_service(&config.path, service);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    tracing::info!("{}", logs::http_ready(&config.bind, &config.path));

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("{}", logs::SHUTDOWN),
        Err(e) => {
            tracing::error!("{}", logs::shutdown_fail(&e.to_string()));
            // Without a signal listener, run until the transport ends on its own.
            std::future::pending::<()>().await;
        }
    }
}
