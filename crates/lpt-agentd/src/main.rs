mod config;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use lpt_api::{CommandBoard, CoreAdapter, HttpApi};
use lpt_core::{CommandExecutor, InMemoryStore, Poller, TrackingService};
use lpt_prometheus::{Encoder, PrometheusMetrics, TextEncoder};
use lpt_riot::RiotClient;

use crate::config::AgentConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1) Config + logger
    let cfg = AgentConfig::from_env()?;
    lpt_observe::install(&cfg.logging)?;
    info!(
        addr = %cfg.http_addr,
        workers = cfg.executor.workers,
        policy = ?cfg.executor.timeout_policy,
        "starting lp tracker agent"
    );

    // 2) Tracking stack
    let metrics = Arc::new(PrometheusMetrics::new()?);
    let client = RiotClient::new(cfg.riot.clone()).context("failed to build riot client")?;
    let service = Arc::new(TrackingService::new(
        Arc::new(InMemoryStore::new()),
        Arc::new(client),
    ));
    let executor = Arc::new(
        CommandExecutor::new(Arc::clone(&service), cfg.executor.clone())
            .with_metrics(metrics.clone()),
    );

    // 3) Background refresh
    let shutdown = CancellationToken::new();
    let poller = Poller::new(service, cfg.poller.clone()).with_metrics(metrics.clone());
    let poller_task = tokio::spawn(poller.run(shutdown.child_token()));

    // 4) HTTP front-end
    let adapter = CoreAdapter::new(executor, CommandBoard::default());
    let app = HttpApi::new(Arc::new(adapter))
        .router()
        .merge(metrics_router(metrics));

    let listener = tokio::net::TcpListener::bind(cfg.http_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.http_addr))?;
    info!(addr = %cfg.http_addr, "http api listening");
    info!("press Ctrl+C to stop");

    let token = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "failed to listen for shutdown signal");
            }
            token.cancel();
        })
        .await
        .context("http server failed")?;

    info!("shutting down...");
    shutdown.cancel();
    poller_task.await.context("poller task failed")?;
    info!("shutdown complete");

    Ok(())
}

fn metrics_router(metrics: Arc<PrometheusMetrics>) -> Router {
    Router::new()
        .route("/metrics", get(serve_metrics))
        .with_state(metrics)
}

/// GET /metrics
async fn serve_metrics(
    State(metrics): State<Arc<PrometheusMetrics>>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder
        .encode(&metrics.gather(), &mut buffer)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    ))
}
