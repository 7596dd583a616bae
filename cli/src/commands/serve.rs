use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use camscout_common::{config::Config, success};
use camscout_core::discovery::DiscoveryService;

use crate::http;

pub async fn serve(host: IpAddr, port: u16, cfg: &Config) -> anyhow::Result<()> {
    let service = Arc::new(DiscoveryService::from_config(cfg));
    let app = http::create_app(service);

    let addr = SocketAddr::new(host, port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to listen on {addr}"))?;

    success!("Serving scans on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Could not listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
