use anyhow::Context;
use embox::{EmbyService, router};
use embox_configuration::ServiceConfig;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "embox.yaml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,embox=debug")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("EMBOX_CONFIG").ok())
        .unwrap_or_else(|| DEFAULT_CONFIG.to_owned());

    let config = ServiceConfig::from_file(&path)
        .with_context(|| format!("failed to load configuration from {path}"))?;
    tracing::info!(
        config = %path,
        ttl = ?config.cache.ttl,
        prefix = %config.server.prefix,
        "starting embox"
    );

    let service = EmbyService::from_config(&path, &config).context("failed to build Emby client")?;
    let app = router(service, &config.server.prefix);

    let listener = tokio::net::TcpListener::bind(config.server.listen)
        .await
        .with_context(|| format!("failed to bind to {}", config.server.listen))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
