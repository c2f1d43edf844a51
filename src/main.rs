//! Page Render Server
//!
//! Answers `POST /` with a PNG of the first page of `sample.pdf`.

use anyhow::Context;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use page_render_server::config::Config;
use page_render_server::routes;
use page_render_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before the filter reads RUST_LOG
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "page_render_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting Page Render Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Input document: {}", config.render.input_path.display());
    match config.render.timeout_secs {
        Some(secs) => tracing::info!("Render timeout: {}s", secs),
        None => tracing::info!("Render timeout: none"),
    }

    if let Err(e) = serve(&config).await {
        tracing::error!("{:#}", e);
        return Err(e);
    }

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn serve(config: &Config) -> anyhow::Result<()> {
    let app = routes::app(AppState::new(config.clone()));

    let addr = (config.server.host.as_str(), config.server.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}:{}", addr.0, addr.1))?;

    tracing::info!(
        "Page Render Server listening on {}",
        listener.local_addr().context("Listener has no local address")?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
