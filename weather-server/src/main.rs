//! Weather proxy HTTP server
//!
//! Reads provider and server settings from the environment once, then serves
//! the proxy endpoint until Ctrl+C or SIGTERM.

use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::{ProviderSettings, ServerSettings};
use weather_server::{AppState, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_server=info,weather_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("weather-server v{} starting", env!("CARGO_PKG_VERSION"));

    let provider_settings = ProviderSettings::from_env()?;
    let server_settings = ServerSettings::from_env()?;

    info!(
        base_url = %provider_settings.base_url,
        timeout_secs = ?provider_settings.timeout_secs,
        api_key_set = provider_settings.api_key.is_some(),
        "Configuration loaded"
    );

    let state = AppState::from_settings(&provider_settings)?;
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(server_settings.bind_addr).await?;
    info!("Listening on http://{}", server_settings.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
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
            Ok(mut signal) => {
                signal.recv().await;
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
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
