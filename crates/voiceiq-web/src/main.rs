//! Main entry point for the `VoiceIQ` web server

use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use voiceiq_core::{Config, Error, Result, init_logging};
use voiceiq_web::build_app;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (for development convenience)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: .env file not loaded: {e}");
    }

    // Load configuration
    let config = Config::load().unwrap_or_else(|err| {
        eprintln!("Failed to load config ({err}), using defaults");
        Config::default()
    });

    // Initialize logging
    init_logging(&config.logging)?;

    info!("VoiceIQ web server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "🚀 Starting server on {}:{}",
        config.server.host, config.server.port
    );
    info!("🔗 Backend API: {}", config.backend.base_url);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| Error::Configuration {
            message: format!("invalid server address: {e}"),
        })?;

    let app = build_app(config)?.layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Other(format!("failed to bind to {addr}: {e}")))?;

    info!("💚 Health:  http://{addr}/health");
    info!("🌐 Ready:   http://{addr}/");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Other(format!("server error: {e}")))?;

    info!("👋 Server shutdown complete");
    Ok(())
}

/// Handle graceful shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received terminate signal, shutting down gracefully...");
        },
    }
}
