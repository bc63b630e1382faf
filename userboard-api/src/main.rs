//! # Userboard API Server
//!
//! Serves the user listing page, the add-user endpoint and the health check.
//!
//! ## Usage
//!
//! ```bash
//! DB_HOST=127.0.0.1 cargo run -p userboard-api
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userboard_api::{
    app::{build_router, AppState},
    config::Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "userboard_api=debug,userboard_shared=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Userboard API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    tracing::info!(
        database = %config.database.display_target(),
        max_attempts = config.retry.max_attempts(),
        retry_delay_secs = config.retry.delay().as_secs(),
        "Database settings loaded"
    );

    let app = build_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, exiting...");
}
