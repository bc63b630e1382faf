//! # Userboard Smoke Test
//!
//! Checks that a running Userboard server is healthy and serves its homepage.
//! Exits with status 1 on the first failed check.
//!
//! ## Usage
//!
//! ```bash
//! SMOKE_BASE_URL=http://localhost:5000 cargo run -p userboard-smoke
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userboard_smoke::SmokeClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userboard_smoke=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = SmokeClient::from_env()?;
    tracing::info!("Running smoke tests against {}", client.base_url());

    match client.run_all().await {
        Ok(passed) => {
            tracing::info!("All {} smoke tests passed", passed.len());
            Ok(())
        }
        Err(e) => {
            tracing::error!("Smoke tests failed: {}", e);
            std::process::exit(1);
        }
    }
}
