/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use userboard_api::{app::{build_router, AppState}, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let app = build_router(AppState::new(config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use userboard_shared::db::store::{MySqlStore, UserStore};

/// Shared application state
///
/// There is no connection pool. The default store opens one connection
/// per call.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<Config>,

    /// User storage
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    /// Creates application state backed by MySQL
    pub fn new(config: Config) -> Self {
        let store = MySqlStore::new(config.database.clone(), config.retry);
        Self::with_store(config, Arc::new(store))
    }

    /// Creates application state with a custom store
    pub fn with_store(config: Config, store: Arc<dyn UserStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /           # User listing page (HTML)
/// ├── POST /add_user   # Add a user (form in, JSON out)
/// └── GET  /health     # Database connectivity check (JSON)
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    Router::new()
        .route("/", get(routes::users::list_users))
        .route("/add_user", post(routes::users::add_user))
        .route("/health", get(routes::health::health_check))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
