//! # Userboard Smoke Test
//!
//! Out-of-process checks against a running Userboard server:
//!
//! - `GET /health` answers 200 with `{"status": "healthy", "database": "connected"}`
//! - `GET /` answers 200
//!
//! # Example
//!
//! ```no_run
//! use userboard_smoke::SmokeClient;
//!
//! # async fn example() -> Result<(), userboard_smoke::SmokeError> {
//! let client = SmokeClient::new("http://localhost:5000")?;
//! for check in client.run_all().await? {
//!     println!("{} passed", check);
//! }
//! # Ok(())
//! # }
//! ```

use reqwest::StatusCode;
use serde::Deserialize;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Base URL used when `SMOKE_BASE_URL` is not set
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Smoke test failures
#[derive(Error, Debug)]
pub enum SmokeError {
    /// Request could not be sent or the body could not be read
    #[error("Request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Endpoint answered with the wrong status code
    #[error("{endpoint} returned status {actual}, expected {expected}")]
    UnexpectedStatus {
        endpoint: String,
        expected: u16,
        actual: u16,
    },

    /// Endpoint answered with an unexpected body
    #[error("{endpoint} returned unexpected body: {detail}")]
    UnexpectedBody { endpoint: String, detail: String },
}

/// Names of the checks, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    Health,
    Homepage,
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Check::Health => write!(f, "Health endpoint"),
            Check::Homepage => write!(f, "Homepage"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: Option<String>,
    database: Option<String>,
}

/// HTTP client for the smoke checks
pub struct SmokeClient {
    base_url: String,
    http: reqwest::Client,
}

impl SmokeClient {
    /// Creates a client for the server at `base_url`
    pub fn new(base_url: impl Into<String>) -> Result<Self, SmokeError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| SmokeError::Http {
                endpoint: base_url.clone(),
                source,
            })?;

        Ok(Self { base_url, http })
    }

    /// Creates a client from `SMOKE_BASE_URL` (default: http://localhost:5000)
    pub fn from_env() -> Result<Self, SmokeError> {
        dotenvy::dotenv().ok();
        let base_url = env::var("SMOKE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Checks `GET /health`
    pub async fn check_health(&self) -> Result<(), SmokeError> {
        let endpoint = self.url("/health");
        let response = self.get(&endpoint).await?;
        expect_status(&endpoint, response.status(), StatusCode::OK)?;

        let body: HealthBody = response.json().await.map_err(|source| SmokeError::Http {
            endpoint: endpoint.clone(),
            source,
        })?;

        if body.status.as_deref() != Some("healthy") {
            return Err(SmokeError::UnexpectedBody {
                endpoint,
                detail: format!("status is {:?}, expected \"healthy\"", body.status),
            });
        }
        if body.database.as_deref() != Some("connected") {
            return Err(SmokeError::UnexpectedBody {
                endpoint,
                detail: format!("database is {:?}, expected \"connected\"", body.database),
            });
        }

        Ok(())
    }

    /// Checks `GET /`
    pub async fn check_homepage(&self) -> Result<(), SmokeError> {
        let endpoint = self.url("/");
        let response = self.get(&endpoint).await?;
        expect_status(&endpoint, response.status(), StatusCode::OK)
    }

    /// Runs every check in order, stopping at the first failure
    ///
    /// Returns the checks that passed.
    pub async fn run_all(&self) -> Result<Vec<Check>, SmokeError> {
        let mut passed = Vec::new();

        self.check_health().await?;
        tracing::info!("{} check passed", Check::Health);
        passed.push(Check::Health);

        self.check_homepage().await?;
        tracing::info!("{} check passed", Check::Homepage);
        passed.push(Check::Homepage);

        Ok(passed)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, endpoint: &str) -> Result<reqwest::Response, SmokeError> {
        tracing::debug!(endpoint, "GET");
        self.http
            .get(endpoint)
            .send()
            .await
            .map_err(|source| SmokeError::Http {
                endpoint: endpoint.to_string(),
                source,
            })
    }
}

fn expect_status(endpoint: &str, actual: StatusCode, expected: StatusCode) -> Result<(), SmokeError> {
    if actual == expected {
        Ok(())
    } else {
        Err(SmokeError::UnexpectedStatus {
            endpoint: endpoint.to_string(),
            expected: expected.as_u16(),
            actual: actual.as_u16(),
        })
    }
}
