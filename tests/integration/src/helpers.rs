//! Test helpers for integration tests
//!
//! Spawns a server on an ephemeral port and issues tokens for arbitrary
//! user ids with the configured secret.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use teamhub_api::{create_app, create_app_state};
use teamhub_common::{AppConfig, JwtService};
use teamhub_core::Snowflake;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    jwt: JwtService,
    _handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()?).await
    }

    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let state = create_app_state(&config).await?;
        let app = create_app(state, &config);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            jwt: JwtService::new(&config.jwt.secret, config.jwt.access_token_expiry),
            _handle: handle,
        })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url(), path)
    }

    /// Access token for `user_id`
    pub fn token(&self, user_id: i64) -> Result<String> {
        Ok(self.jwt.issue_access_token(Snowflake::new(user_id))?)
    }

    /// Unversioned GET (health probes)
    pub async fn get_raw(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    pub async fn get_auth(&self, path: &str, user_id: i64) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(path))
            .bearer_auth(self.token(user_id)?)
            .send()
            .await?)
    }

    pub async fn post_auth<T: Serialize>(&self, path: &str, user_id: i64, body: &T) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(self.token(user_id)?)
            .json(body)
            .send()
            .await?)
    }

    pub async fn patch_auth<T: Serialize>(&self, path: &str, user_id: i64, body: &T) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(self.token(user_id)?)
            .json(body)
            .send()
            .await?)
    }

    pub async fn delete_auth(&self, path: &str, user_id: i64) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(self.token(user_id)?)
            .send()
            .await?)
    }
}

/// Configuration from the environment, with migrations from the db crate
pub fn test_config() -> Result<AppConfig> {
    dotenvy::dotenv().ok();

    let mut config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
    if config.database.migrations_dir.is_none() {
        config.database.migrations_dir = Some(
            concat!(env!("CARGO_MANIFEST_DIR"), "/../../crates/teamhub-db/migrations").to_string(),
        );
    }
    config.rate_limit.requests_per_second = 1000;
    config.rate_limit.burst = 1000;
    Ok(config)
}

/// Whether PostgreSQL and Redis are configured
pub fn check_test_env() -> bool {
    dotenvy::dotenv().ok();
    for var in ["DATABASE_URL", "REDIS_URL", "JWT_SECRET"] {
        if std::env::var(var).is_err() {
            eprintln!("Skipping test: {var} not set");
            return false;
        }
    }
    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
