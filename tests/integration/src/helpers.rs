//! Test helpers for integration tests
//!
//! Spawns the application on an ephemeral port with a temporary media root
//! and wraps the HTTP client.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use calendar_api::{create_app, create_app_state};
use calendar_common::AppConfig;
use calendar_db::PgPool;
use reqwest::{multipart, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// API prefix all non-health routes live under
pub const API: &str = "/api/v1";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pool: PgPool,
    _media_root: TempDir,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        let media_root = TempDir::new()?;
        let config = test_config(&media_root)?;
        Self::start_with_config(config, media_root).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig, media_root: TempDir) -> Result<Self> {
        let state = create_app_state(config).await?;
        let pool = state
            .service_context()
            .pool()
            .cloned()
            .context("app state has no database pool")?;

        let app = create_app(state);

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        tokio::time::sleep(Duration::from_millis(50)).await;

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            pool,
            _media_root: media_root,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Database pool, for test data the API cannot create
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn with_auth(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET, optionally authenticated
    pub async fn get(&self, path: &str, token: Option<&str>) -> Result<Response> {
        let builder = Self::with_auth(self.client.get(self.url(path)), token);
        Ok(builder.send().await?)
    }

    /// POST a JSON body, optionally authenticated
    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &T,
    ) -> Result<Response> {
        let builder = Self::with_auth(self.client.post(self.url(path)), token);
        Ok(builder.json(body).send().await?)
    }

    /// PATCH a JSON body with auth token
    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .patch(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// PUT a JSON body with auth token
    pub async fn put<T: Serialize + ?Sized>(
        &self,
        path: &str,
        token: &str,
        body: &T,
    ) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?)
    }

    /// DELETE with auth token
    pub async fn delete(&self, path: &str, token: &str) -> Result<Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    /// POST a multipart form with auth token
    pub async fn post_multipart(
        &self,
        path: &str,
        token: &str,
        form: multipart::Form,
    ) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?)
    }
}

/// Test configuration from the environment, with a private media root and
/// a rate limit loose enough for parallel tests
pub fn test_config(media_root: &TempDir) -> Result<AppConfig> {
    dotenvy::dotenv().ok();
    if std::env::var("API_PORT").is_err() {
        std::env::set_var("API_PORT", "0");
    }

    let mut config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;

    config.database.run_migrations = true;
    config.database.migrations_dir =
        concat!(env!("CARGO_MANIFEST_DIR"), "/../../crates/calendar-db/migrations").to_string();
    config.storage.upload_dir = media_root.path().display().to_string();
    config.storage.media_url = "/media".to_string();
    config.rate_limit.requests_per_second = 1000;
    config.rate_limit.burst = 1000;

    Ok(config)
}

/// Whether the database-backed environment is available
pub fn check_test_env() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return false;
    }

    if std::env::var("JWT_SECRET").is_err() {
        eprintln!("Skipping test: JWT_SECRET not set");
        return false;
    }

    true
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
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
