//! Test helpers for integration tests
//!
//! Provides a test server on an ephemeral port and request shortcuts that
//! set the `x-user-id` header.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use forum_api::{create_app, create_memory_state};
use forum_common::AppConfig;
use forum_db::InMemoryStore;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const USER_ID_HEADER: &str = "x-user-id";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    /// The store behind the server, for outage simulation and query counts
    pub store: Arc<InMemoryStore>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server
    pub async fn start() -> Result<Self> {
        Self::start_with_config(test_config()).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        let store = Arc::new(InMemoryStore::new());
        let state = create_memory_state(config, Arc::clone(&store))?;
        let app = create_app(state)?;

        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            store,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// GET as a guest
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// GET as a user
    pub async fn get_as(&self, path: &str, user: i64) -> Result<Response> {
        Ok(as_user(self.client.get(self.url(path)), user).send().await?)
    }

    /// POST a JSON body as a guest
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// POST a JSON body as a user
    pub async fn post_as<T: Serialize>(&self, path: &str, user: i64, body: &T) -> Result<Response> {
        Ok(as_user(self.client.post(self.url(path)), user)
            .json(body)
            .send()
            .await?)
    }

    /// Create a post and return its ID
    pub async fn create_post(&self, author: i64, request: &crate::CreatePost) -> Result<String> {
        let response = self.post_as("/api/v1/posts", author, request).await?;
        let post: crate::PostView = assert_json(response, StatusCode::CREATED).await?;
        Ok(post.id)
    }

    /// Toggle a reaction and expect 204
    pub async fn toggle(&self, user: i64, request: &crate::ToggleReaction) -> Result<()> {
        let response = self.post_as("/api/v1/reactions", user, request).await?;
        assert_status(response, StatusCode::NO_CONTENT).await
    }
}

fn as_user(builder: RequestBuilder, user: i64) -> RequestBuilder {
    builder.header(USER_ID_HEADER, user.to_string())
}

/// In-memory configuration with a rate limit no test will hit
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::in_memory();
    config.rate_limit.requests_per_second = 1;
    config.rate_limit.burst = 10_000;
    config
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
