//! HTTP client for the admin API.
//!
//! All requests flow through here: auth headers, timeouts, retry for
//! idempotent GETs, and the transport/JSON boundary of the error taxonomy.
//! Envelope semantics are handled one layer up in [`crate::envelope`].

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::services::{DashboardService, UserAdminService};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Main admin API client. Cheap to clone.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: ClientConfig,
}

impl Client {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("study-console-sdk")),
        );

        if let Some(auth) = config.auth_header() {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth).map_err(|_| ApiError::Config {
                    message: "Invalid authorization header".to_string(),
                })?,
            );
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Config {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            inner: Arc::new(ClientInner { http, config }),
        })
    }

    /// Create a client from environment variables.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// User administration service.
    pub fn users(&self) -> UserAdminService {
        UserAdminService::new(self.clone())
    }

    /// Dashboard metrics service.
    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.clone())
    }

    /// GET a JSON body, with retry for transient failures.
    pub(crate) async fn get_json(&self, path: &str) -> ApiResult<Value> {
        let url = format!("{}{}", self.inner.config.base_url, path);
        let max_retries = self.inner.config.retry_count;
        let mut attempt = 0;

        loop {
            attempt += 1;

            let result = self.inner.http.get(&url).send().await;
            match result {
                Ok(response) => {
                    let status = response.status();
                    if is_retryable_status(status) && attempt <= max_retries {
                        debug!(%url, attempt, status = status.as_u16(), "retrying GET");
                    } else {
                        return self.read_json(response).await;
                    }
                }
                Err(err) => {
                    let err = self.transport_error(err);
                    if !err.is_retryable() || attempt > max_retries {
                        return Err(err);
                    }
                    debug!(%url, attempt, error = %err, "retrying GET after transport error");
                }
            }

            let backoff = calculate_backoff(
                attempt,
                self.inner.config.retry_initial_backoff,
                self.inner.config.retry_max_backoff,
            );
            tokio::time::sleep(backoff).await;
        }
    }

    /// POST a JSON body. Dispatched exactly once; mutations are never
    /// retried automatically.
    pub(crate) async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<Value> {
        let url = format!("{}{}", self.inner.config.base_url, path);
        let response = self
            .inner
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.read_json(response).await
    }

    /// PUT a JSON body. Dispatched exactly once.
    pub(crate) async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<Value> {
        let url = format!("{}{}", self.inner.config.base_url, path);
        let response = self
            .inner
            .http
            .put(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.read_json(response).await
    }

    /// DELETE. Dispatched exactly once.
    pub(crate) async fn delete_json(&self, path: &str) -> ApiResult<Value> {
        let url = format!("{}{}", self.inner.config.base_url, path);
        let response = self
            .inner
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        self.read_json(response).await
    }

    /// Read a response body as JSON.
    ///
    /// The HTTP status is deliberately not the failure signal here: the
    /// backend reports failures as `success: false` envelopes, sometimes on
    /// HTTP 200, so envelope decoding decides success. A non-JSON body is a
    /// transport-level failure whatever the status was.
    async fn read_json(&self, response: reqwest::Response) -> ApiResult<Value> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if self.inner.config.debug {
            debug!(status = status.as_u16(), body = %text, "API response");
        }

        serde_json::from_str(&text).map_err(|_| ApiError::Transport {
            message: format!("non-JSON response (HTTP {})", status.as_u16()),
            source: None,
        })
    }

    /// Map a reqwest failure, reporting the configured timeout.
    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        ApiError::from_reqwest(err, self.inner.config.timeout)
    }
}

/// Check if a status code is worth retrying a GET for.
fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    status.is_server_error() || status == reqwest::StatusCode::TOO_MANY_REQUESTS
}

/// Calculate exponential backoff.
fn calculate_backoff(attempt: u32, initial: Duration, max: Duration) -> Duration {
    let backoff = initial.saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)));
    backoff.min(max)
}

/// Client builder for ergonomic configuration.
#[derive(Default)]
pub struct ClientBuilder {
    config: ClientConfig,
}

impl ClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
        }
    }

    /// Load configuration from environment.
    pub fn from_env(mut self) -> ApiResult<Self> {
        self.config = ClientConfig::from_env()?;
        Ok(self)
    }

    /// Set the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the bearer token.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.config.bearer_token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the GET retry count.
    pub fn retry_count(mut self, count: u32) -> Self {
        self.config.retry_count = count;
        self
    }

    /// Set the user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Enable debug mode.
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Build the client.
    pub fn build(self) -> ApiResult<Client> {
        Client::new(self.config)
    }
}
