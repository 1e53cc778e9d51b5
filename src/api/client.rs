//! HTTP client wrapper for the Fake Store API
//!
//! All upstream traffic goes through [`FakeStoreClient`]. It owns the
//! `reqwest` client, the base URL and the rate limiter, and normalizes every
//! failure into [`StoreError`] so resource code never sees transport types.

use super::rate_limit::RateLimiter;
use crate::error::{Result, StoreError};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Public Fake Store API.
pub const DEFAULT_BASE_URL: &str = "https://fakestoreapi.com";
/// Upper bound for a single upstream call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_RATE_LIMIT: usize = 100;
pub const DEFAULT_RATE_WINDOW: Duration = Duration::from_secs(60);

/// Longest upstream error body quoted back to the caller.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Settings needed to build a [`FakeStoreClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub rate_limit: usize,
    pub rate_window: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            rate_limit: DEFAULT_RATE_LIMIT,
            rate_window: DEFAULT_RATE_WINDOW,
        }
    }
}

impl ClientConfig {
    /// Default settings pointed at another base URL (mock servers, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Cheaply cloneable handle to the upstream API.
#[derive(Debug, Clone)]
pub struct FakeStoreClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    http: Client,
    base_url: String,
    limiter: RateLimiter,
}

impl FakeStoreClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the base URL is not an absolute
    /// http(s) URL or the HTTP client cannot be constructed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let parsed = Url::parse(&config.base_url).map_err(|e| {
            StoreError::Config(format!("Invalid base URL '{}': {e}", config.base_url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StoreError::Config(format!(
                "Base URL '{}' must use http or https",
                config.base_url
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                limiter: RateLimiter::new(config.rate_limit, config.rate_window),
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.inner.limiter
    }

    /// GET `path` with optional query parameters.
    pub async fn fetch(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.send(Method::GET, path, query, None::<&()>).await
    }

    /// POST `body` to `path`.
    pub async fn create<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.send(Method::POST, path, &[], Some(body)).await
    }

    /// PUT `body` to `path`.
    pub async fn replace<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.send(Method::PUT, path, &[], Some(body)).await
    }

    /// DELETE `path`.
    pub async fn remove(&self, path: &str) -> Result<Value> {
        self.send(Method::DELETE, path, &[], None::<&()>).await
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Value> {
        self.inner.limiter.acquire()?;

        let url = format!("{}{}", self.inner.base_url, path);
        debug!(%method, %url, "sending upstream request");

        let mut request = self.inner.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "upstream request failed");
            StoreError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;
        debug!(%method, path, status = status.as_u16(), "upstream response received");

        if !status.is_success() {
            warn!(%method, path, status = status.as_u16(), "upstream returned error status");
            return Err(StoreError::Upstream {
                message: upstream_error_message(status, &text),
                status: Some(status.as_u16()),
            });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text).map_err(|e| StoreError::Upstream {
            message: format!("Upstream API returned invalid JSON: {e}"),
            status: Some(status.as_u16()),
        })
    }
}

fn upstream_error_message(status: reqwest::StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("Upstream API error: {status}");
    }
    let mut snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    if body.chars().count() > MAX_ERROR_BODY_CHARS {
        snippet.push_str("...");
    }
    format!("Upstream API error: {status}: {snippet}")
}
