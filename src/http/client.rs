//! HTTP client for paginated GitLab listings
//!
//! One call to [`HttpClient::get_page`] is one network round trip: it
//! applies a [`PageSelector`] on top of the captured query, checks the
//! status, decodes the JSON array body and reads the pagination headers.
//! Retries and rate limiting are left to the caller.

use crate::error::{Error, Result};
use crate::pagination::{Page, PageSelector, ResponseMeta};
use crate::types::{merge_query, QueryParams};
use futures::future::{BoxFuture, FutureExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default GitLab API root
pub const DEFAULT_BASE_URL: &str = "https://gitlab.com/api/v4";

/// Future returned by boxed page fetchers
pub type PageFuture<T> = BoxFuture<'static, Result<Page<T>>>;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("gitlab-scan/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// HTTP client for GitLab listings
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    headers: HeaderMap,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    ///
    /// Fails with [`Error::InvalidUrl`] when the base URL does not parse.
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let mut headers = HeaderMap::new();
        for (key, value) in &config.default_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| Error::invalid_value(format!("headers.{key}"), e.to_string()))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| Error::invalid_value(format!("headers.{key}"), e.to_string()))?;
            headers.insert(name, value);
        }

        Ok(Self {
            client,
            config,
            headers,
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Fetch one page of a listing
    ///
    /// `query` holds the options fixed for the whole sequence; the selector's
    /// parameters replace same-named entries.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        selector: &PageSelector,
    ) -> Result<Page<T>> {
        let url = self.build_url(path);
        let params = merge_query(query, &selector.query_params());

        debug!(url = %url, %selector, "GET page");

        let response = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .query(&params)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let meta = ResponseMeta::from_headers(response.headers());
        if status == StatusCode::NO_CONTENT {
            return Ok(Page::new(Vec::new(), meta));
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        if !value.is_array() {
            return Err(Error::decode(format!("{path}: expected a JSON array of items")));
        }
        let items: Vec<T> = serde_json::from_value(value)?;

        Ok(Page::new(items, meta))
    }

    /// Build a boxed page fetcher for a listing endpoint
    ///
    /// The returned closure owns a clone of the client and the query, so the
    /// resulting stream is `'static` and `Send`.
    pub fn fetcher<T>(
        &self,
        path: impl Into<String>,
        query: QueryParams,
    ) -> impl FnMut(PageSelector) -> PageFuture<T> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();
        let path = path.into();

        move |selector| {
            let client = client.clone();
            let path = path.clone();
            let query = query.clone();
            async move { client.get_page::<T>(&path, &query, &selector).await }.boxed()
        }
    }

    fn classify(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            #[allow(clippy::cast_possible_truncation)]
            return Error::Timeout {
                timeout_ms: self.config.timeout.as_millis() as u64,
            };
        }
        Error::Http(e)
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("default_headers", &self.config.default_headers.len())
            .finish_non_exhaustive()
    }
}
