//! Main PassiveTotal API client implementation.

use crate::api::*;
use crate::config::{Credentials, RateLimitConfig, RetryConfig};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use passivetotal_core::{PassiveTotalError, Result};
use reqwest::{Client as HttpClient, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// The PassiveTotal API base URL
const DEFAULT_BASE_URL: &str = "https://api.passivetotal.org/v2";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Main PassiveTotal API client
#[derive(Clone)]
pub struct PassiveTotalClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    retry_config: RetryConfig,
    rate_limiter: Option<DefaultDirectRateLimiter>,
}

impl std::fmt::Debug for PassiveTotalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassiveTotalClient")
            .field("username", &self.inner.credentials.username)
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl PassiveTotalClient {
    /// Create a new client with the given credentials using default settings
    #[must_use]
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::builder(Credentials::new(username, api_key)).build()
    }

    /// Create a client from credentials found in the environment or config file
    pub fn from_env() -> Result<Self> {
        Ok(Self::builder(Credentials::load()?).build())
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(credentials: Credentials) -> PassiveTotalClientBuilder {
        PassiveTotalClientBuilder::new(credentials)
    }

    /// Username the client authenticates as
    #[must_use]
    pub fn username(&self) -> &str {
        &self.inner.credentials.username
    }

    /// Access passive DNS endpoints
    #[must_use]
    pub fn dns(&self) -> DnsApi<'_> {
        DnsApi::new(self)
    }

    /// Access WHOIS endpoints
    #[must_use]
    pub fn whois(&self) -> WhoisApi<'_> {
        WhoisApi::new(self)
    }

    /// Access SSL certificate endpoints
    #[must_use]
    pub fn ssl(&self) -> SslApi<'_> {
        SslApi::new(self)
    }

    /// Access enrichment endpoints
    #[must_use]
    pub fn enrichment(&self) -> EnrichmentApi<'_> {
        EnrichmentApi::new(self)
    }

    /// Access host attribute endpoints (components, trackers, pairs, cookies)
    #[must_use]
    pub fn attributes(&self) -> AttributesApi<'_> {
        AttributesApi::new(self)
    }

    /// Access services endpoints
    #[must_use]
    pub fn services(&self) -> ServicesApi<'_> {
        ServicesApi::new(self)
    }

    /// Access action endpoints (tags, classification, flags)
    #[must_use]
    pub fn actions(&self) -> ActionsApi<'_> {
        ActionsApi::new(self)
    }

    /// Access account endpoints
    #[must_use]
    pub fn account(&self) -> AccountApi<'_> {
        AccountApi::new(self)
    }

    /// Access project endpoints
    #[must_use]
    pub fn projects(&self) -> ProjectApi<'_> {
        ProjectApi::new(self)
    }

    /// Access artifact endpoints
    #[must_use]
    pub fn artifacts(&self) -> ArtifactApi<'_> {
        ArtifactApi::new(self)
    }

    /// Access monitor endpoints
    #[must_use]
    pub fn monitor(&self) -> MonitorApi<'_> {
        MonitorApi::new(self)
    }

    /// Access summary card endpoints
    #[must_use]
    pub fn cards(&self) -> CardsApi<'_> {
        CardsApi::new(self)
    }

    /// Access Illuminate reputation endpoints
    #[must_use]
    pub fn reputation(&self) -> ReputationApi<'_> {
        ReputationApi::new(self)
    }

    /// Access Illuminate intel profile endpoints
    #[must_use]
    pub fn intel(&self) -> IntelApi<'_> {
        IntelApi::new(self)
    }

    /// Access Illuminate attack surface endpoints
    #[must_use]
    pub fn attack_surface(&self) -> AttackSurfaceApi<'_> {
        AttackSurfaceApi::new(self)
    }

    /// Access Illuminate vulnerability intelligence endpoints
    #[must_use]
    pub fn vuln_intel(&self) -> VulnIntelApi<'_> {
        VulnIntelApi::new(self)
    }

    /// Access article endpoints
    #[must_use]
    pub fn articles(&self) -> ArticlesApi<'_> {
        ArticlesApi::new(self)
    }

    /// Perform a GET request
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_with_query(path, &[]).await
    }

    /// Perform a GET request with query parameters
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        self.request::<T, ()>(Method::GET, path, params, None).await
    }

    /// Perform a POST request with JSON body
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// Perform a PUT request with JSON body
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    /// Perform a DELETE request with JSON body
    pub(crate) async fn delete<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.request(Method::DELETE, path, &[], Some(body)).await
    }

    /// Send a request, retrying retryable failures with backoff
    #[instrument(skip(self, method, params, body), fields(method = %method))]
    async fn request<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T> {
        let url = self.build_url(path, params);
        let retry = &self.inner.retry_config;
        let mut attempt = 0;

        loop {
            let result = self.send_once(method.clone(), &url, body).await;

            let err = match result {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            let allowed = match err {
                PassiveTotalError::RateLimited { .. } => retry.retry_on_rate_limit,
                _ => err.is_retryable(),
            };
            if !allowed || attempt >= retry.max_retries {
                return Err(err);
            }

            let wait = match err {
                PassiveTotalError::RateLimited {
                    retry_after: Some(secs),
                } => Duration::from_secs(secs).min(retry.max_backoff),
                _ => retry.backoff_for(attempt),
            };
            attempt += 1;
            warn!(
                error = %err,
                attempt,
                wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX),
                "retrying request"
            );
            tokio::time::sleep(wait).await;
        }
    }

    async fn send_once<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T> {
        if let Some(limiter) = &self.inner.rate_limiter {
            limiter.until_ready().await;
        }

        debug!(url = %url, method = %method, "API request");

        let mut request = self
            .inner
            .http
            .request(method, url)
            .basic_auth(
                &self.inner.credentials.username,
                Some(&self.inner.credentials.api_key),
            );
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| self.map_transport_error(&e))?;
        self.handle_response(response).await
    }

    /// Build a URL with query parameters
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", self.inner.base_url, path);

        if !params.is_empty() {
            let query = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(params)
                .finish();
            url.push('?');
            url.push_str(&query);
        }

        url
    }

    fn map_transport_error(&self, err: &reqwest::Error) -> PassiveTotalError {
        if err.is_timeout() {
            PassiveTotalError::Timeout(self.inner.timeout.as_secs())
        } else if err.is_connect() {
            PassiveTotalError::Connection(err.to_string())
        } else {
            PassiveTotalError::Http(err.to_string())
        }
    }

    /// Handle an API response that returns JSON
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| PassiveTotalError::Http(e.to_string()))?;
            serde_json::from_str(&body).map_err(PassiveTotalError::Json)
        } else {
            Err(Self::handle_error(status.as_u16(), response).await)
        }
    }

    /// Convert an error response to a [`PassiveTotalError`]
    async fn handle_error(status: u16, response: reqwest::Response) -> PassiveTotalError {
        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok());
        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);

        match status {
            401 => PassiveTotalError::Unauthorized,
            402 => PassiveTotalError::QuotaExceeded { message },
            403 if message.to_ascii_lowercase().contains("quota") => {
                PassiveTotalError::QuotaExceeded { message }
            }
            404 => PassiveTotalError::NotFound {
                resource: if message.is_empty() { path } else { message },
            },
            429 => {
                warn!(?retry_after, "Rate limited by PassiveTotal API");
                PassiveTotalError::RateLimited { retry_after }
            }
            _ => PassiveTotalError::Api {
                code: status,
                message,
            },
        }
    }
}

/// Extract the error message from an API error body.
///
/// Understands `{"error": {"message": ...}}`, `{"error": "..."}` and
/// `{"message": "..."}`, falling back to the raw body.
fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    parsed
        .as_ref()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message").or(Some(e)))
                .or_else(|| v.get("message"))
                .and_then(serde_json::Value::as_str)
        })
        .map_or_else(|| body.trim().to_string(), String::from)
}

/// Builder for configuring a [`PassiveTotalClient`]
pub struct PassiveTotalClientBuilder {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    user_agent: String,
    retry_config: RetryConfig,
    rate_limit: Option<RateLimitConfig>,
}

impl PassiveTotalClientBuilder {
    /// Create a new builder with the given credentials
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("passivetotal-rust/{}", env!("CARGO_PKG_VERSION")),
            retry_config: RetryConfig::default(),
            rate_limit: None,
        }
    }

    /// Set the base URL (useful for testing)
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set retry configuration
    #[must_use]
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Enforce a client-side rate limit
    #[must_use]
    pub fn rate_limit(mut self, config: RateLimitConfig) -> Self {
        self.rate_limit = Some(config);
        self
    }

    /// Build the client
    #[must_use]
    pub fn build(self) -> PassiveTotalClient {
        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .expect("Failed to build HTTP client");

        let rate_limiter = self.rate_limit.map(|config| {
            let quota = Quota::per_second(
                NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN),
            )
            .allow_burst(NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN));
            RateLimiter::direct(quota)
        });

        PassiveTotalClient {
            inner: Arc::new(ClientInner {
                http,
                credentials: self.credentials,
                base_url: self.base_url,
                timeout: self.timeout,
                retry_config: self.retry_config,
                rate_limiter,
            }),
        }
    }
}
