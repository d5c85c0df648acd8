//! Shared HTTP plumbing for capability providers
//!
//! Every capability adapter sends its requests through [`ProviderClient`].
//! The client deliberately does not interpret response statuses: a non-2xx
//! answer comes back as a plain [`RawResponse`] for the calling provider to
//! classify. Only transport-level failures (connect, timeout, interrupted
//! body) surface as errors, already mapped to
//! [`CapabilityError::Network`].
//!
//! # Example
//!
//! ```ignore
//! use provider_http::ProviderClient;
//!
//! let client = ProviderClient::new()?;
//! let response = client
//!     .post("https://api.example.com/v1/chat/completions")
//!     .bearer_auth("sk-...")
//!     .json(&request_body)
//!     .send()
//!     .await?;
//!
//! if !response.is_success() {
//!     // interpretation belongs to the caller
//! }
//! ```

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use domain::{CapabilityError, CapabilityResult};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};
use tracing::debug;

/// Configuration for the provider HTTP client
#[derive(Debug, Clone)]
pub struct ProviderClientConfig {
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ProviderClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(30),
            user_agent: format!("Ari/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ProviderClientConfig {
    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connection timeout
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the user agent string
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Authenticated request/response helper shared by all capability providers
///
/// Wraps a pooled `reqwest::Client`. Holds no other state and never retries.
#[derive(Debug, Clone)]
pub struct ProviderClient {
    inner: Client,
    config: ProviderClientConfig,
}

impl ProviderClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client cannot be built.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_config(ProviderClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client cannot be built.
    pub fn with_config(config: ProviderClientConfig) -> Result<Self, reqwest::Error> {
        let inner = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { inner, config })
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &ProviderClientConfig {
        &self.config
    }

    /// Start a POST request
    pub fn post(&self, url: impl AsRef<str>) -> ProviderRequestBuilder {
        ProviderRequestBuilder::new(self.inner.post(url.as_ref()))
    }

    /// Start a GET request
    pub fn get(&self, url: impl AsRef<str>) -> ProviderRequestBuilder {
        ProviderRequestBuilder::new(self.inner.get(url.as_ref()))
    }
}

/// A request builder that finishes with a [`RawResponse`]
pub struct ProviderRequestBuilder {
    inner: RequestBuilder,
}

impl fmt::Debug for ProviderRequestBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRequestBuilder")
            // RequestBuilder doesn't implement Debug, so we skip it
            .finish_non_exhaustive()
    }
}

impl ProviderRequestBuilder {
    #[allow(clippy::missing_const_for_fn)]
    fn new(inner: RequestBuilder) -> Self {
        Self { inner }
    }

    /// Add a header to the request
    #[must_use]
    pub fn header(
        mut self,
        name: impl TryInto<HeaderName>,
        value: impl TryInto<HeaderValue>,
    ) -> Self {
        if let (Ok(name), Ok(value)) = (name.try_into(), value.try_into()) {
            self.inner = self.inner.header(name, value);
        }
        self
    }

    /// Set a bearer auth token
    #[must_use]
    pub fn bearer_auth(mut self, token: impl fmt::Display) -> Self {
        self.inner = self.inner.bearer_auth(token);
        self
    }

    /// Set the request body as JSON
    #[must_use]
    pub fn json<T: serde::Serialize + ?Sized>(mut self, json: &T) -> Self {
        self.inner = self.inner.json(json);
        self
    }

    /// Set the request body as a multipart form
    #[must_use]
    pub fn multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.inner = self.inner.multipart(form);
        self
    }

    /// Set the request timeout for this call only
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Send the request and collect the raw response
    ///
    /// Non-2xx statuses are returned, not raised; only transport failures
    /// become errors.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::Network`] if the request cannot be sent or
    /// the response body cannot be read.
    pub async fn send(self) -> CapabilityResult<RawResponse> {
        let response = self.inner.send().await.map_err(classify_transport)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(classify_transport)?;

        debug!(status, body_len = body.len(), "Provider response received");

        Ok(RawResponse { status, body })
    }
}

/// Raw status and body of a provider response
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    body: Bytes,
}

impl RawResponse {
    /// Create a raw response from its parts
    #[must_use]
    pub const fn new(status: u16, body: Bytes) -> Self {
        Self { status, body }
    }

    /// HTTP status code
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Raw body bytes
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consume and return the body bytes
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Body as text, lossily decoded
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body as JSON
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::MalformedResponse`] if the body does not
    /// match the expected shape.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> CapabilityResult<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| CapabilityError::MalformedResponse(e.to_string()))
    }
}

fn classify_transport(err: reqwest::Error) -> CapabilityError {
    if err.is_timeout() {
        CapabilityError::Network(format!("request timed out: {err}"))
    } else if err.is_connect() {
        CapabilityError::Network(format!("connection failed: {err}"))
    } else {
        CapabilityError::Network(err.to_string())
    }
}
