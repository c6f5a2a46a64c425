//! Core HTTP client: one request, one full response, no retries.

use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestBuilder;
use crate::response::Response;

/// HTTP client for Salesforce APIs.
///
/// Every call issues exactly one request and resolves once the status line
/// is available. Failures are surfaced once; nothing is retried.
#[derive(Debug, Clone)]
pub struct SfHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl SfHttpClient {
    /// Create a new HTTP client with the given configuration.
    ///
    /// Redirects are not followed: a 3xx is returned to the caller as is and
    /// request headers never reach another host.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(url)
    }

    /// Execute a POST request: build it, write the body, read the status.
    ///
    /// Non-success statuses are returned as a `Response`; callers decide
    /// which range counts as success.
    #[instrument(skip(self, request), fields(url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let mut req = self.inner.post(&request.url);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        if self.config.enable_tracing {
            debug!(url = %request.url, "Sending request");
        }

        let response = req.send().await?;

        if self.config.enable_tracing {
            let status = response.status().as_u16();
            let content_length = response.content_length();

            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        Ok(Response::new(response))
    }

    /// Execute a request and return the body text when the status is in `[200, 400)`.
    ///
    /// Other statuses become `ErrorKind::Http` carrying the error body.
    pub async fn send_text(&self, request: RequestBuilder) -> Result<String> {
        let response = self.execute(request).await?;
        if !response.is_accepted() {
            return Err(response.into_error().await);
        }
        response.text().await
    }
}
