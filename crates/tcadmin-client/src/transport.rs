//! HTTP transport for billing API calls
//!
//! The client talks to the network only through [`Transport`], so tests can
//! substitute a recording mock (see `mock::MockTransport`).

use crate::error::TcAdminError;
use crate::models::RequestParameters;
use reqwest::Client;
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::debug;

/// Executes one form-encoded POST and returns the raw response body
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// POST `form` to `url`, giving up after `timeout`.
    ///
    /// Connection failures, timeouts and non-2xx statuses are reported as
    /// [`TcAdminError::Transport`].
    async fn post_form(
        &self,
        url: &str,
        form: &RequestParameters,
        timeout: Duration,
    ) -> Result<String, TcAdminError>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport.
    ///
    /// Redirects are never followed: a 3xx answer from the billing endpoint
    /// is reported as a failed call. Fails with
    /// [`TcAdminError::Environment`] when the HTTP stack (TLS backend,
    /// resolver) cannot be initialised.
    pub fn new(connect_timeout: Duration) -> Result<Self, TcAdminError> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|e| TcAdminError::Environment(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn post_form(
        &self,
        url: &str,
        form: &RequestParameters,
        timeout: Duration,
    ) -> Result<String, TcAdminError> {
        let response = self.client
            .post(url)
            .timeout(timeout)
            .form(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TcAdminError::Transport(format!("unexpected HTTP status {}", status)));
        }

        let body = response.text().await?;
        debug!("Received {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
