//! Outbound HTTP call with a per-call deadline.

use std::time::{Duration, Instant};

use axum::body::Bytes;
use reqwest::{Client, RequestBuilder};

use crate::http::response::ApiError;
use crate::observability::metrics;

/// One upstream service reached through a shared HTTP client.
///
/// Cheap to clone; the underlying `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: Client,
    /// Label used in logs and metrics.
    name: &'static str,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(http: Client, name: &'static str, timeout: Duration) -> Self {
        Self {
            http,
            name,
            timeout,
        }
    }

    /// The shared client, for building requests that are then passed to
    /// [`UpstreamClient::execute`].
    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Send a prepared request and return the raw success body.
    ///
    /// `sent` is the redacted rendering of what was sent; it is only used in
    /// the diagnostic of an upstream HTTP error.
    pub async fn execute(
        &self,
        operation: &str,
        request: RequestBuilder,
        sent: impl FnOnce() -> String,
    ) -> Result<Bytes, ApiError> {
        let start = Instant::now();

        let response = match request.timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(e) => {
                let e = e.without_url();
                tracing::error!(
                    upstream = self.name,
                    operation,
                    timeout = e.is_timeout(),
                    error = %e,
                    "Upstream unreachable"
                );
                metrics::record_upstream(self.name, "unreachable", start);
                return Err(ApiError::Unavailable(e.to_string()));
            }
        };

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            metrics::record_upstream(self.name, "unreachable", start);
            ApiError::Unavailable(e.without_url().to_string())
        })?;

        tracing::info!(
            upstream = self.name,
            operation,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Upstream call completed"
        );

        if !status.is_success() {
            metrics::record_upstream(self.name, "error_status", start);
            return Err(ApiError::Upstream {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
                sent: sent(),
            });
        }

        metrics::record_upstream(self.name, "ok", start);
        Ok(body)
    }
}
