//! HTTP transport backed by reqwest.

use std::time::Duration;

use fx_types::{HttpTransport, TransportError};
use reqwest::Client;

/// Connect timeout used when none is configured.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(120);
/// Whole-request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Production transport.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given connect and overall request timeouts.
    pub fn new(
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, TransportError> {
        let http = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()
            .map_err(map_reqwest_error)?;
        Ok(Self { http })
    }

    pub fn with_defaults() -> Result<Self, TransportError> {
        Self::new(DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT)
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<String, TransportError> {
        let resp = self.http.get(url).send().await.map_err(map_reqwest_error)?;
        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Rate server answered with error status");
        }
        resp.text().await.map_err(map_reqwest_error)
    }
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_creation() {
        assert!(ReqwestTransport::with_defaults().is_ok());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_request_error() {
        let transport =
            ReqwestTransport::new(Duration::from_secs(2), Duration::from_secs(5)).unwrap();

        // Port 9 on loopback is the discard port; nothing listens there.
        let err = transport.get("http://127.0.0.1:9/latest").await.unwrap_err();

        assert!(matches!(
            err,
            TransportError::Request(_) | TransportError::Timeout
        ));
    }
}
