//! HTTP transport port.
//!
//! The rate client issues exactly one GET per lookup through this trait.
//! Implementations can be reqwest, canned responses in tests, etc.

use crate::error::TransportError;

/// Port trait for the outbound HTTP call.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync + 'static {
    /// Performs a GET and returns the response body as text.
    ///
    /// The body is returned for any HTTP status: the rate API reports its
    /// errors inside the body. Only I/O failures and timeouts are errors.
    async fn get(&self, url: &str) -> Result<String, TransportError>;
}
