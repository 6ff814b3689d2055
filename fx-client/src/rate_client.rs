//! Single-stream rate client.

use std::sync::Arc;

use fx_types::{ConversionRequest, HttpTransport};

use crate::endpoint::Endpoint;
use crate::registry::CallRegistry;

/// Tag of the one logical "currency fetch" stream.
pub const CURRENCY_FETCH_TAG: &str = "GET CURRENCY";

/// Issues the rate GET for a currency pair.
///
/// Every fetch runs under [`CURRENCY_FETCH_TAG`], so starting one cancels any
/// earlier fetch that is still queued or running. Failures are not raised:
/// the caller receives an empty body and must treat it as a failed fetch.
/// There are no retries here.
pub struct RateClient<T: HttpTransport> {
    endpoint: Endpoint,
    transport: Arc<T>,
    calls: CallRegistry,
}

impl<T: HttpTransport> RateClient<T> {
    pub fn new(endpoint: Endpoint, transport: T) -> Self {
        Self {
            endpoint,
            transport: Arc::new(transport),
            calls: CallRegistry::new(),
        }
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the raw response body for `req`, or an empty string on failure.
    pub async fn fetch(&self, req: ConversionRequest) -> String {
        let url = self.endpoint.latest_url(req);
        let transport = Arc::clone(&self.transport);

        tracing::debug!(pair = %req, "Requesting rate");
        let (call_id, task) = self
            .calls
            .start(CURRENCY_FETCH_TAG, async move { transport.get(&url).await });
        let result = task.await;
        self.calls.finish(CURRENCY_FETCH_TAG, call_id);

        match result {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => {
                tracing::warn!(pair = %req, error = %e, "Error contacting rate server");
                String::new()
            }
            Err(e) if e.is_cancelled() => {
                tracing::debug!(pair = %req, "Rate request cancelled by a newer request");
                String::new()
            }
            Err(e) => {
                tracing::warn!(pair = %req, error = %e, "Rate request task failed");
                String::new()
            }
        }
    }

    /// Cancels the in-flight fetch, if any.
    pub fn cancel(&self) -> bool {
        self.calls.cancel(CURRENCY_FETCH_TAG)
    }
}
