//! Error types for the converter.

/// Transport-level failures (network I/O and timeouts).
///
/// None of these reach the user directly; the rate client folds them into an
/// empty body and the coordinator into a failed outcome.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Request timed out")]
    Timeout,
}
