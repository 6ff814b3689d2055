//! Device reachability port.

use crate::domain::Transport;

/// Port trait for querying the device's active network links.
#[async_trait::async_trait]
pub trait NetworkMonitor: Send + Sync + 'static {
    /// Lists the transports that are currently up.
    async fn active_transports(&self) -> Vec<Transport>;

    /// Returns true if any active transport provides internet access.
    async fn is_reachable(&self) -> bool {
        crate::domain::is_reachable(&self.active_transports().await)
    }
}
