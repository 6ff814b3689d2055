//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod network;
mod notifier;
mod transport;

pub use network::NetworkMonitor;
pub use notifier::Notifier;
pub use transport::HttpTransport;
