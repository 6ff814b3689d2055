//! # FX Client
//!
//! Outbound adapters for the currency converter:
//!
//! - [`RateClient`] - one GET per lookup against the rate API, with
//!   cancel-by-tag supersession of earlier calls
//! - [`ReqwestTransport`] - the production [`fx_types::HttpTransport`]
//! - [`SysfsNetworkMonitor`] - device reachability from `/sys/class/net`

pub mod endpoint;
pub mod network;
pub mod rate_client;
pub mod registry;
pub mod reqwest_transport;

pub use endpoint::{DEFAULT_BASE_URL, Endpoint, InvalidEndpoint};
pub use network::{StaticNetworkMonitor, SysfsNetworkMonitor};
pub use rate_client::{CURRENCY_FETCH_TAG, RateClient};
pub use registry::CallRegistry;
pub use reqwest_transport::ReqwestTransport;
