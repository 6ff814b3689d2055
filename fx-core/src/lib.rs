//! # FX Core
//!
//! Application layer of the currency converter.
//!
//! ## Architecture
//!
//! - `gate` - waits for network reachability, one notice per offline episode
//! - `coordinator` - at most one rate fetch in flight; newest call wins
//! - `parse` - raw response body to [`fx_types::FetchOutcome`]
//! - `conversion` - selected pair, amount, rate and derived converted amount
//! - `session` - drives the state from presentation events
//!
//! Everything is generic over the transport and network monitor ports, so the
//! same code runs against reqwest and sysfs or against test doubles.

pub mod conversion;
pub mod coordinator;
pub mod gate;
pub mod parse;
pub mod session;


pub use conversion::{AppliedRate, ConversionState, RateUpdate, convert_amount};
pub use coordinator::RateFetchCoordinator;
pub use gate::{ConnectivityGate, DEFAULT_POLL_INTERVAL};
pub use parse::parse_rate_response;
pub use session::{ConversionSession, Refresh};
