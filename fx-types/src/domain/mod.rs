//! Domain models for the currency converter.

pub mod connectivity;
pub mod notice;
pub mod outcome;
pub mod request;

pub use connectivity::{ConnectivityEpisode, Transport, is_reachable};
pub use notice::Notice;
pub use outcome::{FetchFailure, FetchOutcome};
pub use request::ConversionRequest;
