//! # FX Types
//!
//! Domain types and port traits for the currency converter.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (requests, outcomes, connectivity, notices)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Wire shapes of the rate API
//! - `error/` - Transport error type

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use currency_catalog::CurrencyCode;
pub use domain::{
    ConnectivityEpisode, ConversionRequest, FetchFailure, FetchOutcome, Notice, Transport,
};
pub use dto::LatestRatesResponse;
pub use error::TransportError;
pub use ports::{HttpTransport, NetworkMonitor, Notifier};
