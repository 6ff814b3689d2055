//! Transient user-facing notices.

use std::fmt;

/// A short-lived message for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// Device went offline; shown once per disconnect episode.
    NoInternet,
    /// A fetch completed without a usable rate.
    TroubleFetching,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NoInternet => write!(f, "No internet connection"),
            Notice::TroubleFetching => write!(f, "Trouble fetching rate, try again"),
        }
    }
}
