//! Network reachability model.

use chrono::{DateTime, Utc};

/// Kind of network link reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    Cellular,
    Wifi,
    Ethernet,
    /// Loopback, tunnels, bridges and anything else the monitor cannot classify.
    Other,
}

impl Transport {
    /// Cellular, Wi-Fi and wired links each make the device reachable on their own.
    pub fn provides_internet(&self) -> bool {
        matches!(
            self,
            Transport::Cellular | Transport::Wifi | Transport::Ethernet
        )
    }
}

/// Returns true if any of the given transports provides internet access.
pub fn is_reachable(transports: &[Transport]) -> bool {
    transports.iter().any(Transport::provides_internet)
}

/// A continuous span of offline time.
///
/// Tracks whether the "no internet" notice was already shown so it fires at
/// most once per episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityEpisode {
    pub started_at: DateTime<Utc>,
    pub notified: bool,
}

impl ConnectivityEpisode {
    pub fn begin() -> Self {
        Self {
            started_at: Utc::now(),
            notified: false,
        }
    }

    /// Marks the episode as notified. Returns true only the first time.
    pub fn mark_notified(&mut self) -> bool {
        !std::mem::replace(&mut self.notified, true)
    }
}
