//! Reachability from the Linux network interface table.
//!
//! Reads `/sys/class/net/<iface>/operstate` and classifies each interface
//! that is up by its kernel name.

use std::path::PathBuf;

use fx_types::{NetworkMonitor, Transport};

const SYSFS_NET: &str = "/sys/class/net";

pub struct SysfsNetworkMonitor {
    root: PathBuf,
}

impl Default for SysfsNetworkMonitor {
    fn default() -> Self {
        Self::new(SYSFS_NET)
    }
}

impl SysfsNetworkMonitor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn interface_transport(&self, iface: &str) -> Option<Transport> {
        let dir = self.root.join(iface);
        let state = tokio::fs::read_to_string(dir.join("operstate")).await.ok()?;
        // ppp and wwan links often report "unknown" while carrying traffic.
        if !matches!(state.trim(), "up" | "unknown") {
            return None;
        }
        let wireless = tokio::fs::try_exists(dir.join("wireless"))
            .await
            .unwrap_or(false);
        Some(classify(iface, wireless))
    }
}

/// Maps an interface name to its transport kind.
pub fn classify(iface: &str, wireless: bool) -> Transport {
    const CELLULAR: [&str; 4] = ["wwan", "rmnet", "ccmni", "ppp"];
    const ETHERNET: [&str; 2] = ["eth", "en"];

    if wireless || iface.starts_with("wl") {
        Transport::Wifi
    } else if CELLULAR.iter().any(|p| iface.starts_with(p)) {
        Transport::Cellular
    } else if ETHERNET.iter().any(|p| iface.starts_with(p)) {
        Transport::Ethernet
    } else {
        Transport::Other
    }
}

#[async_trait::async_trait]
impl NetworkMonitor for SysfsNetworkMonitor {
    async fn active_transports(&self) -> Vec<Transport> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    path = %self.root.display(),
                    error = %e,
                    "Cannot list network interfaces"
                );
                return Vec::new();
            }
        };

        let mut transports = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name();
            let Some(iface) = name.to_str() else { continue };
            if let Some(transport) = self.interface_transport(iface).await {
                transports.push(transport);
            }
        }
        transports
    }
}

/// Reports a fixed set of transports. For hosts without `/sys/class/net`.
pub struct StaticNetworkMonitor(pub Vec<Transport>);

impl StaticNetworkMonitor {
    pub fn online() -> Self {
        Self(vec![Transport::Ethernet])
    }
}

#[async_trait::async_trait]
impl NetworkMonitor for StaticNetworkMonitor {
    async fn active_transports(&self) -> Vec<Transport> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn add_iface(root: &Path, name: &str, state: &str, wireless: bool) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("operstate"), format!("{}\n", state)).unwrap();
        if wireless {
            fs::create_dir_all(dir.join("wireless")).unwrap();
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("wlan0", false), Transport::Wifi);
        assert_eq!(classify("wlp3s0", false), Transport::Wifi);
        assert_eq!(classify("mlan0", true), Transport::Wifi);
        assert_eq!(classify("wwan0", false), Transport::Cellular);
        assert_eq!(classify("rmnet_data0", false), Transport::Cellular);
        assert_eq!(classify("eth0", false), Transport::Ethernet);
        assert_eq!(classify("enp0s31f6", false), Transport::Ethernet);
        assert_eq!(classify("lo", false), Transport::Other);
        assert_eq!(classify("docker0", false), Transport::Other);
    }

    #[tokio::test]
    async fn test_only_up_interfaces_are_reported() {
        let root = tempfile::tempdir().unwrap();
        add_iface(root.path(), "lo", "unknown", false);
        add_iface(root.path(), "eth0", "down", false);
        add_iface(root.path(), "wlan0", "up", true);

        let monitor = SysfsNetworkMonitor::new(root.path());
        let mut transports = monitor.active_transports().await;
        transports.sort_by_key(|t| format!("{:?}", t));

        assert_eq!(transports, vec![Transport::Other, Transport::Wifi]);
        assert!(monitor.is_reachable().await);
    }

    #[tokio::test]
    async fn test_loopback_only_is_offline() {
        let root = tempfile::tempdir().unwrap();
        add_iface(root.path(), "lo", "unknown", false);
        add_iface(root.path(), "eth0", "down", false);

        let monitor = SysfsNetworkMonitor::new(root.path());

        assert!(!monitor.is_reachable().await);
    }

    #[tokio::test]
    async fn test_static_monitor() {
        assert!(StaticNetworkMonitor::online().is_reachable().await);
        assert!(!StaticNetworkMonitor(vec![]).is_reachable().await);
    }

    #[tokio::test]
    async fn test_missing_root_is_offline() {
        let monitor = SysfsNetworkMonitor::new("/definitely/not/a/sysfs/path");
        assert!(monitor.active_transports().await.is_empty());
    }
}
