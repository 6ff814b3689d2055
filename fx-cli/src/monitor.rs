//! Reachability source chosen at startup.

use fx_client::{StaticNetworkMonitor, SysfsNetworkMonitor};
use fx_types::{NetworkMonitor, Transport};

pub enum DeviceMonitor {
    Sysfs(SysfsNetworkMonitor),
    AssumeOnline(StaticNetworkMonitor),
}

impl DeviceMonitor {
    pub fn new(assume_online: bool) -> Self {
        if assume_online {
            DeviceMonitor::AssumeOnline(StaticNetworkMonitor::online())
        } else {
            DeviceMonitor::Sysfs(SysfsNetworkMonitor::default())
        }
    }
}

#[async_trait::async_trait]
impl NetworkMonitor for DeviceMonitor {
    async fn active_transports(&self) -> Vec<Transport> {
        match self {
            DeviceMonitor::Sysfs(monitor) => monitor.active_transports().await,
            DeviceMonitor::AssumeOnline(monitor) => monitor.active_transports().await,
        }
    }
}
