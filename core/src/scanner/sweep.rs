//! TCP connect sweep over the /24 around a base address.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use camscout_common::config::SweepConfig;
use camscout_common::device::DiscoveredDevice;
use camscout_common::network::range;
use tracing::{debug, info};

use super::HostSweeper;
use crate::network::tcp::{handshake_probe, handshake_range_discovery};

pub struct SubnetSweeper {
    cfg: SweepConfig,
}

impl SubnetSweeper {
    pub fn new(cfg: SweepConfig) -> Self {
        Self { cfg }
    }
}

#[async_trait]
impl HostSweeper for SubnetSweeper {
    /// Hosts are reported sorted by address, whatever order their handshakes finished in.
    async fn sweep(&self, base: Ipv4Addr) -> Vec<DiscoveredDevice> {
        let hosts = range::host_range(base);
        let connect_timeout = self.cfg.connect_timeout;
        debug!(
            "Sweeping {} hosts ({} - {}) on port {}",
            hosts.len(),
            hosts.start_addr,
            hosts.end_addr,
            self.cfg.port
        );

        let mut reachable = handshake_range_discovery(
            hosts.to_iter(),
            self.cfg.port,
            self.cfg.concurrency,
            |addr| handshake_probe(addr, connect_timeout),
        )
        .await;
        reachable.sort();

        info!("Sweep found {} reachable hosts", reachable.len());
        reachable
            .into_iter()
            .map(|ip| DiscoveredDevice::http(ip, self.cfg.port))
            .collect()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use camscout_common::device::{DeviceKind, UNKNOWN};
    use std::time::Duration;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn sweep_should_report_listening_loopback_host() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let sweeper = SubnetSweeper::new(SweepConfig {
            port,
            concurrency: 20,
            connect_timeout: Duration::from_millis(200),
        });

        let devices = sweeper.sweep(Ipv4Addr::new(127, 0, 0, 42)).await;

        let hit = devices
            .iter()
            .find(|d| d.ip == Ipv4Addr::LOCALHOST)
            .expect("listener on 127.0.0.1 should be found");
        assert_eq!(hit.port, port);
        assert_eq!(hit.kind, DeviceKind::Http);
        assert_eq!(hit.manufacturer, UNKNOWN);
        assert_eq!(hit.model, UNKNOWN);
        assert!(devices.windows(2).all(|pair| pair[0].ip < pair[1].ip));
    }
}
