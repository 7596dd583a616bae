//! The **abstractions** the scan orchestrator is written against.
//!
//! Each discovery technique lives in its own submodule and is reached through one of
//! the traits below:
//!
//! * [`multicast`]: the WS-Discovery prober, behind [`DeviceProber`].
//! * [`sweep`]: the TCP connect sweep over the local /24, behind [`HostSweeper`].
//!
//! Interface enumeration sits behind [`InterfaceRepository`] so that
//! [`crate::discovery::DiscoveryService`] can run against fakes in tests.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use camscout_common::device::DiscoveredDevice;
use camscout_common::error::ScanError;
use camscout_common::network::interface::NetworkInterface;

pub mod multicast;
pub mod sweep;

/// Source of the local interfaces a scan can run from.
pub trait InterfaceRepository: Send + Sync {
    /// Usable IPv4 interfaces in the order the host reports them.
    fn usable_interfaces(&self) -> Vec<NetworkInterface>;
}

/// A one-shot discovery exchange that asks devices to identify themselves.
#[async_trait]
pub trait DeviceProber: Send + Sync {
    /// Probes from `network` and returns every device that answered, one per IP.
    ///
    /// Fails only when the probe cannot be started at all.
    async fn probe(&self, network: &NetworkInterface) -> Result<Vec<DiscoveredDevice>, ScanError>;
}

/// A best-effort reachability sweep over the subnet of a base address.
#[async_trait]
pub trait HostSweeper: Send + Sync {
    /// Never fails: unreachable hosts are simply absent from the result.
    async fn sweep(&self, base: Ipv4Addr) -> Vec<DiscoveredDevice>;
}
