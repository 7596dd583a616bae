//! # Camera Discovery Service
//!
//! Implements the "find cameras" use case.
//!
//! The service owns the three collaborators a scan needs and decides which of them
//! runs. A scan asks devices to identify themselves first and only falls back to
//! probing every host of the subnet when nobody answered.

use camscout_common::config::Config;
use camscout_common::device::DiscoveredDevice;
use camscout_common::error::ScanError;
use camscout_common::network::interface::NetworkInterface;
use serde::Serialize;
use tracing::info;

use crate::scanner::multicast::{MulticastProber, ProbeSlot};
use crate::scanner::sweep::SubnetSweeper;
use crate::scanner::{DeviceProber, HostSweeper, InterfaceRepository};
use crate::system::SystemInterfaces;

/// Which phase produced the devices of a [`ScanReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMethod {
    Onvif,
    Sweep,
}

/// Outcome of one scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// The interface the scan ran from.
    pub network: NetworkInterface,
    pub devices: Vec<DiscoveredDevice>,
    pub method: ScanMethod,
}

/// Application service for camera discovery.
///
/// Orchestrates a scan by:
/// 1. picking an interface from the [`InterfaceRepository`].
/// 2. running the [`DeviceProber`] from it.
/// 3. running the [`HostSweeper`] on its subnet when the probe came back empty.
pub struct DiscoveryService {
    interfaces: Box<dyn InterfaceRepository>,
    prober: Box<dyn DeviceProber>,
    sweeper: Box<dyn HostSweeper>,
    preferred: Option<String>,
    sweep_fallback: bool,
}

impl DiscoveryService {
    pub fn new(
        interfaces: Box<dyn InterfaceRepository>,
        prober: Box<dyn DeviceProber>,
        sweeper: Box<dyn HostSweeper>,
    ) -> Self {
        Self {
            interfaces,
            prober,
            sweeper,
            preferred: None,
            sweep_fallback: true,
        }
    }

    /// Wires the host's interfaces, the multicast prober on the process-wide
    /// [`ProbeSlot`] and the TCP sweeper.
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            Box::new(SystemInterfaces),
            Box::new(MulticastProber::new(cfg.probe, ProbeSlot::global())),
            Box::new(SubnetSweeper::new(cfg.sweep)),
        )
        .with_interface(cfg.interface.clone())
        .with_sweep_fallback(!cfg.no_sweep)
    }

    /// Scan from the interface called `name` instead of the first usable one.
    pub fn with_interface(mut self, name: Option<String>) -> Self {
        self.preferred = name;
        self
    }

    pub fn with_sweep_fallback(mut self, enabled: bool) -> Self {
        self.sweep_fallback = enabled;
        self
    }

    /// The interfaces a scan could run from.
    pub fn networks(&self) -> Vec<NetworkInterface> {
        self.interfaces.usable_interfaces()
    }

    /// Runs one scan and reports the devices found.
    ///
    /// The result holds either the probe's devices or the sweep's, never both.
    pub async fn perform_discovery(&self) -> Result<ScanReport, ScanError> {
        let network = self.select_interface()?;
        info!("Scanning from {} ({})", network.name, network.cidr);

        let devices = self.prober.probe(&network).await?;
        if !devices.is_empty() || !self.sweep_fallback {
            return Ok(ScanReport {
                network,
                devices,
                method: ScanMethod::Onvif,
            });
        }

        info!("No discovery replies, sweeping {} for open port", network.address);
        let devices = self.sweeper.sweep(network.address).await;
        Ok(ScanReport {
            network,
            devices,
            method: ScanMethod::Sweep,
        })
    }

    fn select_interface(&self) -> Result<NetworkInterface, ScanError> {
        let mut networks = self.interfaces.usable_interfaces();
        if networks.is_empty() {
            return Err(ScanError::NoUsableInterface);
        }

        match &self.preferred {
            None => Ok(networks.remove(0)),
            Some(name) => networks
                .into_iter()
                .find(|n| &n.name == name)
                .ok_or_else(|| ScanError::InterfaceNotFound(name.clone())),
        }
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
