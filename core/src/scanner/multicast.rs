//! A **WS-Discovery** prober.
//!
//! Sends a single probe to the discovery multicast group and listens on the
//! discovery port for a fixed window. Every sender whose reply carries a device
//! marker is recorded once, in the order replies arrive.
//!
//! The discovery port is a shared host resource, so each probe first claims a
//! [`ProbeSlot`]. While the claim is held a second probe on the same slot fails
//! with [`ScanError::ScanInProgress`] instead of racing for the port.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use camscout_common::config::ProbeConfig;
use camscout_common::device::{DeviceSet, DiscoveredDevice};
use camscout_common::error::ScanError;
use camscout_common::network::interface::NetworkInterface;
use camscout_protocols::{reply, wsdiscovery::ProbeMessage};
use tokio::net::UdpSocket;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::DeviceProber;
use crate::network::multicast;

const RECV_BUFFER_SIZE: usize = 65_535;

/// Exclusive right to run one probe at a time.
///
/// Clones share the same slot.
#[derive(Debug, Clone)]
pub struct ProbeSlot {
    permits: Arc<Semaphore>,
}

impl ProbeSlot {
    pub fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(1)),
        }
    }

    /// The process-wide slot guarding the well-known discovery port.
    pub fn global() -> Self {
        static GLOBAL: OnceLock<ProbeSlot> = OnceLock::new();
        GLOBAL.get_or_init(ProbeSlot::new).clone()
    }

    fn claim(&self) -> Result<OwnedSemaphorePermit, ScanError> {
        self.permits
            .clone()
            .try_acquire_owned()
            .map_err(|_| ScanError::ScanInProgress)
    }
}

impl Default for ProbeSlot {
    fn default() -> Self {
        Self::new()
    }
}

pub struct MulticastProber {
    cfg: ProbeConfig,
    slot: ProbeSlot,
}

impl MulticastProber {
    pub fn new(cfg: ProbeConfig, slot: ProbeSlot) -> Self {
        Self { cfg, slot }
    }

    /// Claims the slot and binds the discovery socket on `interface`.
    ///
    /// The collection window starts here. Must be called inside a Tokio runtime.
    pub fn open(&self, interface: Ipv4Addr) -> Result<ProbeSession, ScanError> {
        let permit = self.slot.claim()?;
        let bind_error = |source| ScanError::Bind {
            addr: self.cfg.bind_addr,
            source,
        };

        let std_socket =
            multicast::bind_discovery_socket(self.cfg.bind_addr, self.cfg.group, interface)
                .map_err(bind_error)?;
        let socket = UdpSocket::from_std(std_socket).map_err(bind_error)?;

        Ok(ProbeSession {
            socket,
            target: self.cfg.target,
            deadline: Instant::now() + self.cfg.window,
            devices: DeviceSet::new(),
            _permit: permit,
        })
    }
}

#[async_trait]
impl DeviceProber for MulticastProber {
    async fn probe(&self, network: &NetworkInterface) -> Result<Vec<DiscoveredDevice>, ScanError> {
        let session = self.open(network.address)?;
        session.send_probe().await;
        Ok(session.collect().await)
    }
}

/// State of one in-flight probe. Dropping it closes the socket and frees the slot.
#[derive(Debug)]
pub struct ProbeSession {
    socket: UdpSocket,
    target: SocketAddrV4,
    deadline: Instant,
    devices: DeviceSet,
    _permit: OwnedSemaphorePermit,
}

impl ProbeSession {
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Sends one freshly built probe to the configured target.
    ///
    /// A failed send is logged and the session keeps listening.
    pub async fn send_probe(&self) {
        let probe = ProbeMessage::new();
        match self.socket.send_to(&probe.to_bytes(), self.target).await {
            Ok(_) => debug!("Sent probe {} to {}", probe.message_id(), self.target),
            Err(e) => warn!("Failed to send discovery probe to {}: {e}", self.target),
        }
    }

    /// Listens until the deadline and returns the devices seen, in arrival order.
    ///
    /// The socket is closed when this returns, even if datagrams are still arriving.
    pub async fn collect(mut self) -> Vec<DiscoveredDevice> {
        let deadline = tokio::time::sleep_until(self.deadline);
        tokio::pin!(deadline);
        let mut buf = vec![0u8; RECV_BUFFER_SIZE];

        loop {
            tokio::select! {
                res = self.socket.recv_from(&mut buf) => match res {
                    Ok((len, SocketAddr::V4(source))) => {
                        record_reply(&mut self.devices, &buf[..len], *source.ip());
                    }
                    Ok((_, SocketAddr::V6(source))) => debug!("Ignoring reply from {source}"),
                    Err(e) => debug!("Receive error while collecting replies: {e}"),
                },
                _ = &mut deadline => break,
            }
        }

        self.devices.into_vec()
    }
}

/// Records `source` as a device when `payload` looks like a discovery reply and the
/// IP has not answered before. Returns whether a new device was added.
pub fn record_reply(devices: &mut DeviceSet, payload: &[u8], source: Ipv4Addr) -> bool {
    let text = String::from_utf8_lossy(payload);
    if !reply::is_device_reply(&text) || devices.contains(source) {
        return false;
    }

    let device = DiscoveredDevice::onvif(source, reply::manufacturer(&text), reply::model(&text));
    info!(
        "Found camera at {} ({} {})",
        device.ip, device.manufacturer, device.model
    );
    devices.insert(device)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
