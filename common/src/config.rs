use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

/// WS-Discovery well-known UDP port.
pub const DISCOVERY_PORT: u16 = 3702;
/// WS-Discovery IPv4 multicast group.
pub const DISCOVERY_GROUP: Ipv4Addr = Ipv4Addr::new(239, 255, 255, 250);
/// How long the prober listens for replies, measured from bind.
pub const PROBE_WINDOW: Duration = Duration::from_secs(5);

/// Management port probed by the sweep and reported for every device.
pub const MANAGEMENT_PORT: u16 = 80;
/// Upper bound on TCP attempts in flight during a sweep.
pub const SWEEP_CONCURRENCY: usize = 20;
/// Per-attempt TCP connect timeout.
pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(500);

/// Port the HTTP API listens on by default.
pub const HTTP_PORT: u16 = 8085;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Hides banner, headers and progress output.
    pub quiet: bool,
    /// Scans from the interface with this name instead of the first usable one.
    pub interface: Option<String>,
    /// Disables the TCP sweep that runs when the multicast probe finds nothing.
    ///
    /// The probe itself is unaffected.
    pub no_sweep: bool,
    pub probe: ProbeConfig,
    pub sweep: SweepConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Local address the discovery socket binds to.
    pub bind_addr: SocketAddrV4,
    /// Where the probe is sent.
    pub target: SocketAddrV4,
    /// Multicast group joined for the duration of the probe.
    pub group: Ipv4Addr,
    pub window: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DISCOVERY_PORT),
            target: SocketAddrV4::new(DISCOVERY_GROUP, DISCOVERY_PORT),
            group: DISCOVERY_GROUP,
            window: PROBE_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepConfig {
    pub port: u16,
    pub concurrency: usize,
    pub connect_timeout: Duration,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            port: MANAGEMENT_PORT,
            concurrency: SWEEP_CONCURRENCY,
            connect_timeout: CONNECT_TIMEOUT,
        }
    }
}
