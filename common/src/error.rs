use std::net::SocketAddrV4;

use thiserror::Error;

/// Failures that abort a scan and are reported to its caller.
///
/// Everything else (multicast join, probe send, individual TCP attempts,
/// unrecognised replies) is absorbed inside the scan.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("No usable network interface found")]
    NoUsableInterface,
    #[error("Network interface '{0}' not found")]
    InterfaceNotFound(String),
    #[error("A scan is already in progress")]
    ScanInProgress,
    #[error("Failed to bind discovery socket on {addr}: {source}")]
    Bind {
        addr: SocketAddrV4,
        #[source]
        source: std::io::Error,
    },
}
