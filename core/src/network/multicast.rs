use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4, UdpSocket};

use socket2::{Domain, Protocol, Socket, Type};
use tracing::{debug, warn};

/// Opens the UDP socket used for one discovery exchange.
///
/// Only creating and binding the socket can fail. Joining `group`, pinning the
/// outgoing interface and disabling multicast loopback are attempted on `interface`
/// and merely logged when refused, because replies still arrive through broadcast
/// and unicast without them.
pub(crate) fn bind_discovery_socket(
    bind_addr: SocketAddrV4,
    group: Ipv4Addr,
    interface: Ipv4Addr,
) -> io::Result<UdpSocket> {
    let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_broadcast(true)?;
    socket.bind(&SocketAddr::V4(bind_addr).into())?;
    socket.set_nonblocking(true)?;

    if let Err(e) = socket.join_multicast_v4(&group, &interface) {
        warn!("Could not join multicast group {group} on {interface}: {e}");
    }
    if let Err(e) = socket.set_multicast_if_v4(&interface) {
        warn!("Could not send multicast through {interface}: {e}");
    }
    // Our own probe mentions NetworkVideoTransmitter and would read as a reply.
    if let Err(e) = socket.set_multicast_loop_v4(false) {
        debug!("Could not disable multicast loopback: {e}");
    }

    Ok(socket.into())
}
