use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface as DatalinkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use serde::Serialize;
use tracing::debug;

/// An IPv4 address assigned to a local, non-loopback interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkInterface {
    pub name: String,
    pub address: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub cidr: String,
}

impl NetworkInterface {
    pub fn new(name: &str, network: Ipv4Network) -> Self {
        Self {
            name: name.to_string(),
            address: network.ip(),
            netmask: network.mask(),
            cidr: format!("{}/{}", network.ip(), network.prefix()),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// The interface only reaches this host.
    IsLoopback,
    /// The interface carries no IPv4 address.
    NoIpv4,
}

/// Lists every IPv4 address on the host's usable interfaces, in OS order.
///
/// Never fails: an empty vector means there is nothing to scan from.
pub fn list_usable() -> Vec<NetworkInterface> {
    usable_interfaces(&datalink::interfaces())
}

fn usable_interfaces(interfaces: &[DatalinkInterface]) -> Vec<NetworkInterface> {
    interfaces
        .iter()
        .filter(|intf| match is_usable_interface(intf) {
            Ok(()) => true,
            Err(reason) => {
                debug!("Skipping interface {}: {:?}", intf.name, reason);
                false
            }
        })
        .flat_map(|intf| {
            intf.ips.iter().filter_map(move |net| match net {
                IpNetwork::V4(v4) if !v4.ip().is_loopback() => {
                    Some(NetworkInterface::new(&intf.name, *v4))
                }
                _ => None,
            })
        })
        .collect()
}

fn is_usable_interface(interface: &DatalinkInterface) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() {
        return Err(ViabilityError::IsLoopback);
    }
    if !interface.ips.iter().any(|net| net.is_ipv4()) {
        return Err(ViabilityError::NoIpv4);
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
