use camscout_common::network::interface::{self, NetworkInterface};

use crate::scanner::InterfaceRepository;

/// Interfaces as reported by the host.
pub struct SystemInterfaces;

impl InterfaceRepository for SystemInterfaces {
    fn usable_interfaces(&self) -> Vec<NetworkInterface> {
        interface::list_usable()
    }
}
