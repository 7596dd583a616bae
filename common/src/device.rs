//! # Discovered Device Model
//!
//! A camera-like host found during one scan, plus the insertion-ordered set that
//! enforces "one device per source IP, first response wins".

use std::collections::HashSet;
use std::net::Ipv4Addr;

use serde::Serialize;

use crate::config::MANAGEMENT_PORT;

/// Placeholder for a manufacturer or model that could not be determined.
pub const UNKNOWN: &str = "Unknown";

/// How a device was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    /// Answered the WS-Discovery probe.
    Onvif,
    /// Accepted a TCP connection on the management port.
    Http,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Onvif => "onvif",
            DeviceKind::Http => "http",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredDevice {
    pub ip: Ipv4Addr,
    pub port: u16,
    pub manufacturer: String,
    pub model: String,
    #[serde(rename = "type")]
    pub kind: DeviceKind,
}

impl DiscoveredDevice {
    /// A device that answered the multicast probe.
    pub fn onvif(ip: Ipv4Addr, manufacturer: Option<String>, model: Option<String>) -> Self {
        Self {
            ip,
            port: MANAGEMENT_PORT,
            manufacturer: manufacturer.unwrap_or_else(|| UNKNOWN.to_string()),
            model: model.unwrap_or_else(|| UNKNOWN.to_string()),
            kind: DeviceKind::Onvif,
        }
    }

    /// A host that accepted a TCP connection on `port`.
    pub fn http(ip: Ipv4Addr, port: u16) -> Self {
        Self {
            ip,
            port,
            manufacturer: UNKNOWN.to_string(),
            model: UNKNOWN.to_string(),
            kind: DeviceKind::Http,
        }
    }
}

/// Devices keyed by IP, kept in the order they were first seen.
#[derive(Debug, Default)]
pub struct DeviceSet {
    seen: HashSet<Ipv4Addr>,
    devices: Vec<DiscoveredDevice>,
}

impl DeviceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.seen.contains(&ip)
    }

    /// Adds `device` unless its IP is already present.
    ///
    /// Returns `false` (and keeps the existing entry) for a repeated IP.
    pub fn insert(&mut self, device: DiscoveredDevice) -> bool {
        if !self.seen.insert(device.ip) {
            return false;
        }
        self.devices.push(device);
        true
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn into_vec(self) -> Vec<DiscoveredDevice> {
        self.devices
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

    fn onvif_at(last_octet: u8, manufacturer: &str) -> DiscoveredDevice {
        DiscoveredDevice::onvif(
            Ipv4Addr::new(192, 168, 1, last_octet),
            Some(manufacturer.to_string()),
            None,
        )
    }

    #[test]
    fn insert_should_keep_first_device_per_ip() {
        let mut set = DeviceSet::new();
        assert!(set.insert(onvif_at(10, "Hikvision")));
        assert!(!set.insert(onvif_at(10, "Dahua")));
        assert!(set.insert(onvif_at(11, "Axis")));
        assert!(!set.insert(onvif_at(11, "Axis")));

        let devices = set.into_vec();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].manufacturer, "Hikvision");
        assert_eq!(devices[1].manufacturer, "Axis");
    }

    #[test]
    fn insert_should_preserve_observation_order() {
        let mut set = DeviceSet::new();
        for octet in [30, 5, 200, 5, 30, 17] {
            set.insert(DiscoveredDevice::http(Ipv4Addr::new(10, 0, 0, octet), 80));
        }
        let order: Vec<u8> = set.into_vec().iter().map(|d| d.ip.octets()[3]).collect();
        assert_eq!(order, vec![30, 5, 200, 17]);
    }

    #[test]
    fn onvif_device_should_default_to_unknown_and_port_80() {
        let device = DiscoveredDevice::onvif(Ipv4Addr::new(10, 0, 0, 2), None, None);
        assert_eq!(device.port, 80);
        assert_eq!(device.manufacturer, UNKNOWN);
        assert_eq!(device.model, UNKNOWN);
        assert_eq!(device.kind, DeviceKind::Onvif);
    }

    #[test]
    fn device_should_serialize_with_type_field() {
        let device = DiscoveredDevice::http(Ipv4Addr::new(192, 168, 0, 7), 80);
        let json = serde_json::to_value(&device).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ip": "192.168.0.7",
                "port": 80,
                "manufacturer": "Unknown",
                "model": "Unknown",
                "type": "http"
            })
        );
    }
}
