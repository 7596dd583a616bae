//! # camscout core
//!
//! Finds IP cameras on the local segment. A scan asks the network with a WS-Discovery
//! multicast probe first and, when nobody answers, sweeps the local /24 for hosts that
//! accept TCP connections on the management port.
//!
//! * [`discovery`]: the scan orchestrator ([`discovery::DiscoveryService`]).
//! * [`scanner`]: the prober and sweeper, plus the traits they implement.
//! * [`system`]: the host-backed interface repository.

pub mod discovery;
mod network;
pub mod scanner;
pub mod system;
