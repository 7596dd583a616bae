//! Wire formats spoken by the camscout scanner.
//!
//! * [`wsdiscovery`] builds the WS-Discovery probe sent to the multicast group.
//! * [`reply`] recognises and classifies the free-form replies that come back.

pub mod reply;
pub mod wsdiscovery;
