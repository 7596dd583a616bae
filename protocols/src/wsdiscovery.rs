use uuid::{Builder, Uuid};

pub const DISCOVERY_TO: &str = "urn:schemas-xmlsoap-org:ws:2005:04:discovery";
pub const PROBE_ACTION: &str = "http://schemas.xmlsoap.org/ws/2005/04/discovery/Probe";
pub const VIDEO_TRANSMITTER_TYPE: &str = "dn:NetworkVideoTransmitter";

/// A WS-Discovery `Probe` asking ONVIF video transmitters to identify themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeMessage {
    message_id: Uuid,
}

impl ProbeMessage {
    /// Creates a probe with a fresh random message identifier.
    pub fn new() -> Self {
        Self {
            message_id: random_message_id(),
        }
    }

    pub fn message_id(&self) -> Uuid {
        self.message_id
    }

    pub fn to_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<e:Envelope xmlns:e="http://www.w3.org/2003/05/soap-envelope"
    xmlns:w="http://schemas.xmlsoap.org/ws/2004/08/addressing"
    xmlns:d="http://schemas.xmlsoap.org/ws/2005/04/discovery"
    xmlns:dn="http://www.onvif.org/ver10/network/wsdl">
    <e:Header>
        <w:MessageID>uuid:{id}</w:MessageID>
        <w:To>{to}</w:To>
        <w:Action>{action}</w:Action>
    </e:Header>
    <e:Body>
        <d:Probe>
            <d:Types>{types}</d:Types>
        </d:Probe>
    </e:Body>
</e:Envelope>"#,
            id = self.message_id.hyphenated(),
            to = DISCOVERY_TO,
            action = PROBE_ACTION,
            types = VIDEO_TRANSMITTER_TYPE,
        )
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_xml().into_bytes()
    }
}

impl Default for ProbeMessage {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a ready-to-send probe payload. Every call carries a new identifier.
pub fn build_probe() -> Vec<u8> {
    ProbeMessage::new().to_bytes()
}

/// 122 random bits laid out as a version 4, RFC 4122 variant UUID.
fn random_message_id() -> Uuid {
    let bytes: [u8; 16] = rand::random();
    Builder::from_random_bytes(bytes).into_uuid()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
