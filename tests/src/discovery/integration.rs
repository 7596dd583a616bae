#![cfg(test)]
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::{Duration, Instant};

use camscout_common::config::{ProbeConfig, SweepConfig};
use camscout_common::device::{DeviceKind, UNKNOWN};
use camscout_common::error::ScanError;
use camscout_common::network::interface::NetworkInterface;
use camscout_core::discovery::{DiscoveryService, ScanMethod};
use camscout_core::scanner::InterfaceRepository;
use camscout_core::scanner::multicast::{MulticastProber, ProbeSlot};
use camscout_core::scanner::sweep::SubnetSweeper;
use pnet::ipnetwork::Ipv4Network;
use tokio::net::UdpSocket;

const HIKVISION_REPLY: &[u8] = b"<?xml version=\"1.0\"?><s:Envelope><s:Body><d:ProbeMatches><d:ProbeMatch>\
    <d:Types>dn:NetworkVideoTransmitter tds:Device</d:Types>\
    <tds:Manufacturer>Hikvision</tds:Manufacturer></d:ProbeMatch></d:ProbeMatches></s:Body></s:Envelope>";

struct LoopbackOnly;

impl InterfaceRepository for LoopbackOnly {
    fn usable_interfaces(&self) -> Vec<NetworkInterface> {
        vec![NetworkInterface::new(
            "lo",
            Ipv4Network::new(Ipv4Addr::LOCALHOST, 8).unwrap(),
        )]
    }
}

fn probe_config(target: SocketAddrV4, window: Duration) -> ProbeConfig {
    ProbeConfig {
        bind_addr: SocketAddrV4::new(Ipv4Addr::LOCALHOST, 0),
        target,
        window,
        ..ProbeConfig::default()
    }
}

fn unused_target() -> SocketAddrV4 {
    SocketAddrV4::new(Ipv4Addr::LOCALHOST, 9)
}

/// The probe reaches its target and replies from two cameras, one of them
/// answering twice, yield exactly two devices.
#[cfg(target_os = "linux")]
#[tokio::test]
async fn probe_should_collect_one_device_per_camera() {
    let responder = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let target = match responder.local_addr().unwrap() {
        SocketAddr::V4(addr) => addr,
        SocketAddr::V6(_) => unreachable!(),
    };

    let prober = MulticastProber::new(
        probe_config(target, Duration::from_millis(600)),
        ProbeSlot::new(),
    );
    let session = prober.open(Ipv4Addr::LOCALHOST).unwrap();
    let listening = session.local_addr().unwrap();
    session.send_probe().await;

    let mut buf = vec![0u8; 4096];
    let (len, _) = tokio::time::timeout(Duration::from_secs(1), responder.recv_from(&mut buf))
        .await
        .expect("probe should reach its target")
        .unwrap();
    let probe = String::from_utf8_lossy(&buf[..len]);
    assert!(probe.contains("uuid:"));
    assert!(probe.contains("dn:NetworkVideoTransmitter"));

    let camera_a = UdpSocket::bind("127.0.0.2:0").await.unwrap();
    let camera_b = UdpSocket::bind("127.0.0.3:0").await.unwrap();
    camera_a.send_to(HIKVISION_REPLY, listening).await.unwrap();
    camera_b.send_to(HIKVISION_REPLY, listening).await.unwrap();
    camera_a.send_to(b"<Types>onvif</Types><Manufacturer>Axis</Manufacturer>", listening)
        .await
        .unwrap();
    camera_b.send_to(b"no markers here", listening).await.unwrap();

    let devices = session.collect().await;

    let ips: Vec<Ipv4Addr> = devices.iter().map(|d| d.ip).collect();
    assert_eq!(ips, vec![Ipv4Addr::new(127, 0, 0, 2), Ipv4Addr::new(127, 0, 0, 3)]);
    for device in &devices {
        assert_eq!(device.kind, DeviceKind::Onvif);
        assert_eq!(device.manufacturer, "Hikvision");
        assert_eq!(device.port, 80);
    }
}

#[tokio::test]
async fn probe_should_return_empty_after_window() {
    let window = Duration::from_millis(400);
    let service = DiscoveryService::new(
        Box::new(LoopbackOnly),
        Box::new(MulticastProber::new(
            probe_config(unused_target(), window),
            ProbeSlot::new(),
        )),
        Box::new(SubnetSweeper::new(SweepConfig::default())),
    )
    .with_sweep_fallback(false);

    let started = Instant::now();
    let report = service.perform_discovery().await.unwrap();
    let elapsed = started.elapsed();

    assert!(report.devices.is_empty());
    assert_eq!(report.method, ScanMethod::Onvif);
    assert!(elapsed >= window, "returned after {elapsed:?}");
    assert!(elapsed < window + Duration::from_secs(1), "took {elapsed:?}");
}

#[tokio::test]
async fn concurrent_scan_should_be_rejected() {
    let slot = ProbeSlot::new();
    let build = |slot: ProbeSlot| {
        DiscoveryService::new(
            Box::new(LoopbackOnly),
            Box::new(MulticastProber::new(
                probe_config(unused_target(), Duration::from_millis(300)),
                slot,
            )),
            Box::new(SubnetSweeper::new(SweepConfig::default())),
        )
        .with_sweep_fallback(false)
    };
    let first = build(slot.clone());
    let second = build(slot);

    let (a, b) = tokio::join!(first.perform_discovery(), second.perform_discovery());

    assert!(a.is_ok());
    assert!(matches!(b, Err(ScanError::ScanInProgress)));

    // The slot is free again once the first scan is over.
    assert!(second.perform_discovery().await.is_ok());
}

#[tokio::test]
async fn scan_should_report_bind_failure() {
    let holder = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
    let taken = match holder.local_addr().unwrap() {
        SocketAddr::V4(addr) => addr,
        SocketAddr::V6(_) => unreachable!(),
    };
    let cfg = ProbeConfig {
        bind_addr: taken,
        ..probe_config(unused_target(), Duration::from_millis(100))
    };
    let service = DiscoveryService::new(
        Box::new(LoopbackOnly),
        Box::new(MulticastProber::new(cfg, ProbeSlot::new())),
        Box::new(SubnetSweeper::new(SweepConfig::default())),
    );

    let err = service.perform_discovery().await.unwrap_err();
    assert!(matches!(err, ScanError::Bind { addr, .. } if addr == taken));
}

/// No camera answers, so the scan falls back to the sweep and finds the
/// listener on 127.0.0.1.
#[cfg(target_os = "linux")]
#[tokio::test]
async fn scan_should_fall_back_to_sweep() {
    use tokio::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let service = DiscoveryService::new(
        Box::new(LoopbackOnly),
        Box::new(MulticastProber::new(
            probe_config(unused_target(), Duration::from_millis(200)),
            ProbeSlot::new(),
        )),
        Box::new(SubnetSweeper::new(SweepConfig {
            port,
            concurrency: 20,
            connect_timeout: Duration::from_millis(200),
        })),
    );

    let report = service.perform_discovery().await.unwrap();

    assert_eq!(report.method, ScanMethod::Sweep);
    assert_eq!(report.network.name, "lo");
    let local = report
        .devices
        .iter()
        .find(|d| d.ip == Ipv4Addr::LOCALHOST)
        .expect("listener should be swept");
    assert_eq!(local.port, port);
    assert_eq!(local.kind, DeviceKind::Http);
    assert_eq!(local.manufacturer, UNKNOWN);
    assert_eq!(local.model, UNKNOWN);
}
