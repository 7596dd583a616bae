use std::future::{self, Future};
use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Runs `prober` against `port` on every target with at most `concurrency`
/// attempts outstanding, and returns the targets it reported as reachable.
///
/// A new attempt starts as soon as any running one settles. The order of the
/// returned addresses follows completion, not input.
pub async fn handshake_range_discovery<I, F, Fut>(
    targets: I,
    port: u16,
    concurrency: usize,
    mut prober: F,
) -> Vec<Ipv4Addr>
where
    I: IntoIterator<Item = Ipv4Addr>,
    F: FnMut(SocketAddrV4) -> Fut,
    Fut: Future<Output = bool>,
{
    stream::iter(targets)
        .map(|ip| {
            let attempt = prober(SocketAddrV4::new(ip, port));
            async move { attempt.await.then_some(ip) }
        })
        .buffer_unordered(concurrency.max(1))
        .filter_map(future::ready)
        .collect()
        .await
}

/// Connect-only reachability check. The stream is dropped, and so closed, before
/// this returns; refused, unreachable and timed out attempts all report `false`.
pub async fn handshake_probe(addr: SocketAddrV4, probe_timeout: Duration) -> bool {
    matches!(
        timeout(probe_timeout, TcpStream::connect(addr)).await,
        Ok(Ok(_))
    )
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
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn handshake_range_discovery_should_bound_outstanding_attempts() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let started = Arc::new(AtomicUsize::new(0));

        let targets = (1..=254u8).map(|host| Ipv4Addr::new(10, 1, 2, host));
        let found = handshake_range_discovery(targets, 80, 20, |addr| {
            let in_flight = in_flight.clone();
            let peak = peak.clone();
            let started = started.clone();
            async move {
                started.fetch_add(1, Ordering::SeqCst);
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(2 + u64::from(addr.ip().octets()[3] % 5))).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                addr.ip().octets()[3] % 50 == 0
            }
        })
        .await;

        assert_eq!(started.load(Ordering::SeqCst), 254);
        assert!(peak.load(Ordering::SeqCst) <= 20, "peak was {}", peak.load(Ordering::SeqCst));
        assert!(peak.load(Ordering::SeqCst) > 1);

        let mut found = found;
        found.sort();
        let expected: Vec<Ipv4Addr> = [50u8, 100, 150, 200, 250]
            .into_iter()
            .map(|host| Ipv4Addr::new(10, 1, 2, host))
            .collect();
        assert_eq!(found, expected);
    }

    #[tokio::test]
    async fn handshake_range_discovery_should_treat_zero_concurrency_as_one() {
        let peak = Arc::new(AtomicUsize::new(0));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let targets = (1..=5u8).map(|host| Ipv4Addr::new(10, 0, 0, host));

        let found = handshake_range_discovery(targets, 80, 0, |_| {
            let peak = peak.clone();
            let in_flight = in_flight.clone();
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::task::yield_now().await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
                true
            }
        })
        .await;

        assert_eq!(found.len(), 5);
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn handshake_probe_should_connect_to_listener() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let addr = SocketAddrV4::new(Ipv4Addr::LOCALHOST, port);
        assert!(handshake_probe(addr, Duration::from_millis(500)).await);
    }

    #[tokio::test]
    async fn handshake_probe_should_report_refused_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let addr = SocketAddrV4::new(Ipv4Addr::LOCALHOST, port);
        assert!(!handshake_probe(addr, Duration::from_millis(500)).await);
    }

    #[tokio::test]
    #[ignore]
    async fn handshake_probe_should_timeout_on_unreachable_ip() {
        let addr = SocketAddrV4::new(Ipv4Addr::new(203, 0, 113, 1), 80);
        assert!(!handshake_probe(addr, Duration::from_millis(100)).await);
    }
}
