//! Scanner module - the sequential probe loop.
//!
//! Ports are probed one at a time in ascending order. A probe that reports
//! the port closed moves the loop on; a probe error ends the scan.

pub mod tcp;
pub mod traits;

use crate::error::{ScanError, ScanResult};
use crate::types::{Port, PortRange, ScanTarget};
use indicatif::ProgressBar;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub use tcp::TcpConnectProber;
pub use traits::{PortResult, PortStatus, Prober};

/// Configuration for one scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Resolved target.
    pub target: ScanTarget,
    /// Ports to probe, `[start, end)`.
    pub range: PortRange,
    /// Connect timeout per probe.
    pub timeout: Duration,
}

impl ScanConfig {
    /// Create a configuration with the default one-second timeout.
    pub fn new(target: ScanTarget, range: PortRange) -> Self {
        Self {
            target,
            range,
            timeout: Duration::from_secs(1),
        }
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> ScanResult<()> {
        if self.timeout.is_zero() {
            return Err(ScanError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the TCP connect prober this configuration describes.
    pub fn prober(&self) -> TcpConnectProber {
        TcpConnectProber::new(self.target.ip, self.timeout)
    }
}

/// Outcome of a completed scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub target: ScanTarget,
    pub range: PortRange,
    /// Open ports, ascending.
    pub open_ports: Vec<Port>,
    pub ports_scanned: usize,
    pub duration_ms: u64,
}

impl ScanReport {
    pub fn all_closed(&self) -> bool {
        self.open_ports.is_empty()
    }
}

/// Probe every port in `range` in ascending order, one at a time.
///
/// Returns on the first probe error; ports after it are not probed.
pub async fn run_scan<P: Prober + ?Sized>(
    prober: &P,
    target: ScanTarget,
    range: PortRange,
    progress: Option<&ProgressBar>,
) -> ScanResult<ScanReport> {
    let start_time = Instant::now();

    info!(
        host = %target,
        range = %range,
        timeout_ms = prober.timeout().as_millis() as u64,
        "starting scan"
    );

    let mut open_ports = Vec::new();
    let mut ports_scanned = 0;

    for port in range.iter() {
        let result = prober.probe(port).await.map_err(|e| {
            warn!(%port, error = %e, "aborting scan");
            e
        })?;
        ports_scanned += 1;

        debug_assert!(range.contains(result.port));
        if result.is_open() {
            debug!(%port, response_time_ms = ?result.response_time_ms, "port open");
            if let Some(pb) = progress {
                pb.set_message(format!("found open port {}", port));
            }
            open_ports.push(result.port);
        }

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let duration_ms = start_time.elapsed().as_millis() as u64;
    info!(
        open = open_ports.len(),
        scanned = ports_scanned,
        duration_ms,
        "scan complete"
    );

    Ok(ScanReport {
        target,
        range,
        open_ports,
        ports_scanned,
        duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::io;
    use std::net::Ipv4Addr;
    use std::sync::Mutex;
    use tokio::net::TcpListener;

    /// In-memory prober that records the order ports were probed in.
    struct FakeProber {
        open: HashSet<u16>,
        fail_at: Option<u16>,
        probed: Mutex<Vec<u16>>,
    }

    impl FakeProber {
        fn new(open: &[u16]) -> Self {
            Self {
                open: open.iter().copied().collect(),
                fail_at: None,
                probed: Mutex::new(Vec::new()),
            }
        }

        fn failing_at(mut self, port: u16) -> Self {
            self.fail_at = Some(port);
            self
        }

        fn probed(&self) -> Vec<u16> {
            self.probed.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Prober for FakeProber {
        async fn probe(&self, port: Port) -> ScanResult<PortResult> {
            self.probed.lock().unwrap().push(port.as_u16());
            if self.fail_at == Some(port.as_u16()) {
                return Err(ScanError::Socket {
                    port: port.as_u16(),
                    source: io::Error::from(io::ErrorKind::NetworkUnreachable),
                });
            }
            if self.open.contains(&port.as_u16()) {
                Ok(PortResult::open(port))
            } else {
                Ok(PortResult::closed(port))
            }
        }

        fn timeout(&self) -> Duration {
            Duration::from_secs(1)
        }
    }

    fn localhost() -> ScanTarget {
        ScanTarget::new("localhost", Ipv4Addr::LOCALHOST)
    }

    fn ports(report: &ScanReport) -> Vec<u16> {
        report.open_ports.iter().map(|p| p.as_u16()).collect()
    }

    #[tokio::test]
    async fn test_probes_ascending_and_reports_open() {
        let prober = FakeProber::new(&[80, 53, 22, 443]);
        let range = PortRange::from_bounds(50, 85).unwrap();

        let report = run_scan(&prober, localhost(), range, None).await.unwrap();

        assert_eq!(prober.probed(), (50..85).collect::<Vec<u16>>());
        assert_eq!(ports(&report), vec![53, 80]);
        assert_eq!(report.ports_scanned, 35);
        assert!(!report.all_closed());
    }

    #[tokio::test]
    async fn test_open_ports_stay_inside_range() {
        let prober = FakeProber::new(&[49, 50, 84, 85]);
        let range = PortRange::from_bounds(50, 85).unwrap();

        let report = run_scan(&prober, localhost(), range, None).await.unwrap();

        assert_eq!(ports(&report), vec![50, 84]);
        assert!(report.open_ports.iter().all(|p| range.contains(*p)));
    }

    #[tokio::test]
    async fn test_no_listeners_is_all_closed() {
        let prober = FakeProber::new(&[]);
        let range = PortRange::from_bounds(50, 85).unwrap();

        let report = run_scan(&prober, localhost(), range, None).await.unwrap();

        assert!(report.all_closed());
    }

    #[tokio::test]
    async fn test_empty_range_probes_nothing() {
        let prober = FakeProber::new(&[80]);
        let range = PortRange::from_bounds(80, 80).unwrap();

        let report = run_scan(&prober, localhost(), range, None).await.unwrap();

        assert!(prober.probed().is_empty());
        assert_eq!(report.ports_scanned, 0);
    }

    #[tokio::test]
    async fn test_socket_error_aborts_remaining_ports() {
        let prober = FakeProber::new(&[52]).failing_at(55);
        let range = PortRange::from_bounds(50, 60).unwrap();

        let err = run_scan(&prober, localhost(), range, None).await.unwrap_err();

        assert!(matches!(err, ScanError::Socket { port: 55, .. }));
        assert_eq!(prober.probed(), vec![50, 51, 52, 53, 54, 55]);
    }

    #[tokio::test]
    async fn test_progress_advances_per_probe() {
        let prober = FakeProber::new(&[]);
        let range = PortRange::from_bounds(1, 11).unwrap();
        let pb = ProgressBar::hidden();
        pb.set_length(range.len() as u64);

        run_scan(&prober, localhost(), range, Some(&pb)).await.unwrap();

        assert_eq!(pb.position(), 10);
    }

    #[tokio::test]
    async fn test_real_listener_reported_open() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let open = listener.local_addr().unwrap().port();

        let lo = open.saturating_sub(3).max(1);
        let hi = open.saturating_add(4);
        let range = PortRange::from_bounds(lo, hi).unwrap();
        let config =
            ScanConfig::new(localhost(), range).with_timeout(Duration::from_millis(200));
        let prober = config.prober();

        let report = run_scan(&prober, config.target.clone(), config.range, None)
            .await
            .unwrap();

        let found = ports(&report);
        assert!(found.contains(&open));
        assert!(found.windows(2).all(|w| w[0] < w[1]));
        assert!(report.open_ports.iter().all(|p| range.contains(*p)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let range = PortRange::from_bounds(50, 85).unwrap();
        let config = ScanConfig::new(localhost(), range).with_timeout(Duration::ZERO);
        assert!(matches!(config.validate(), Err(ScanError::InvalidConfig(_))));
    }
}
