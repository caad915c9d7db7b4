//! TCP Connect prober.
//!
//! Performs a standard TCP connect using the operating system's socket API.
//! Each probe opens a fresh socket and drops it as soon as the outcome is
//! known.

use crate::error::{ScanError, ScanResult};
use crate::scanner::traits::{PortResult, Prober};
use crate::types::Port;
use async_trait::async_trait;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::{Duration, Instant};
use tokio::net::TcpSocket;
use tokio::time::timeout;
use tracing::debug;

/// TCP Connect prober.
///
/// Does not require elevated privileges.
pub struct TcpConnectProber {
    target: Ipv4Addr,
    timeout: Duration,
}

impl TcpConnectProber {
    /// Create a new prober.
    ///
    /// # Arguments
    /// * `target` - Target IPv4 address
    /// * `timeout` - Connect timeout per port
    pub fn new(target: Ipv4Addr, timeout: Duration) -> Self {
        Self { target, timeout }
    }

    /// Probe `port` with a socket produced by `open_socket`.
    ///
    /// A socket that cannot be created is a local failure and ends the scan.
    async fn probe_with<F>(&self, port: Port, open_socket: F) -> ScanResult<PortResult>
    where
        F: FnOnce() -> io::Result<TcpSocket>,
    {
        let socket_error = |source| ScanError::Socket {
            port: port.as_u16(),
            source,
        };

        let socket = open_socket().map_err(socket_error)?;
        let addr = SocketAddr::V4(SocketAddrV4::new(self.target, port.as_u16()));
        let start = Instant::now();

        match timeout(self.timeout, socket.connect(addr)).await {
            Ok(Ok(stream)) => {
                let response_time = start.elapsed().as_millis() as u64;
                drop(stream);
                Ok(PortResult::open(port).with_response_time(response_time))
            }
            Ok(Err(e)) if means_closed(&e) => {
                debug!(%port, error = %e, "connect failed");
                Ok(PortResult::closed(port))
            }
            Ok(Err(e)) => Err(socket_error(e)),
            Err(_) => {
                debug!(%port, "connect timed out");
                Ok(PortResult::closed(port))
            }
        }
    }
}

/// Whether a connect failure is the port's answer rather than a local or
/// network-wide fault. Anything not listed here aborts the scan.
fn means_closed(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::TimedOut
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::HostUnreachable
    )
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, port: Port) -> ScanResult<PortResult> {
        self.probe_with(port, TcpSocket::new_v4).await
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::PortStatus;
    use tokio::net::TcpListener;

    #[test]
    fn test_prober_creation() {
        let prober = TcpConnectProber::new(Ipv4Addr::LOCALHOST, Duration::from_secs(1));
        assert_eq!(prober.target, Ipv4Addr::LOCALHOST);
        assert_eq!(prober.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_closed_classification() {
        for kind in [
            io::ErrorKind::ConnectionRefused,
            io::ErrorKind::TimedOut,
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::ConnectionAborted,
            io::ErrorKind::HostUnreachable,
        ] {
            assert!(means_closed(&io::Error::from(kind)), "{:?}", kind);
        }

        for kind in [
            io::ErrorKind::NetworkUnreachable,
            io::ErrorKind::NetworkDown,
            io::ErrorKind::AddrNotAvailable,
            io::ErrorKind::PermissionDenied,
            io::ErrorKind::Other,
        ] {
            assert!(!means_closed(&io::Error::from(kind)), "{:?}", kind);
        }
    }

    #[tokio::test]
    async fn test_socket_creation_failure_aborts() {
        let prober = TcpConnectProber::new(Ipv4Addr::LOCALHOST, Duration::from_millis(200));
        let port = Port::new(80).unwrap();

        // EMFILE: the process is out of file descriptors
        let result = prober
            .probe_with(port, || Err(io::Error::from_raw_os_error(24)))
            .await;

        match result {
            Err(ScanError::Socket { port: 80, source }) => {
                assert_eq!(source.raw_os_error(), Some(24));
            }
            other => panic!("expected a socket error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_probe_open_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();

        let prober = TcpConnectProber::new(Ipv4Addr::LOCALHOST, Duration::from_secs(1));
        let result = prober.probe(port).await.unwrap();

        assert_eq!(result.port, port);
        assert_eq!(result.status, PortStatus::Open);
        assert!(result.response_time_ms.is_some());
    }

    #[tokio::test]
    async fn test_probe_closed_port() {
        // Grab a free port, then release it so nothing listens there
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();
        drop(listener);

        let prober = TcpConnectProber::new(Ipv4Addr::LOCALHOST, Duration::from_millis(200));
        let result = prober.probe(port).await.unwrap();

        assert_eq!(result.status, PortStatus::Closed);
        assert_eq!(result.response_time_ms, None);
    }
}
