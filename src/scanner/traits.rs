//! Prober trait abstraction.
//!
//! Defines the single-port probe interface the scan loop drives, so the loop
//! can be exercised without touching the network.

use crate::error::ScanResult;
use crate::types::Port;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// Status of a probed port.
///
/// Refusal, timeout and host-unreachable all collapse into `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortStatus {
    /// The TCP handshake completed within the timeout.
    Open,
    /// Anything else.
    Closed,
}

impl fmt::Display for PortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Result of probing a single port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortResult {
    /// The port number that was probed.
    pub port: Port,
    /// Status determined by the probe.
    pub status: PortStatus,
    /// Connect time in milliseconds, for open ports.
    pub response_time_ms: Option<u64>,
}

impl PortResult {
    pub fn new(port: Port, status: PortStatus) -> Self {
        Self {
            port,
            status,
            response_time_ms: None,
        }
    }

    pub fn open(port: Port) -> Self {
        Self::new(port, PortStatus::Open)
    }

    pub fn closed(port: Port) -> Self {
        Self::new(port, PortStatus::Closed)
    }

    /// Set the response time.
    pub fn with_response_time(mut self, time_ms: u64) -> Self {
        self.response_time_ms = Some(time_ms);
        self
    }

    pub fn is_open(&self) -> bool {
        self.status == PortStatus::Open
    }
}

/// Trait for single-port probe implementations.
///
/// `Ok` with any status means the scan continues; `Err` aborts it.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Probe a single port.
    async fn probe(&self, port: Port) -> ScanResult<PortResult>;

    /// Get the per-probe timeout.
    fn timeout(&self) -> Duration;
}
