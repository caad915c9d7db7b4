//! # portprobe - a sequential TCP connect port prober
//!
//! Probes a target's TCP ports in ascending order, one connect at a time,
//! and reports which ones complete a handshake within the timeout.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portprobe::scanner::{run_scan, ScanConfig};
//! use portprobe::types::{PortRange, TargetSpec};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let target = TargetSpec::parse("192.168.1.1").unwrap().resolve().await.unwrap();
//!     let range = PortRange::from_bounds(50, 85).unwrap();
//!     let config = ScanConfig::new(target, range).with_timeout(Duration::from_secs(1));
//!
//!     let report = run_scan(&config.prober(), config.target.clone(), range, None)
//!         .await
//!         .unwrap();
//!     for port in &report.open_ports {
//!         println!("Port {} is open", port);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated ports, half-open port ranges, IPv4 targets
//! - [`scanner`] - The `Prober` trait, TCP connect prober and scan loop
//! - [`config`] - Probe settings and build metadata
//! - [`error`] - Error types
//! - [`output`] - Console output
//! - [`cli`] - Argument parsing and the command flow

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, ConfigError, ScanError};
pub use scanner::{run_scan, PortResult, PortStatus, Prober, ScanReport};
pub use types::{Port, PortRange, ScanTarget, TargetSpec};
