//! Configuration management for portprobe.
//!
//! Provides the probe settings (timeout and default range), their
//! XDG-compliant location, and static build metadata.

mod build_info;
mod settings;

pub use build_info::{BuildInfo, BUILD_INFO};
pub use settings::{Paths, ProbeSettings};
