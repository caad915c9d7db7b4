//! Core type definitions using newtype patterns for type safety.
//!
//! These types make invalid ports and reversed ranges unrepresentable.

mod port;
mod target;

pub use port::{Port, PortError, PortRange};
pub use target::{ScanTarget, TargetError, TargetSpec};
