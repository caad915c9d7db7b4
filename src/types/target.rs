//! Target specification and IPv4 resolution.
//!
//! A target is either an IPv4 literal or a hostname. Hostnames are resolved
//! once, before any port is probed, and only the first IPv4 address is used.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::str::FromStr;
use tracing::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// A scan target that has been resolved to an IPv4 address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScanTarget {
    /// The original input (hostname or IP string).
    pub original: String,
    /// The resolved IPv4 address.
    pub ip: Ipv4Addr,
}

impl ScanTarget {
    pub fn new(original: impl Into<String>, ip: Ipv4Addr) -> Self {
        Self {
            original: original.into(),
            ip,
        }
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.original == self.ip.to_string() {
            write!(f, "{}", self.ip)
        } else {
            write!(f, "{} ({})", self.original, self.ip)
        }
    }
}

/// Error type for target parsing and resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TargetError {
    #[error("invalid target format: {0}")]
    InvalidFormat(String),
    #[error("IPv6 targets are not supported: {0}")]
    Ipv6NotSupported(String),
    #[error("Hostname could not be resolved: '{0}' ({1})")]
    DnsResolutionFailed(String, String),
    #[error("Hostname could not be resolved: no IPv4 address found for '{0}'")]
    NoAddressesFound(String),
}

/// A parsed, not yet resolved, target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// An IPv4 literal.
    Single(Ipv4Addr),
    /// A hostname to be resolved.
    Hostname(String),
}

impl TargetSpec {
    /// Parse a target specification from a string.
    pub fn parse(s: &str) -> Result<Self, TargetError> {
        let s = s.trim();

        match s.parse::<IpAddr>() {
            Ok(IpAddr::V4(ip)) => return Ok(Self::Single(ip)),
            Ok(IpAddr::V6(_)) => return Err(TargetError::Ipv6NotSupported(s.to_string())),
            Err(_) => {}
        }

        if is_valid_hostname(s) {
            return Ok(Self::Hostname(s.to_string()));
        }

        Err(TargetError::InvalidFormat(s.to_string()))
    }

    /// Resolve this specification to a single IPv4 target.
    pub async fn resolve(&self) -> Result<ScanTarget, TargetError> {
        match self {
            Self::Single(ip) => Ok(ScanTarget::new(ip.to_string(), *ip)),

            Self::Hostname(hostname) => {
                let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
                    debug!(error = %e, "system resolver config unavailable, using defaults");
                    TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
                });

                let response = resolver.lookup_ip(hostname.as_str()).await.map_err(|e| {
                    TargetError::DnsResolutionFailed(hostname.clone(), e.to_string())
                })?;

                let ip = response
                    .iter()
                    .find_map(|ip| match ip {
                        IpAddr::V4(v4) => Some(v4),
                        IpAddr::V6(_) => None,
                    })
                    .ok_or_else(|| TargetError::NoAddressesFound(hostname.clone()))?;

                debug!(%hostname, %ip, "resolved target");
                Ok(ScanTarget::new(hostname.clone(), ip))
            }
        }
    }
}

impl FromStr for TargetSpec {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(ip) => write!(f, "{}", ip),
            Self::Hostname(hostname) => write!(f, "{}", hostname),
        }
    }
}

/// Check if a string is a valid hostname.
fn is_valid_hostname(s: &str) -> bool {
    if s.is_empty() || s.len() > 253 {
        return false;
    }

    // Each label must be 1-63 characters
    for label in s.split('.') {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        // Must start and end with alphanumeric
        if !label.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        if !label.chars().last().is_some_and(|c| c.is_ascii_alphanumeric()) {
            return false;
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return false;
        }
    }

    true
}
