//! Static build metadata, fixed at compile time.

/// Name, version and authorship of this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub authors: &'static str,
    /// When the sources were last built, set by `build.rs`.
    pub last_modified: &'static str,
}

/// Metadata for the running binary.
pub const BUILD_INFO: BuildInfo = BuildInfo {
    name: env!("CARGO_PKG_NAME"),
    version: env!("CARGO_PKG_VERSION"),
    authors: env!("CARGO_PKG_AUTHORS"),
    last_modified: env!("PORTPROBE_BUILD_DATE"),
};
