//! Error types for Trawl.
//!
//! Uses `thiserror` for ergonomic error definitions. `ScanError` covers
//! per-attempt failures that classify a port and never stop a sweep;
//! `ConfigError` covers the fatal problems that end the run.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::SubnetError;

/// Main error type for per-attempt scan failures.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Connection timed out")]
    Timeout,

    #[error("Connection refused")]
    ConnectionRefused,

    #[error("Network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("Host unreachable")]
    HostUnreachable,

    #[error("Out of socket resources: {0}")]
    ResourceExhausted(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Configuration problems that end the run with a nonzero exit.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No usable IPv4 interface found (up, non-loopback, broadcast-capable)")]
    NoUsableInterface,

    #[error("Interface not found: {0}")]
    InterfaceNotFound(String),

    #[error("Interface {0} has no IPv4 address")]
    NoIpv4Address(String),

    #[error("Invalid subnet: {0}")]
    Subnet(#[from] SubnetError),

    #[error("Could not determine config directory")]
    DirectoryNotFound,

    #[error("Failed to read {}: {reason}", path.display())]
    ReadFailed { path: PathBuf, reason: String },

    #[error("Failed to write {}: {reason}", path.display())]
    WriteFailed { path: PathBuf, reason: String },

    #[error("Invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("Settings serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
