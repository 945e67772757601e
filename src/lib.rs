//! # Trawl - An IPv4 Subnet Sweeper
//!
//! Trawl discovers live hosts and open TCP ports on the local subnet.
//! It derives the usable address range from a local interface's address
//! and mask, reverse-resolves every candidate, and probes a bounded
//! port range with non-blocking, timeout-bounded connect attempts.
//!
//! ## Features
//!
//! - **Range Derivation**: network/broadcast math from the interface's own mask
//! - **Host Discovery**: reverse DNS probe for every candidate address
//! - **Port Probing**: async TCP connect with per-attempt timeouts
//! - **Bounded Concurrency**: independent per-host and cross-host limits
//! - **Multiple Output Formats**: plain text, JSON, and CSV
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use trawl::scanner::TcpProber;
//! use trawl::types::Port;
//! use std::net::Ipv4Addr;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let target = Ipv4Addr::new(192, 168, 1, 1);
//!     let prober = TcpProber::new(target, Duration::from_millis(1000));
//!
//!     let result = prober.probe_port(Port::new(80).unwrap()).await;
//!     println!("Port {} is {}", result.port, result.state);
//! }
//! ```
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`types`] - Core type definitions: ports, subnet ranges, host records
//! - [`iface`] - Local interface selection via the OS interface table
//! - [`resolve`] - Reverse name resolution behind a trait seam
//! - [`scanner`] - TCP connect probing with bounded concurrency
//! - [`sweep`] - The coordinator driving probers over the whole range
//! - [`config`] - Settings file management
//! - [`error`] - Error types
//! - [`output`] - Report rendering

pub mod cli;
pub mod config;
pub mod error;
pub mod iface;
pub mod output;
pub mod resolve;
pub mod scanner;
pub mod services;
pub mod sweep;
pub mod types;

// Re-export commonly used types
pub use error::{ConfigError, ScanError};
pub use scanner::{PortResult, PortState, TcpProber};
pub use sweep::{run_sweep, ScanConfig, SweepReport};
pub use types::{HostList, HostRecord, Port, PortRange, SubnetRange};
