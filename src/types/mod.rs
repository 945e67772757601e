//! Core type definitions using newtype patterns for type safety.
//!
//! These types prevent common logic errors by making invalid states unrepresentable
//! at compile time.

mod host;
mod port;
mod subnet;

pub use host::{HostList, HostListError, HostRecord};
pub use port::{Port, PortError, PortRange};
pub use subnet::{SubnetError, SubnetRange};
