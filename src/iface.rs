//! Local interface discovery.
//!
//! Selects the IPv4 interface a sweep derives its address range from,
//! using the OS interface table via `pnet`.

use crate::error::{ConfigError, ConfigResult};
use ipnetwork::IpNetwork;
use pnet::datalink::{self, NetworkInterface};
use std::net::Ipv4Addr;
use tracing::debug;

/// The local network a sweep runs over.
#[derive(Debug, Clone)]
pub struct LocalNet {
    /// OS interface name (e.g. "eth0").
    pub interface: String,
    /// The interface's IPv4 address.
    pub addr: Ipv4Addr,
    /// The interface's subnet mask.
    pub mask: Ipv4Addr,
}

/// Select the interface to sweep from.
///
/// When `name` is given that interface must exist and carry an IPv4
/// address. Otherwise the first interface that is up, non-loopback,
/// broadcast-capable, and IPv4-addressed is chosen.
pub fn discover(name: Option<&str>) -> ConfigResult<LocalNet> {
    let interfaces = datalink::interfaces();

    let interface = match name {
        Some(wanted) => interfaces
            .into_iter()
            .find(|iface| iface.name == wanted)
            .ok_or_else(|| ConfigError::InterfaceNotFound(wanted.to_string()))?,
        None => interfaces
            .into_iter()
            .find(is_usable)
            .ok_or(ConfigError::NoUsableInterface)?,
    };

    let (addr, mask) = first_ipv4(&interface.ips)
        .ok_or_else(|| ConfigError::NoIpv4Address(interface.name.clone()))?;

    debug!(iface = %interface.name, %addr, %mask, "selected local interface");

    Ok(LocalNet {
        interface: interface.name,
        addr,
        mask,
    })
}

/// Interfaces eligible for automatic selection.
fn is_usable(iface: &NetworkInterface) -> bool {
    iface.is_up()
        && !iface.is_loopback()
        && iface.is_broadcast()
        && iface.ips.iter().any(|net| matches!(net, IpNetwork::V4(_)))
}

/// First IPv4 address on the interface, with its subnet mask.
fn first_ipv4(ips: &[IpNetwork]) -> Option<(Ipv4Addr, Ipv4Addr)> {
    ips.iter().find_map(|net| match net {
        IpNetwork::V4(v4) => Some((v4.ip(), v4.mask())),
        IpNetwork::V6(_) => None,
    })
}
