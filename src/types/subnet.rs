//! IPv4 subnet range derivation.
//!
//! Computes the network and broadcast addresses implied by a local
//! address and subnet mask, and enumerates the host addresses strictly
//! between them. The endpoints themselves are never scan candidates.

use serde::Serialize;
use std::fmt;
use std::net::Ipv4Addr;

/// Error type for subnet derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubnetError {
    #[error("degenerate subnet mask {0} covers the whole address space")]
    DegenerateMask(Ipv4Addr),
}

/// An IPv4 subnet described by its network and broadcast addresses.
///
/// Derived once per sweep from the selected interface:
/// `network = addr & mask`, `broadcast = network | !mask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubnetRange {
    network: Ipv4Addr,
    broadcast: Ipv4Addr,
    mask: Ipv4Addr,
}

impl SubnetRange {
    /// Derive the subnet range for an interface address and mask.
    ///
    /// An all-zero mask is rejected. An all-ones mask (/32) is accepted
    /// and yields an empty range, as does /31: point-to-point links have
    /// no host addresses between network and broadcast.
    pub fn from_ip_mask(addr: Ipv4Addr, mask: Ipv4Addr) -> Result<Self, SubnetError> {
        let mask_bits = u32::from(mask);
        if mask_bits == 0 {
            return Err(SubnetError::DegenerateMask(mask));
        }

        let network = u32::from(addr) & mask_bits;
        let broadcast = network | !mask_bits;

        Ok(Self {
            network: Ipv4Addr::from(network),
            broadcast: Ipv4Addr::from(broadcast),
            mask,
        })
    }

    /// The network address (all host bits zero).
    pub const fn network(&self) -> Ipv4Addr {
        self.network
    }

    /// The broadcast address (all host bits one).
    pub const fn broadcast(&self) -> Ipv4Addr {
        self.broadcast
    }

    /// The subnet mask the range was derived from.
    pub const fn mask(&self) -> Ipv4Addr {
        self.mask
    }

    /// Prefix length implied by the mask.
    pub fn prefix(&self) -> u8 {
        u32::from(self.mask).count_ones() as u8
    }

    /// Number of host addresses between network and broadcast.
    pub fn host_count(&self) -> u32 {
        (u32::from(self.broadcast) - u32::from(self.network)).saturating_sub(1)
    }

    /// Iterate the host addresses in ascending order.
    ///
    /// The network and broadcast addresses are never yielded; for /31
    /// and /32 masks the iterator is empty.
    pub fn hosts(&self) -> impl Iterator<Item = Ipv4Addr> {
        let network = u32::from(self.network);
        let broadcast = u32::from(self.broadcast);
        (network..broadcast).skip(1).map(Ipv4Addr::from)
    }
}

impl fmt::Display for SubnetRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    #[test]
    fn test_slash24_derivation() {
        let range = SubnetRange::from_ip_mask(ip("192.168.1.10"), ip("255.255.255.0")).unwrap();
        assert_eq!(range.network(), ip("192.168.1.0"));
        assert_eq!(range.broadcast(), ip("192.168.1.255"));
        assert_eq!(range.prefix(), 24);
        assert_eq!(range.host_count(), 254);

        let hosts: Vec<Ipv4Addr> = range.hosts().collect();
        assert_eq!(hosts.len(), 254);
        assert_eq!(hosts[0], ip("192.168.1.1"));
        assert_eq!(hosts[253], ip("192.168.1.254"));
    }

    #[test]
    fn test_endpoints_excluded() {
        let range = SubnetRange::from_ip_mask(ip("10.0.0.3"), ip("255.255.255.248")).unwrap();
        assert_eq!(range.network(), ip("10.0.0.0"));
        assert_eq!(range.broadcast(), ip("10.0.0.7"));

        let hosts: Vec<Ipv4Addr> = range.hosts().collect();
        assert_eq!(hosts.len(), 6);
        assert!(!hosts.contains(&range.network()));
        assert!(!hosts.contains(&range.broadcast()));
    }

    #[test]
    fn test_host_bits_masked_off() {
        let a = SubnetRange::from_ip_mask(ip("192.168.1.10"), ip("255.255.255.0")).unwrap();
        let b = SubnetRange::from_ip_mask(ip("192.168.1.200"), ip("255.255.255.0")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_broadcast_exceeds_network() {
        for mask in ["255.0.0.0", "255.255.0.0", "255.255.255.0", "255.255.255.252"] {
            let range = SubnetRange::from_ip_mask(ip("172.16.5.9"), ip(mask)).unwrap();
            assert!(u32::from(range.broadcast()) > u32::from(range.network()));
        }
    }

    #[test]
    fn test_slash31_yields_no_candidates() {
        let range = SubnetRange::from_ip_mask(ip("10.1.2.4"), ip("255.255.255.254")).unwrap();
        assert_eq!(range.host_count(), 0);
        assert_eq!(range.hosts().count(), 0);
    }

    #[test]
    fn test_slash32_yields_no_candidates() {
        let range = SubnetRange::from_ip_mask(ip("10.1.2.4"), ip("255.255.255.255")).unwrap();
        assert_eq!(range.network(), range.broadcast());
        assert_eq!(range.host_count(), 0);
        assert_eq!(range.hosts().count(), 0);
    }

    #[test]
    fn test_zero_mask_rejected() {
        let err = SubnetRange::from_ip_mask(ip("10.1.2.4"), ip("0.0.0.0")).unwrap_err();
        assert_eq!(err, SubnetError::DegenerateMask(ip("0.0.0.0")));
    }

    #[test]
    fn test_display() {
        let range = SubnetRange::from_ip_mask(ip("192.168.1.10"), ip("255.255.255.0")).unwrap();
        assert_eq!(range.to_string(), "192.168.1.0/24");
    }
}
