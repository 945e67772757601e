//! Reverse name resolution for sweep candidates.
//!
//! A candidate with no PTR record is an expected outcome, not an error:
//! the lookup returns `None` and the port scan proceeds regardless.

use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr};
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Reverse-resolution seam used by the sweep.
///
/// Abstracting the resolver lets sweeps run against a stub in tests.
#[async_trait]
pub trait ReverseResolver: Send + Sync {
    /// Look up the PTR name for an address. `None` on any miss or failure.
    async fn reverse_lookup(&self, addr: Ipv4Addr) -> Option<String>;
}

/// Production prober backed by the system's DNS configuration.
pub struct DnsProber {
    resolver: TokioAsyncResolver,
}

impl DnsProber {
    /// Build a resolver from the system configuration, falling back to
    /// library defaults when none can be read.
    pub fn new() -> Self {
        let resolver = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|_| {
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });
        Self { resolver }
    }
}

impl Default for DnsProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReverseResolver for DnsProber {
    async fn reverse_lookup(&self, addr: Ipv4Addr) -> Option<String> {
        match self.resolver.reverse_lookup(IpAddr::V4(addr)).await {
            Ok(lookup) => lookup.iter().next().map(|name| trim_root_dot(&name.to_string())),
            Err(_) => None,
        }
    }
}

/// PTR answers come back fully qualified; drop the trailing root dot.
fn trim_root_dot(name: &str) -> String {
    name.trim_end_matches('.').to_string()
}
