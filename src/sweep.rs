//! Subnet sweep coordination.
//!
//! Drives the reverse-name prober and the port prober over every
//! candidate address in the range, with a bounded pool of per-host
//! tasks. Workers report through a channel; a single accumulating loop
//! owns the host list and the report, so appends never race. Problems
//! with individual candidates are logged and the sweep carries on; by
//! the time a sweep starts there is nothing left that can fail it.

use crate::output;
use crate::resolve::ReverseResolver;
use crate::scanner::{probe_ports_bounded, PortResult, PortState, TcpProber};
use crate::services;
use crate::types::{HostList, HostRecord, Port, PortRange, SubnetRange};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use governor::Quota;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::net::Ipv4Addr;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Direct (unkeyed) governor rate limiter shared across the sweep.
type DirectLimiter = governor::RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Configuration for a subnet sweep.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Ports probed on every candidate.
    pub ports: PortRange,
    /// Per-attempt connect timeout.
    pub timeout: Duration,
    /// Maximum in-flight connect attempts per host.
    pub concurrency: usize,
    /// Number of candidate addresses swept at once.
    pub host_concurrency: usize,
    /// Host list capacity.
    pub max_hosts: usize,
    /// Connect attempts per second across the sweep, 0 for unlimited.
    pub rate_limit: u32,
    /// Keep every scanned candidate in the report, not just the live ones.
    pub show_closed: bool,
    /// Announce open ports on stdout as they are found.
    pub announce: bool,
    /// Show per-candidate progress.
    pub verbose: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            ports: PortRange::WELL_KNOWN,
            timeout: Duration::from_millis(1000),
            concurrency: 200,
            host_concurrency: 16,
            max_hosts: 256,
            rate_limit: 0,
            show_closed: false,
            announce: true,
            verbose: false,
        }
    }
}

/// An open port attributed to a host, with its service label.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OpenPortReport {
    pub port: u16,
    pub service: &'static str,
}

/// One scanned candidate's outcome inside the final report.
#[derive(Debug, Clone, Serialize)]
pub struct HostReport {
    pub addr: Ipv4Addr,
    pub hostname: Option<String>,
    pub open_ports: Vec<OpenPortReport>,
    pub closed: usize,
    pub filtered: usize,
}

/// Complete results of one sweep.
#[derive(Debug, Clone, Serialize)]
pub struct SweepReport {
    pub interface: String,
    pub network: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    pub mask: Ipv4Addr,
    pub prefix: u8,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub candidates: u32,
    pub ports_per_host: usize,
    pub open_ports: usize,
    pub closed_ports: usize,
    pub filtered_ports: usize,
    pub skipped_hosts: usize,
    pub discovered: Vec<HostRecord>,
    pub hosts: Vec<HostReport>,
}

/// Worker-to-accumulator messages.
enum SweepEvent {
    Resolved {
        addr: Ipv4Addr,
        hostname: String,
    },
    Open {
        addr: Ipv4Addr,
        hostname: Option<String>,
        port: Port,
    },
    HostDone {
        addr: Ipv4Addr,
        hostname: Option<String>,
        results: Vec<PortResult>,
    },
}

/// Sweep every candidate address in the range.
///
/// Candidates are swept by a bounded worker pool; each worker reverse
/// resolves its address first and then probes the port range. All
/// accumulation happens on this task.
pub async fn run_sweep(
    interface: &str,
    range: SubnetRange,
    config: ScanConfig,
    resolver: Arc<dyn ReverseResolver>,
) -> SweepReport {
    let started_at = Utc::now();
    let start = Instant::now();

    let candidates: Vec<Ipv4Addr> = range.hosts().collect();
    let candidate_count = range.host_count();

    let progress = if config.verbose {
        Some(build_progress(candidate_count))
    } else {
        None
    };

    let limiter = build_limiter(config.rate_limit);
    let ports: Vec<Port> = config.ports.iter().collect();

    let (tx, mut rx) = mpsc::channel::<SweepEvent>(256);

    let driver = {
        let timeout = config.timeout;
        let concurrency = config.concurrency;
        let host_concurrency = config.host_concurrency;
        tokio::spawn(async move {
            stream::iter(candidates)
                .for_each_concurrent(host_concurrency, move |addr| {
                    let resolver = Arc::clone(&resolver);
                    let limiter = limiter.clone();
                    let ports = ports.clone();
                    let tx = tx.clone();
                    async move {
                        sweep_host(addr, ports, timeout, concurrency, resolver, limiter, tx)
                            .await;
                    }
                })
                .await;
        })
    };

    let mut list = HostList::with_capacity(config.max_hosts);
    let mut entries: Vec<HostReport> = Vec::new();
    let mut open_total = 0usize;
    let mut closed_total = 0usize;
    let mut filtered_total = 0usize;
    let mut skipped = 0usize;

    while let Some(event) = rx.recv().await {
        match event {
            SweepEvent::Resolved { addr, hostname } => {
                match list.push(HostRecord::new(addr, Some(hostname.clone()))) {
                    Ok(()) => debug!(%addr, %hostname, "host recorded"),
                    Err(e) => {
                        skipped += 1;
                        warn!(%addr, %e, "host not recorded");
                    }
                }
            }
            SweepEvent::Open {
                addr,
                hostname,
                port,
            } => {
                if config.announce {
                    output::print_open_port(hostname.as_deref(), addr, port.as_u16());
                }
                if let Some(ref pb) = progress {
                    pb.set_message(format!("open {}:{}", addr, port));
                }
            }
            SweepEvent::HostDone {
                addr,
                hostname,
                results,
            } => {
                if let Some(ref pb) = progress {
                    pb.inc(1);
                }

                let open_ports: Vec<OpenPortReport> = results
                    .iter()
                    .filter(|r| r.is_open())
                    .map(|r| OpenPortReport {
                        port: r.port.as_u16(),
                        service: services::service_label(r.port.as_u16()),
                    })
                    .collect();
                let closed = results
                    .iter()
                    .filter(|r| r.state == PortState::Closed)
                    .count();
                let filtered = results
                    .iter()
                    .filter(|r| r.state == PortState::Filtered)
                    .count();

                open_total += open_ports.len();
                closed_total += closed;
                filtered_total += filtered;

                if hostname.is_some() || !open_ports.is_empty() || config.show_closed {
                    entries.push(HostReport {
                        addr,
                        hostname,
                        open_ports,
                        closed,
                        filtered,
                    });
                }
            }
        }
    }

    if let Err(e) = driver.await {
        warn!(%e, "sweep driver task failed");
    }

    if let Some(pb) = progress {
        pb.finish_with_message("Sweep complete");
    }

    entries.sort_by_key(|h| u32::from(h.addr));

    SweepReport {
        interface: interface.to_string(),
        network: range.network(),
        broadcast: range.broadcast(),
        mask: range.mask(),
        prefix: range.prefix(),
        started_at,
        duration_ms: start.elapsed().as_millis() as u64,
        candidates: candidate_count,
        ports_per_host: config.ports.len(),
        open_ports: open_total,
        closed_ports: closed_total,
        filtered_ports: filtered_total,
        skipped_hosts: skipped,
        discovered: list.into_records(),
        hosts: entries,
    }
}

/// Probe one candidate: reverse name first, then the port range.
///
/// A failed lookup never skips the port scan.
async fn sweep_host(
    addr: Ipv4Addr,
    ports: Vec<Port>,
    timeout: Duration,
    concurrency: usize,
    resolver: Arc<dyn ReverseResolver>,
    limiter: Option<Arc<DirectLimiter>>,
    tx: mpsc::Sender<SweepEvent>,
) {
    debug!(%addr, "scanning candidate");

    let hostname = resolver.reverse_lookup(addr).await;
    if let Some(ref name) = hostname {
        let _ = tx
            .send(SweepEvent::Resolved {
                addr,
                hostname: name.clone(),
            })
            .await;
    }

    let prober = Arc::new(TcpProber::new(addr, timeout));
    let mut results = probe_ports_bounded(ports, concurrency, {
        let prober = Arc::clone(&prober);
        let hostname = hostname.clone();
        let limiter = limiter.clone();
        let tx = tx.clone();
        move |port| {
            let prober = Arc::clone(&prober);
            let hostname = hostname.clone();
            let limiter = limiter.clone();
            let tx = tx.clone();
            async move {
                if let Some(ref limiter) = limiter {
                    limiter.until_ready().await;
                }
                let result = prober.probe_port(port).await;
                if result.is_open() {
                    let _ = tx
                        .send(SweepEvent::Open {
                            addr,
                            hostname: hostname.clone(),
                            port,
                        })
                        .await;
                }
                result
            }
        }
    })
    .await;

    results.sort_by_key(|r| r.port);
    let _ = tx
        .send(SweepEvent::HostDone {
            addr,
            hostname,
            results,
        })
        .await;
}

/// Optional sweep-wide pacing of connect attempts.
fn build_limiter(rate: u32) -> Option<Arc<DirectLimiter>> {
    NonZeroU32::new(rate)
        .map(|rate| Arc::new(governor::RateLimiter::direct(Quota::per_second(rate))))
}

fn build_progress(candidates: u32) -> ProgressBar {
    let pb = ProgressBar::new(u64::from(candidates));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("=>-"),
    );
    pb
}
