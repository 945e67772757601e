//! Scanner module - bounded concurrent TCP port probing.
//!
//! Provides the connect prober and the generic executor that caps the
//! number of in-flight attempts against a single host.

pub mod tcp;

use crate::types::Port;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tokio::sync::Semaphore;

pub use tcp::TcpProber;

/// Classification of a probed port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortState {
    /// Connect attempt completed; a service is listening.
    Open,
    /// Connection actively refused; reachable but nothing listening.
    Closed,
    /// No response within the timeout, or the attempt failed without a refusal.
    Filtered,
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortState::Open => write!(f, "open"),
            PortState::Closed => write!(f, "closed"),
            PortState::Filtered => write!(f, "filtered"),
        }
    }
}

/// Result of probing a single port.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PortResult {
    pub port: Port,
    pub state: PortState,
}

impl PortResult {
    /// Create a new port result.
    pub const fn new(port: Port, state: PortState) -> Self {
        Self { port, state }
    }

    /// Check if the port is open.
    pub fn is_open(&self) -> bool {
        self.state == PortState::Open
    }
}

/// Run a probe function over a set of ports with bounded concurrency.
///
/// At most `concurrency` probes are in flight at once; the semaphore is
/// the real bound, the stream buffer just keeps it fed and must never
/// sit below it.
pub async fn probe_ports_bounded<F, Fut>(
    ports: Vec<Port>,
    concurrency: usize,
    probe_fn: F,
) -> Vec<PortResult>
where
    F: Fn(Port) -> Fut + Send + Sync + Clone + 'static,
    Fut: std::future::Future<Output = PortResult> + Send,
{
    let semaphore = Arc::new(Semaphore::new(concurrency));

    stream::iter(ports)
        .map(|port| {
            let sem = Arc::clone(&semaphore);
            let probe = probe_fn.clone();

            async move {
                // The semaphore is never closed, so acquire cannot fail
                let _permit = sem.acquire().await.unwrap();
                probe(port).await
            }
        })
        .buffer_unordered(concurrency.max(1000))
        .collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_port_state_display() {
        assert_eq!(PortState::Open.to_string(), "open");
        assert_eq!(PortState::Closed.to_string(), "closed");
        assert_eq!(PortState::Filtered.to_string(), "filtered");
    }

    #[test]
    fn test_port_result_is_open() {
        let port = Port::new(80).unwrap();
        assert!(PortResult::new(port, PortState::Open).is_open());
        assert!(!PortResult::new(port, PortState::Closed).is_open());
    }

    #[tokio::test]
    async fn test_in_flight_probes_never_exceed_limit() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let high_water = Arc::new(AtomicUsize::new(0));
        let limit = 8;

        let ports: Vec<Port> = (1..=64).map(Port::new_unchecked).collect();

        let results = probe_ports_bounded(ports, limit, {
            let in_flight = Arc::clone(&in_flight);
            let high_water = Arc::clone(&high_water);
            move |port| {
                let in_flight = Arc::clone(&in_flight);
                let high_water = Arc::clone(&high_water);
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    high_water.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    PortResult::new(port, PortState::Closed)
                }
            }
        })
        .await;

        assert_eq!(results.len(), 64);
        assert!(high_water.load(Ordering::SeqCst) <= limit);
        assert_eq!(in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_limits_above_the_buffer_floor_are_honored() {
        let in_flight = Arc::new(AtomicUsize::new(0));
        let high_water = Arc::new(AtomicUsize::new(0));
        let limit = 1200;

        let ports: Vec<Port> = (1..=1500).map(Port::new_unchecked).collect();

        probe_ports_bounded(ports, limit, {
            let in_flight = Arc::clone(&in_flight);
            let high_water = Arc::clone(&high_water);
            move |port| {
                let in_flight = Arc::clone(&in_flight);
                let high_water = Arc::clone(&high_water);
                async move {
                    let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                    high_water.fetch_max(now, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(50)).await;
                    in_flight.fetch_sub(1, Ordering::SeqCst);
                    PortResult::new(port, PortState::Closed)
                }
            }
        })
        .await;

        let peak = high_water.load(Ordering::SeqCst);
        assert!(peak <= limit);
        assert!(peak > 1000, "stream buffer capped in-flight probes at {peak}");
    }

    #[tokio::test]
    async fn test_all_ports_probed_exactly_once() {
        let ports: Vec<Port> = (1..=100).map(Port::new_unchecked).collect();

        let mut results = probe_ports_bounded(ports, 16, |port| async move {
            PortResult::new(port, PortState::Open)
        })
        .await;

        results.sort_by_key(|r| r.port);
        assert_eq!(results.len(), 100);
        for (i, result) in results.iter().enumerate() {
            assert_eq!(result.port.as_u16(), (i + 1) as u16);
        }
    }
}
