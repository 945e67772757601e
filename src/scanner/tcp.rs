//! TCP connect probing.
//!
//! Determines port state with ordinary connect() calls through the OS
//! socket API; no elevated privileges required. Every attempt is bounded
//! by the configured timeout, and a timed-out attempt is dropped on the
//! spot, releasing its socket. There are no retries.

use crate::error::{ScanError, ScanResult};
use crate::scanner::{PortResult, PortState};
use crate::types::Port;
use std::io;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::warn;

/// Consecutive exhaustion failures before the louder warning fires.
const EXHAUSTION_WARN_STREAK: u32 = 32;

/// Backoff after a descriptor-exhaustion failure.
const EXHAUSTION_BACKOFF: Duration = Duration::from_millis(50);

/// TCP connect prober for a single target address.
pub struct TcpProber {
    target: Ipv4Addr,
    timeout: Duration,
    exhaustion_streak: AtomicU32,
}

impl TcpProber {
    /// Create a new prober.
    pub fn new(target: Ipv4Addr, timeout: Duration) -> Self {
        Self {
            target,
            timeout,
            exhaustion_streak: AtomicU32::new(0),
        }
    }

    /// Attempt to connect to the target address.
    async fn attempt_connect(&self, addr: SocketAddr) -> ScanResult<TcpStream> {
        match timeout(self.timeout, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(classify_connect_error(e)),
            Err(_) => Err(ScanError::Timeout),
        }
    }

    /// Probe a single port and classify it.
    ///
    /// The stream from a successful attempt is dropped immediately; the
    /// sweep only needs the classification.
    pub async fn probe_port(&self, port: Port) -> PortResult {
        let addr = SocketAddr::V4(SocketAddrV4::new(self.target, port.as_u16()));

        match self.attempt_connect(addr).await {
            Ok(stream) => {
                drop(stream);
                self.exhaustion_streak.store(0, Ordering::Relaxed);
                PortResult::new(port, PortState::Open)
            }
            Err(ScanError::ConnectionRefused) => {
                self.exhaustion_streak.store(0, Ordering::Relaxed);
                PortResult::new(port, PortState::Closed)
            }
            Err(ScanError::ResourceExhausted(reason)) => {
                self.note_exhaustion(&reason).await;
                PortResult::new(port, PortState::Filtered)
            }
            Err(_) => PortResult::new(port, PortState::Filtered),
        }
    }

    /// Record a descriptor-exhaustion failure: back off briefly, warn on
    /// the first hit, and warn louder once the streak is sustained.
    async fn note_exhaustion(&self, reason: &str) {
        let streak = self.exhaustion_streak.fetch_add(1, Ordering::Relaxed) + 1;
        if streak == 1 {
            warn!(addr = %self.target, %reason, "socket exhaustion, backing off");
        } else if streak == EXHAUSTION_WARN_STREAK {
            warn!(
                addr = %self.target,
                streak,
                "sustained socket exhaustion, consider lowering concurrency"
            );
        }
        tokio::time::sleep(EXHAUSTION_BACKOFF).await;
    }
}

/// Map a connect error onto the scan error taxonomy.
///
/// Refusal comes through `ErrorKind`; the rest are matched on the raw
/// errno, which does not depend on the platform's message strings.
fn classify_connect_error(e: io::Error) -> ScanError {
    if e.kind() == io::ErrorKind::ConnectionRefused {
        return ScanError::ConnectionRefused;
    }

    match e.raw_os_error() {
        Some(code) if code == libc::EMFILE || code == libc::ENFILE => {
            ScanError::ResourceExhausted(e.to_string())
        }
        Some(code) if code == libc::ENETUNREACH => ScanError::NetworkUnreachable(e.to_string()),
        Some(code) if code == libc::EHOSTUNREACH => ScanError::HostUnreachable,
        _ => ScanError::ConnectionFailed(e.to_string()),
    }
}
