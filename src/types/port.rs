//! Port types with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortRange` is the contiguous span of ports a sweep probes on every host.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated network port number (1-65535).
///
/// Using a newtype prevents accidental misuse of raw u16 values
/// and ensures port numbers are always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Create a Port without validation. Use only when the value is known valid.
    #[inline]
    pub const fn new_unchecked(port: u16) -> Self {
        Self(port)
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = PortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(PortError::OutOfRange(value))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// Error type for port parsing and validation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u16),
    #[error("invalid port number: {0}")]
    InvalidFormat(String),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
    #[error("empty port specification")]
    Empty,
}

/// A contiguous, inclusive range of ports.
///
/// Parses from "start-end" form ("1-1024") or a lone port ("80").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Default sweep range covering the well-known ports.
    pub const WELL_KNOWN: PortRange = PortRange {
        start: Port::new_unchecked(1),
        end: Port::new_unchecked(1024),
    };

    /// Create a new port range.
    pub fn new(start: Port, end: Port) -> Result<Self, PortError> {
        if start.0 > end.0 {
            Err(PortError::InvalidRange(start.0, end.0))
        } else {
            Ok(Self { start, end })
        }
    }

    /// Create a range containing a single port.
    pub const fn single(port: Port) -> Self {
        Self {
            start: port,
            end: port,
        }
    }

    /// First port in the range.
    pub const fn start(&self) -> Port {
        self.start
    }

    /// Last port in the range.
    pub const fn end(&self) -> Port {
        self.end
    }

    /// Get the number of ports in this range.
    pub const fn len(&self) -> usize {
        (self.end.0 - self.start.0 + 1) as usize
    }

    /// Check if the range is empty (never true for valid ranges).
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all ports in this range.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        let start = self.start.0;
        let end = self.end.0;
        (start..=end).map(Port::new_unchecked)
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl FromStr for PortRange {
    type Err = PortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PortError::Empty);
        }

        if s.contains('-') {
            let bounds: Vec<&str> = s.split('-').collect();
            if bounds.len() != 2 {
                return Err(PortError::InvalidFormat(s.to_string()));
            }

            let start: u16 = bounds[0]
                .trim()
                .parse()
                .map_err(|_| PortError::InvalidFormat(bounds[0].to_string()))?;
            let end: u16 = bounds[1]
                .trim()
                .parse()
                .map_err(|_| PortError::InvalidFormat(bounds[1].to_string()))?;

            let start = Port::new(start).ok_or(PortError::OutOfRange(start))?;
            let end = Port::new(end).ok_or(PortError::OutOfRange(end))?;
            Self::new(start, end)
        } else {
            let port: u16 = s
                .parse()
                .map_err(|_| PortError::InvalidFormat(s.to_string()))?;
            let port = Port::new(port).ok_or(PortError::OutOfRange(port))?;
            Ok(Self::single(port))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(80).is_some());
        assert!(Port::new(65535).is_some());
    }

    #[test]
    fn test_port_range_len() {
        let start = Port::new(1).unwrap();
        let end = Port::new(100).unwrap();
        let range = PortRange::new(start, end).unwrap();
        assert_eq!(range.len(), 100);
        assert_eq!(range.iter().count(), 100);
    }

    #[test]
    fn test_parse_single_port() {
        let range: PortRange = "80".parse().unwrap();
        assert_eq!(range.start().as_u16(), 80);
        assert_eq!(range.end().as_u16(), 80);
        assert_eq!(range.len(), 1);
    }

    #[test]
    fn test_parse_range() {
        let range: PortRange = "1-1024".parse().unwrap();
        assert_eq!(range.start().as_u16(), 1);
        assert_eq!(range.end().as_u16(), 1024);
        assert_eq!(range.len(), 1024);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let range: PortRange = " 20 - 25 ".parse().unwrap();
        assert_eq!(range.len(), 6);
    }

    #[test]
    fn test_parse_reversed_range() {
        assert!(matches!(
            "100-50".parse::<PortRange>(),
            Err(PortError::InvalidRange(100, 50))
        ));
    }

    #[test]
    fn test_parse_port_zero() {
        assert!(matches!(
            "0-80".parse::<PortRange>(),
            Err(PortError::OutOfRange(0))
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!("abc".parse::<PortRange>().is_err());
        assert!("1-2-3".parse::<PortRange>().is_err());
        assert!("".parse::<PortRange>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let range: PortRange = "22-443".parse().unwrap();
        assert_eq!(range.to_string(), "22-443");
        let single: PortRange = "22".parse().unwrap();
        assert_eq!(single.to_string(), "22");
    }

    #[test]
    fn test_well_known_default() {
        assert_eq!(PortRange::WELL_KNOWN.len(), 1024);
    }
}
