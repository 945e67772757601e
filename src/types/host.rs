//! Discovered host records and their bounded accumulation.

use serde::Serialize;
use std::net::Ipv4Addr;

/// Error type for host list accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HostListError {
    #[error("host list is full ({0} entries)")]
    CapacityExceeded(usize),
    #[error("host {0} is already recorded")]
    DuplicateAddress(Ipv4Addr),
}

/// A discovered host: its address plus the reverse-resolved name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostRecord {
    pub addr: Ipv4Addr,
    pub hostname: Option<String>,
}

impl HostRecord {
    /// Create a new host record.
    pub fn new(addr: Ipv4Addr, hostname: Option<String>) -> Self {
        Self { addr, hostname }
    }

    /// Display name for the host, "Unknown" when unresolved.
    pub fn display_name(&self) -> &str {
        self.hostname.as_deref().unwrap_or("Unknown")
    }
}

/// Append-only list of the hosts discovered during one sweep.
///
/// The capacity is fixed up front; appends past it and duplicate
/// addresses are rejected so callers can log and carry on.
#[derive(Debug)]
pub struct HostList {
    records: Vec<HostRecord>,
    capacity: usize,
}

impl HostList {
    /// Create an empty list holding at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::new(),
            capacity,
        }
    }

    /// Append a record, enforcing capacity and address uniqueness.
    pub fn push(&mut self, record: HostRecord) -> Result<(), HostListError> {
        if self.records.len() >= self.capacity {
            return Err(HostListError::CapacityExceeded(self.capacity));
        }
        if self.records.iter().any(|r| r.addr == record.addr) {
            return Err(HostListError::DuplicateAddress(record.addr));
        }
        self.records.push(record);
        Ok(())
    }

    /// Number of recorded hosts.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no hosts have been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The configured capacity.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate the records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &HostRecord> {
        self.records.iter()
    }

    /// Consume the list, yielding the records in insertion order.
    pub fn into_records(self) -> Vec<HostRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(last_octet: u8) -> HostRecord {
        HostRecord::new(
            Ipv4Addr::new(192, 168, 1, last_octet),
            Some(format!("host-{last_octet}.lan")),
        )
    }

    #[test]
    fn test_push_and_order() {
        let mut list = HostList::with_capacity(4);
        list.push(record(3)).unwrap();
        list.push(record(1)).unwrap();
        assert_eq!(list.len(), 2);

        let records = list.into_records();
        assert_eq!(records[0].addr, Ipv4Addr::new(192, 168, 1, 3));
        assert_eq!(records[1].addr, Ipv4Addr::new(192, 168, 1, 1));
    }

    #[test]
    fn test_duplicate_address_rejected() {
        let mut list = HostList::with_capacity(4);
        list.push(record(1)).unwrap();

        let err = list.push(record(1)).unwrap_err();
        assert_eq!(
            err,
            HostListError::DuplicateAddress(Ipv4Addr::new(192, 168, 1, 1))
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_capacity_enforced() {
        let mut list = HostList::with_capacity(2);
        list.push(record(1)).unwrap();
        list.push(record(2)).unwrap();

        let err = list.push(record(3)).unwrap_err();
        assert_eq!(err, HostListError::CapacityExceeded(2));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_zero_capacity() {
        let mut list = HostList::with_capacity(0);
        assert!(matches!(
            list.push(record(1)),
            Err(HostListError::CapacityExceeded(0))
        ));
        assert!(list.is_empty());
    }

    #[test]
    fn test_display_name() {
        let named = record(1);
        assert_eq!(named.display_name(), "host-1.lan");

        let unnamed = HostRecord::new(Ipv4Addr::new(192, 168, 1, 9), None);
        assert_eq!(unnamed.display_name(), "Unknown");
    }
}
