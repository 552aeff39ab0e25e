//! Port types with validation.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortRange` is the inclusive span a scan walks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validated network port number (1-65535).
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
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("port {0} is out of valid range (1-65535)")]
    OutOfRange(u16),
    #[error("invalid port range: start ({0}) > end ({1})")]
    InvalidRange(u16, u16),
}

/// An inclusive range of ports. Never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Create a new port range.
    pub fn new(start: Port, end: Port) -> Result<Self, PortError> {
        if start.0 > end.0 {
            Err(PortError::InvalidRange(start.0, end.0))
        } else {
            Ok(Self { start, end })
        }
    }

    /// Build a range from raw numbers, validating both bounds.
    pub fn from_bounds(start: u16, end: u16) -> Result<Self, PortError> {
        Self::new(Port::try_from(start)?, Port::try_from(end)?)
    }

    pub const fn start(&self) -> Port {
        self.start
    }

    pub const fn end(&self) -> Port {
        self.end
    }

    /// Get the number of ports in this range.
    pub const fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize + 1
    }

    /// A valid range always holds at least one port.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all ports in this range, ascending.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_validation() {
        assert!(Port::new(0).is_none());
        assert!(Port::new(1).is_some());
        assert!(Port::new(65535).is_some());
        assert_eq!(Port::try_from(0), Err(PortError::OutOfRange(0)));
    }

    #[test]
    fn test_port_range() {
        let range = PortRange::from_bounds(1, 100).unwrap();
        assert_eq!(range.len(), 100);
        assert_eq!(range.iter().count(), 100);
        assert_eq!(range.to_string(), "1-100");
    }

    #[test]
    fn test_widest_range_length() {
        assert_eq!(PortRange::from_bounds(Port::MIN, Port::MAX).unwrap().len(), 65535);
    }

    #[test]
    fn test_single_port_range() {
        let range = PortRange::from_bounds(22, 22).unwrap();
        assert_eq!(range.len(), 1);
        assert_eq!(range.to_string(), "22");
    }

    #[test]
    fn test_inverted_range_rejected() {
        assert_eq!(
            PortRange::from_bounds(100, 50),
            Err(PortError::InvalidRange(100, 50))
        );
    }
}
