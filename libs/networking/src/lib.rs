//! Networking utilities for CDN rule and firewall validation.
//!
//! This library provides helpers for:
//! - Parsing CIDR notation for IPv4 and IPv6
//! - Masking addresses to a prefix
//! - Containment and overlap checks between prefixes

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use thiserror::Error;

/// Networking errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// Invalid IP address.
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// Invalid CIDR prefix.
    #[error("invalid CIDR prefix: {0}")]
    InvalidPrefix(String),
}

/// Address family of a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpFamily {
    V4,
    V6,
}

impl IpFamily {
    /// Number of bits in an address of this family.
    pub const fn max_prefix_len(self) -> u8 {
        match self {
            IpFamily::V4 => 32,
            IpFamily::V6 => 128,
        }
    }

    /// Guesses the family of a CIDR string without parsing it.
    ///
    /// Anything containing a colon is treated as IPv6.
    pub fn of_str(s: &str) -> Self {
        if s.contains(':') {
            IpFamily::V6
        } else {
            IpFamily::V4
        }
    }
}

// ============================================================================
// Prefixes
// ============================================================================

/// An IP prefix in CIDR notation.
///
/// `address` keeps the address as written, host bits included; use
/// [`IpPrefix::network`] for the masked base address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpPrefix {
    /// Address as written.
    pub address: IpAddr,

    /// Prefix length (e.g., 24 for /24).
    pub prefix_len: u8,
}

impl IpPrefix {
    /// Create a new prefix.
    pub fn new(address: IpAddr, prefix_len: u8) -> Result<Self, NetworkError> {
        let max = family_of(address).max_prefix_len();
        if prefix_len > max {
            return Err(NetworkError::InvalidPrefix(format!(
                "prefix length {} exceeds {}",
                prefix_len, max
            )));
        }

        Ok(Self {
            address,
            prefix_len,
        })
    }

    /// Parse from CIDR notation (e.g., "192.168.0.0/24" or "2001:db8::/32").
    ///
    /// The prefix length is mandatory and must be plain decimal digits.
    pub fn from_cidr(s: &str) -> Result<Self, NetworkError> {
        let Some((addr_str, prefix_str)) = s.split_once('/') else {
            return Err(NetworkError::InvalidPrefix(format!(
                "missing '/' in CIDR: {}",
                s
            )));
        };

        let address = IpAddr::from_str(addr_str)
            .map_err(|_| NetworkError::InvalidAddress(addr_str.to_string()))?;

        if prefix_str.is_empty()
            || prefix_str.len() > 3
            || !prefix_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(NetworkError::InvalidPrefix(prefix_str.to_string()));
        }

        let prefix_len = prefix_str
            .parse::<u8>()
            .map_err(|_| NetworkError::InvalidPrefix(prefix_str.to_string()))?;

        Self::new(address, prefix_len)
    }

    /// Address family of this prefix.
    pub fn family(&self) -> IpFamily {
        family_of(self.address)
    }

    /// Base address with host bits cleared.
    pub fn network(&self) -> IpAddr {
        mask(self.address, self.prefix_len)
    }

    /// Check if an address is within this prefix.
    pub fn contains(&self, addr: IpAddr) -> bool {
        family_of(addr) == self.family() && mask(addr, self.prefix_len) == self.network()
    }

    /// Check if two prefixes share any address.
    ///
    /// Prefixes either nest or are disjoint, so it is enough to check
    /// whether the less specific one contains the more specific network.
    pub fn overlaps(&self, other: &IpPrefix) -> bool {
        let (wide, narrow) = if self.prefix_len <= other.prefix_len {
            (self, other)
        } else {
            (other, self)
        };
        wide.contains(narrow.network())
    }
}

impl std::fmt::Display for IpPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.address, self.prefix_len)
    }
}

impl FromStr for IpPrefix {
    type Err = NetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_cidr(s)
    }
}

fn family_of(addr: IpAddr) -> IpFamily {
    match addr {
        IpAddr::V4(_) => IpFamily::V4,
        IpAddr::V6(_) => IpFamily::V6,
    }
}

/// Mask an address to a prefix length.
fn mask(addr: IpAddr, prefix_len: u8) -> IpAddr {
    match addr {
        IpAddr::V4(v4) => IpAddr::V4(mask_ipv4(v4, prefix_len)),
        IpAddr::V6(v6) => IpAddr::V6(mask_ipv6(v6, prefix_len)),
    }
}

/// Mask an IPv4 address to a prefix length.
fn mask_ipv4(addr: Ipv4Addr, prefix_len: u8) -> Ipv4Addr {
    let bits = u32::from(addr);
    let mask = if prefix_len == 0 {
        0
    } else if prefix_len >= 32 {
        u32::MAX
    } else {
        u32::MAX << (32 - prefix_len)
    };
    Ipv4Addr::from(bits & mask)
}

/// Mask an IPv6 address to a prefix length.
fn mask_ipv6(addr: Ipv6Addr, prefix_len: u8) -> Ipv6Addr {
    let bits = u128::from_be_bytes(addr.octets());
    let mask = if prefix_len == 0 {
        0
    } else if prefix_len >= 128 {
        u128::MAX
    } else {
        u128::MAX << (128 - prefix_len)
    };
    Ipv6Addr::from((bits & mask).to_be_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_prefix() {
        let prefix = IpPrefix::from_cidr("192.168.0.1/24").unwrap();
        assert_eq!(prefix.prefix_len, 24);
        assert_eq!(prefix.family(), IpFamily::V4);
        assert_eq!(prefix.network(), "192.168.0.0".parse::<IpAddr>().unwrap());
        assert_eq!(prefix.to_string(), "192.168.0.1/24");

        assert!(prefix.contains("192.168.0.200".parse().unwrap()));
        assert!(!prefix.contains("192.168.1.1".parse().unwrap()));
    }

    #[test]
    fn test_ipv6_prefix() {
        let prefix = IpPrefix::from_cidr("2001:db8::/32").unwrap();
        assert_eq!(prefix.prefix_len, 32);
        assert_eq!(prefix.family(), IpFamily::V6);

        assert!(prefix.contains("2001:db8::1".parse().unwrap()));
        assert!(!prefix.contains("2001:db9::1".parse().unwrap()));
    }

    #[test]
    fn test_contains_ignores_other_family() {
        let prefix = IpPrefix::from_cidr("0.0.0.0/0").unwrap();
        assert!(prefix.contains("10.0.0.1".parse().unwrap()));
        assert!(!prefix.contains("::1".parse().unwrap()));
    }

    #[test]
    fn test_prefix_length_bounds() {
        assert!(IpPrefix::from_cidr("10.0.0.0/32").is_ok());
        assert!(IpPrefix::from_cidr("10.0.0.0/33").is_err());
        assert!(IpPrefix::from_cidr("::/128").is_ok());
        assert!(IpPrefix::from_cidr("::/129").is_err());
    }

    #[test]
    fn test_rejects_malformed() {
        for input in [
            "10.0.0.0",
            "10.0.0.0/",
            "10.0.0.0/+8",
            "10.0.0.0/ 8",
            "10.0.0/8",
            "10.0.0.256/8",
            "fe80::1%eth0/64",
            "/24",
            "",
        ] {
            assert!(IpPrefix::from_cidr(input).is_err(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_overlaps() {
        let wide = IpPrefix::from_cidr("192.168.0.1/24").unwrap();
        let narrow = IpPrefix::from_cidr("192.168.0.1/26").unwrap();
        let sibling = IpPrefix::from_cidr("192.168.1.1/24").unwrap();

        assert!(wide.overlaps(&narrow));
        assert!(narrow.overlaps(&wide));
        assert!(!wide.overlaps(&sibling));
        assert!(!sibling.overlaps(&narrow));
    }

    #[test]
    fn test_family_of_str() {
        assert_eq!(IpFamily::of_str("10.0.0.0/8"), IpFamily::V4);
        assert_eq!(IpFamily::of_str("::ffff:10.0.0.0/104"), IpFamily::V6);
    }
}
