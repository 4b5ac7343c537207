//! CIDR parsing and matching.

use std::net::IpAddr;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubnetError {
    #[error("invalid CIDR notation: {0}")]
    InvalidCidr(String),

    #[error("invalid IP address: {0}")]
    InvalidIpAddress(String),
}

/// A network block, IPv4 or IPv6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subnet {
    V4 { network: u32, mask: u32 },
    V6 { network: u128, mask: u128 },
}

impl Subnet {
    /// Whether `ip` lies inside this block. IPv4-mapped IPv6 addresses
    /// are treated as IPv4.
    pub fn contains(&self, ip: IpAddr) -> bool {
        match (self, canonical(ip)) {
            (Subnet::V4 { network, mask }, IpAddr::V4(v4)) => u32::from(v4) & mask == *network,
            (Subnet::V6 { network, mask }, IpAddr::V6(v6)) => u128::from(v6) & mask == *network,
            _ => false,
        }
    }
}

fn canonical(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6
            .to_ipv4_mapped()
            .map(IpAddr::V4)
            .unwrap_or(IpAddr::V6(v6)),
        v4 => v4,
    }
}

impl FromStr for Subnet {
    type Err = SubnetError;

    /// `a.b.c.d/len`, `v6::addr/len`, or a bare address (full-length prefix).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, prefix) = match s.split_once('/') {
            Some((addr, prefix)) => {
                let prefix: u8 = prefix
                    .parse()
                    .map_err(|_| SubnetError::InvalidCidr(format!("invalid prefix length in '{s}'")))?;
                (addr, Some(prefix))
            }
            None => (s, None),
        };

        let ip: IpAddr = addr
            .parse()
            .map_err(|_| SubnetError::InvalidIpAddress(format!("'{addr}' in '{s}'")))?;

        match ip {
            IpAddr::V4(v4) => {
                let prefix = prefix.unwrap_or(32);
                if prefix > 32 {
                    return Err(SubnetError::InvalidCidr(format!(
                        "prefix length must be 0-32, got {prefix}"
                    )));
                }
                let mask = if prefix == 0 { 0 } else { !0u32 << (32 - prefix) };
                Ok(Subnet::V4 {
                    network: u32::from(v4) & mask,
                    mask,
                })
            }
            IpAddr::V6(v6) => {
                let prefix = prefix.unwrap_or(128);
                if prefix > 128 {
                    return Err(SubnetError::InvalidCidr(format!(
                        "prefix length must be 0-128, got {prefix}"
                    )));
                }
                let mask = if prefix == 0 { 0 } else { !0u128 << (128 - prefix) };
                Ok(Subnet::V6 {
                    network: u128::from(v6) & mask,
                    mask,
                })
            }
        }
    }
}

/// The parsed allow list.
#[derive(Debug, Clone, Default)]
pub struct SubnetList {
    subnets: Vec<Subnet>,
}

impl SubnetList {
    pub fn parse<S: AsRef<str>>(blocks: &[S]) -> Result<Self, SubnetError> {
        let subnets = blocks
            .iter()
            .map(|b| b.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { subnets })
    }

    pub fn contains(&self, ip: IpAddr) -> bool {
        self.subnets.iter().any(|s| s.contains(ip))
    }

    pub fn len(&self) -> usize {
        self.subnets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subnets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_private_ranges() {
        let list = SubnetList::parse(&["127.0.0.1/31", "10.0.0.0/8", "172.16.0.0/12", "192.168.0.0/16"]).unwrap();
        assert!(list.contains(ip("127.0.0.1")));
        assert!(list.contains(ip("127.0.0.0")));
        assert!(!list.contains(ip("127.0.0.2")));
        assert!(list.contains(ip("10.200.1.1")));
        assert!(list.contains(ip("172.31.255.255")));
        assert!(!list.contains(ip("172.32.0.1")));
        assert!(list.contains(ip("192.168.1.10")));
        assert!(!list.contains(ip("8.8.8.8")));
    }

    #[test]
    fn test_mapped_ipv6_matches_ipv4_block() {
        let list = SubnetList::parse(&["10.0.0.0/8"]).unwrap();
        assert!(list.contains(ip("::ffff:10.1.2.3")));
        assert!(!list.contains(ip("::1")));
    }

    #[test]
    fn test_ipv6_block() {
        let subnet: Subnet = "::1/128".parse().unwrap();
        assert!(subnet.contains(ip("::1")));
        assert!(!subnet.contains(ip("127.0.0.1")));
        let subnet: Subnet = "fd00::/8".parse().unwrap();
        assert!(subnet.contains(ip("fd12::5")));
    }

    #[test]
    fn test_bare_address_and_zero_prefix() {
        let single: Subnet = "192.168.0.7".parse().unwrap();
        assert!(single.contains(ip("192.168.0.7")));
        assert!(!single.contains(ip("192.168.0.8")));
        let any: Subnet = "0.0.0.0/0".parse().unwrap();
        assert!(any.contains(ip("1.2.3.4")));
    }

    #[test]
    fn test_invalid_blocks() {
        assert!(matches!("10.0.0.0/33".parse::<Subnet>(), Err(SubnetError::InvalidCidr(_))));
        assert!(matches!("10.0.0/8".parse::<Subnet>(), Err(SubnetError::InvalidIpAddress(_))));
        assert!(matches!("10.0.0.0/x".parse::<Subnet>(), Err(SubnetError::InvalidCidr(_))));
    }
}
