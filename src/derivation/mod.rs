//! Fields derived from a validated IP address
//!
//! Only ever called with an `IpAddress` that passed validation, so every
//! function here is infallible.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

use crate::validators::IpAddress;

/// IPv4 address class used to pick a subnet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressClass {
    PrivateRfc1918,
    LinkLocalApipa,
    Loopback,
    PublicOrOther,
}

impl AddressClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrivateRfc1918 => "private_rfc1918",
            Self::LinkLocalApipa => "link_local_apipa",
            Self::Loopback => "loopback",
            Self::PublicOrOther => "public_or_other",
        }
    }
}

impl fmt::Display for AddressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything derived from one address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derived {
    /// Present for IPv4 only
    pub class: Option<AddressClass>,
    /// Empty for IPv6
    pub subnet_cidr: String,
    pub reverse_ptr: String,
}

/// Derive class, subnet and PTR name in one pass
pub fn derive(ip: &IpAddress) -> Derived {
    let class = match ip.addr() {
        IpAddr::V4(v4) => Some(classify_ipv4(v4)),
        IpAddr::V6(_) => None,
    };

    Derived {
        class,
        subnet_cidr: subnet_cidr(ip),
        reverse_ptr: reverse_ptr(ip),
    }
}

/// Classify an IPv4 address by its leading octets
pub fn classify_ipv4(addr: Ipv4Addr) -> AddressClass {
    match addr.octets() {
        [10, ..] => AddressClass::PrivateRfc1918,
        [172, second, ..] if (16..=31).contains(&second) => AddressClass::PrivateRfc1918,
        [192, 168, ..] => AddressClass::PrivateRfc1918,
        [169, 254, ..] => AddressClass::LinkLocalApipa,
        [127, ..] => AddressClass::Loopback,
        _ => AddressClass::PublicOrOther,
    }
}

/// Subnet the address is assumed to live in
///
/// Private space is bucketed into /24s; public addresses get a host route.
/// IPv6 is never bucketed and yields an empty string.
pub fn subnet_cidr(ip: &IpAddress) -> String {
    let IpAddr::V4(v4) = ip.addr() else {
        return String::new();
    };

    match classify_ipv4(v4) {
        AddressClass::PrivateRfc1918 => {
            let [a, b, c, _] = v4.octets();
            format!("{}.{}.{}.0/24", a, b, c)
        }
        AddressClass::LinkLocalApipa => "169.254.0.0/16".to_string(),
        AddressClass::Loopback => "127.0.0.0/8".to_string(),
        AddressClass::PublicOrOther => format!("{}/32", v4),
    }
}

/// Reverse-DNS pointer name (`in-addr.arpa` / `ip6.arpa`)
pub fn reverse_ptr(ip: &IpAddress) -> String {
    match ip.addr() {
        IpAddr::V4(v4) => {
            let [a, b, c, d] = v4.octets();
            format!("{}.{}.{}.{}.in-addr.arpa", d, c, b, a)
        }
        IpAddr::V6(v6) => format!("{}.ip6.arpa", reversed_nibbles(v6)),
    }
}

fn reversed_nibbles(addr: Ipv6Addr) -> String {
    let expanded: String = addr
        .segments()
        .iter()
        .map(|segment| format!("{:04x}", segment))
        .collect();

    expanded
        .chars()
        .rev()
        .map(String::from)
        .collect::<Vec<_>>()
        .join(".")
}
